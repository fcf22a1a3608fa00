//! Unique-position invariant: a cell holds at most one live move.

use super::Invariant;
use crate::MoveHistory;

/// Invariant: no two live moves reference the same position.
pub struct UniqueLivePositionsInvariant;

impl Invariant<MoveHistory> for UniqueLivePositionsInvariant {
    fn holds(history: &MoveHistory) -> bool {
        let mut seen = [false; 9];
        history.moves().iter().all(|m| {
            let idx = m.position.to_index();
            !std::mem::replace(&mut seen[idx], true)
        })
    }

    fn description() -> &'static str {
        "Every occupied cell is referenced by exactly one live move"
    }
}
