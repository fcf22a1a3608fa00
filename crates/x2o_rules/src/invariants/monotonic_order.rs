//! Monotonic order invariant: move ages are well ordered.

use super::Invariant;
use crate::MoveHistory;

/// Invariant: orders strictly increase in storage order and are all below
/// the next order to be assigned.
///
/// Eviction only removes entries, so a history built through
/// [`MoveHistory::apply_move`] always satisfies this.
pub struct MonotonicOrderInvariant;

impl Invariant<MoveHistory> for MonotonicOrderInvariant {
    fn holds(history: &MoveHistory) -> bool {
        let moves = history.moves();
        let increasing = moves.windows(2).all(|w| w[0].order < w[1].order);
        let below_next = moves.iter().all(|m| m.order < history.next_order());
        increasing && below_next
    }

    fn description() -> &'static str {
        "Move orders strictly increase and never reach the next order"
    }
}
