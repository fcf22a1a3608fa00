//! Capacity invariant: no player has more than three live marks.

use super::Invariant;
use crate::{MAX_SYMBOLS_PER_PLAYER, MoveHistory, Player};
use strum::IntoEnumIterator;

/// Invariant: each player has at most [`MAX_SYMBOLS_PER_PLAYER`] live moves.
pub struct CapacityInvariant;

impl Invariant<MoveHistory> for CapacityInvariant {
    fn holds(history: &MoveHistory) -> bool {
        Player::iter().all(|p| history.live_count(p) <= MAX_SYMBOLS_PER_PLAYER)
    }

    fn description() -> &'static str {
        "No player has more than three live marks"
    }
}
