//! The per-player symbol cap and oldest-first eviction.

use super::super::{Move, Player};
use tracing::instrument;

/// Maximum number of live marks a player may have on the board.
pub const MAX_SYMBOLS_PER_PLAYER: usize = 3;

/// The live move of `player` with the smallest order, if any.
pub fn oldest_of(moves: &[Move], player: Player) -> Option<Move> {
    moves
        .iter()
        .filter(|m| m.player == player)
        .min_by_key(|m| m.order)
        .copied()
}

/// The move that disappears when `player` places their next mark.
///
/// `None` while the player is below [`MAX_SYMBOLS_PER_PLAYER`].
#[instrument(skip(moves))]
pub fn eviction_target(moves: &[Move], player: Player) -> Option<Move> {
    let live = moves.iter().filter(|m| m.player == player).count();
    if live >= MAX_SYMBOLS_PER_PLAYER {
        oldest_of(moves, player)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_no_eviction_below_cap() {
        let moves = vec![
            Move::new(Player::X, Position::TopLeft, 0),
            Move::new(Player::X, Position::Center, 2),
        ];
        assert_eq!(eviction_target(&moves, Player::X), None);
    }

    #[test]
    fn test_eviction_picks_smallest_order_not_storage_order() {
        // Storage order differs from age.
        let moves = vec![
            Move::new(Player::O, Position::Center, 5),
            Move::new(Player::X, Position::TopLeft, 0),
            Move::new(Player::O, Position::TopRight, 3),
            Move::new(Player::O, Position::BottomLeft, 7),
        ];
        assert_eq!(
            eviction_target(&moves, Player::O).map(|m| m.position),
            Some(Position::TopRight)
        );
        assert_eq!(eviction_target(&moves, Player::X), None);
    }
}
