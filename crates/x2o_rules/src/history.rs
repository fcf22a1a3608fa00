//! Move history: the single source of truth for a game.
//!
//! Game state is a fold over an append log of moves. Callers own a
//! [`MoveHistory`] value and replace it with the result of
//! [`MoveHistory::apply_move`]; the board and winner are always derived.

use super::action::{Move, MoveError, Placement};
use super::rules::{self, MAX_SYMBOLS_PER_PLAYER};
use super::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Ordered sequence of live moves plus the next order value to hand out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveHistory {
    moves: Vec<Move>,
    next_order: u64,
}

impl MoveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from raw parts without checking invariants.
    ///
    /// Used when reconstructing a game from an external record; run
    /// [`X2oInvariants`](crate::X2oInvariants) on the result before trusting it.
    pub fn from_parts(moves: Vec<Move>, next_order: u64) -> Self {
        Self { moves, next_order }
    }

    /// Live moves in storage order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The order value the next recorded move will receive.
    pub fn next_order(&self) -> u64 {
        self.next_order
    }

    /// Returns true if no move is live.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of live moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Live moves of `player`, oldest first.
    pub fn moves_of(&self, player: Player) -> Vec<Move> {
        let mut moves: Vec<Move> = self
            .moves
            .iter()
            .filter(|m| m.player == player)
            .copied()
            .collect();
        moves.sort_by_key(|m| m.order);
        moves
    }

    /// Number of live marks `player` has on the board.
    pub fn live_count(&self, player: Player) -> usize {
        self.moves.iter().filter(|m| m.player == player).count()
    }

    /// The move that will vanish on `player`'s next placement.
    ///
    /// Only `Some` when the player is exactly at capacity.
    pub fn oldest_move_of(&self, player: Player) -> Option<Move> {
        if self.live_count(player) == MAX_SYMBOLS_PER_PLAYER {
            rules::oldest_of(&self.moves, player)
        } else {
            None
        }
    }

    /// The move evicted if `player` places now (at or above capacity).
    pub fn eviction_for(&self, player: Player) -> Option<Move> {
        rules::eviction_target(&self.moves, player)
    }

    /// Derives the board by placing every live move's symbol.
    ///
    /// Live positions are unique under correct use. If two live moves share
    /// a cell the later one in storage order wins and a warning is logged.
    #[instrument(skip(self), fields(live = self.moves.len()))]
    pub fn board(&self) -> Board {
        let mut board = Board::new();
        for m in &self.moves {
            if !board.is_empty(m.position) {
                warn!(position = %m.position, order = m.order, "Two live moves share a cell");
            }
            board.set(m.position, Square::Occupied(m.player));
        }
        board
    }

    /// Evicts `player`'s oldest move if at capacity, then records the new mark.
    ///
    /// No legality checks. Returns the new history and the evicted move.
    ///
    /// # Errors
    ///
    /// [`MoveError::InvariantViolation`] if the order counter is exhausted.
    #[instrument(skip(self))]
    pub fn evict_and_place(
        &self,
        player: Player,
        position: Position,
    ) -> Result<(Self, Option<Move>), MoveError> {
        let next_order = self.next_order.checked_add(1).ok_or_else(|| {
            MoveError::InvariantViolation("Move order counter exhausted".to_string())
        })?;
        let evicted = self.eviction_for(player);
        let mut moves: Vec<Move> = self
            .moves
            .iter()
            .filter(|m| evicted.map_or(true, |e| e.order != m.order))
            .copied()
            .collect();
        moves.push(Move::new(player, position, self.next_order));
        Ok((Self { moves, next_order }, evicted))
    }

    /// Applies a placement, returning the next history.
    ///
    /// Turn order is not checked here; the caller (or
    /// [`GameInProgress`](crate::GameInProgress)) owns alternation.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the current board already has a winner.
    /// - [`MoveError::SquareOccupied`] if a live move holds `position`.
    /// - [`MoveError::InvariantViolation`] if the order counter is exhausted.
    #[instrument(skip(self), fields(live = self.moves.len()))]
    pub fn apply_move(&self, player: Player, position: Position) -> Result<Self, MoveError> {
        let board = self.board();

        if let Some(win) = rules::calculate_winner(&board) {
            warn!(winner = %win.player, "Move attempted after the game was won");
            return Err(MoveError::GameOver(win.player));
        }

        if !board.is_empty(position) {
            return Err(MoveError::SquareOccupied(position));
        }

        let (next, evicted) = self.evict_and_place(player, position)?;
        if let Some(evicted) = evicted {
            debug!(evicted = %evicted.position, order = evicted.order, "Evicted oldest mark");
        }

        #[cfg(debug_assertions)]
        {
            let expected = board.evict_and_place(evicted.map(|m| m.position), player, position);
            if next.board() != expected {
                return Err(MoveError::InvariantViolation(
                    "Derived board diverged from evict-and-place".to_string(),
                ));
            }
        }

        Ok(next)
    }

    /// Replays placements in order from an empty history.
    #[instrument]
    pub fn replay(placements: &[Placement]) -> Result<Self, MoveError> {
        placements
            .iter()
            .try_fold(Self::new(), |history, p| history.apply_move(p.player, p.position))
    }
}

/// Applies `player`'s mark at `position`; see [`MoveHistory::apply_move`].
pub fn apply_move(
    history: &MoveHistory,
    player: Player,
    position: Position,
) -> Result<MoveHistory, MoveError> {
    history.apply_move(player, position)
}

/// Derives the current board; see [`MoveHistory::board`].
pub fn derive_board(history: &MoveHistory) -> Board {
    history.board()
}

/// The cell about to vanish for `player`; see [`MoveHistory::oldest_move_of`].
pub fn oldest_move_of(history: &MoveHistory, player: Player) -> Option<Move> {
    history.oldest_move_of(player)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(cells: &[(Player, usize)]) -> MoveHistory {
        cells.iter().fold(MoveHistory::new(), |h, &(player, idx)| {
            let pos = Position::from_index(idx).expect("valid index");
            h.apply_move(player, pos).expect("legal move")
        })
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let history = play(&[(Player::X, 0)]);
        let next = history.apply_move(Player::O, Position::Center).expect("legal");
        assert_eq!(history.len(), 1);
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_orders_are_global_and_increasing() {
        let history = play(&[(Player::X, 0), (Player::O, 4), (Player::X, 8)]);
        let orders: Vec<u64> = history.moves().iter().map(|m| m.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(history.next_order(), 3);
    }

    #[test]
    fn test_fourth_move_evicts_oldest() {
        let history = play(&[
            (Player::X, 0),
            (Player::O, 4),
            (Player::X, 1),
            (Player::O, 8),
            (Player::X, 5),
            (Player::O, 3),
        ]);
        assert_eq!(history.live_count(Player::X), 3);

        let next = history.apply_move(Player::X, Position::BottomLeft).expect("legal");
        let x_cells: Vec<usize> = next
            .moves_of(Player::X)
            .iter()
            .map(|m| m.position.to_index())
            .collect();
        assert_eq!(x_cells, vec![1, 5, 6]);
        assert!(next.board().is_empty(Position::TopLeft));
        assert_eq!(next.live_count(Player::O), 3);
    }

    #[test]
    fn test_oldest_move_only_at_capacity() {
        let history = play(&[(Player::X, 0), (Player::O, 4), (Player::X, 1)]);
        assert_eq!(history.oldest_move_of(Player::X), None);

        let history = history
            .apply_move(Player::O, Position::BottomRight)
            .and_then(|h| h.apply_move(Player::X, Position::MiddleRight))
            .expect("legal");
        let oldest = history.oldest_move_of(Player::X).expect("X at capacity");
        assert_eq!(oldest.position, Position::TopLeft);
        assert_eq!(oldest.order, 0);
    }

    #[test]
    fn test_occupied_square_rejected() {
        let history = play(&[(Player::X, 4)]);
        assert_eq!(
            history.apply_move(Player::O, Position::Center),
            Err(MoveError::SquareOccupied(Position::Center))
        );
    }

    #[test]
    fn test_evicted_cell_can_be_reused() {
        let history = play(&[
            (Player::X, 0),
            (Player::O, 3),
            (Player::X, 1),
            (Player::O, 4),
            (Player::X, 8),
            (Player::O, 7),
            // X evicts 0
            (Player::X, 2),
        ]);
        assert!(history.board().is_empty(Position::TopLeft));
        // O may now take the freed cell (and evicts its own 3)
        let next = history.apply_move(Player::O, Position::TopLeft).expect("freed cell");
        assert_eq!(next.board().get(Position::TopLeft), Square::Occupied(Player::O));
        assert!(next.board().is_empty(Position::MiddleLeft));
    }

    #[test]
    fn test_moves_after_win_rejected() {
        let history = play(&[
            (Player::X, 0),
            (Player::O, 3),
            (Player::X, 1),
            (Player::O, 4),
            (Player::X, 2),
        ]);
        assert_eq!(
            history.apply_move(Player::O, Position::MiddleRight),
            Err(MoveError::GameOver(Player::X))
        );
    }

    #[test]
    fn test_shared_cell_goes_to_later_move() {
        let history = MoveHistory::from_parts(
            vec![
                Move::new(Player::X, Position::Center, 0),
                Move::new(Player::O, Position::Center, 1),
            ],
            2,
        );
        assert_eq!(history.board().get(Position::Center), Square::Occupied(Player::O));
        assert_eq!(history.board().empty_positions().len(), 8);
    }

    #[test]
    fn test_exhausted_order_counter_is_an_error() {
        let history = MoveHistory::from_parts(vec![Move::new(Player::X, Position::TopLeft, 0)], u64::MAX);
        assert!(matches!(
            history.apply_move(Player::O, Position::Center),
            Err(MoveError::InvariantViolation(_))
        ));
        assert!(history.evict_and_place(Player::O, Position::Center).is_err());
    }

    #[test]
    fn test_free_functions_delegate() {
        let history = apply_move(&MoveHistory::new(), Player::X, Position::Center).expect("legal");
        assert_eq!(derive_board(&history).get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(oldest_move_of(&history, Player::X), None);
    }
}
