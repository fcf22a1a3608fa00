//! First-class action types.
//!
//! A [`Placement`] is a player's intent; a [`Move`] is the recorded event
//! that lives in a [`MoveHistory`](crate::MoveHistory) until it is evicted.

use super::{Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player's request to put their mark on a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The player placing the mark.
    pub player: Player,
    /// The target position.
    pub position: Position,
}

impl Placement {
    /// Creates a new placement.
    #[instrument]
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// A live move in the history.
///
/// `order` is a global sequence number assigned when the move is recorded.
/// It never repeats, and it is only ever compared between moves of the same
/// player to find the oldest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player who made the move.
    pub player: Player,
    /// The position the mark occupies.
    pub position: Position,
    /// Global sequence number.
    pub order: u64,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position, order: u64) -> Self {
        Self {
            player,
            position,
            order,
        }
    }

    /// Returns the placement this move recorded.
    pub fn placement(&self) -> Placement {
        Placement::new(self.player, self.position)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} -> {}", self.order, self.player, self.position.label())
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied by a live move.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game already has a winner.
    #[display("Game is already over ({} won)", _0)]
    GameOver(Player),

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// A cell index or number outside the board.
    #[display("Position {} is out of bounds", _0)]
    OutOfBounds(usize),

    /// Input that is not a cell number at all.
    #[display("Cannot read {:?} as a cell number", _0)]
    Unparsable(String),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
