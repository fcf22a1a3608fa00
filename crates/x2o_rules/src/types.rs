//! Core domain types for infinite-mode tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second, and is the default computer side).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Single-character symbol used on the rendered board.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the owning player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

impl From<Option<Player>> for Square {
    fn from(value: Option<Player>) -> Self {
        value.map_or(Square::Empty, Square::Occupied)
    }
}

/// 3x3 board.
///
/// The board is a projection of a [`MoveHistory`](crate::MoveHistory): the
/// engine always rebuilds it from the live moves and never treats it as
/// ground truth.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from per-cell owners in row-major order.
    pub fn from_cells(cells: [Option<Player>; 9]) -> Self {
        Self {
            squares: cells.map(Square::from),
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns per-cell owners in row-major order.
    pub fn cells(&self) -> [Option<Player>; 9] {
        self.squares.map(Square::player)
    }

    /// Empty positions in ascending index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Number of cells owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Clears `evicted` (if any), then marks `position` for `player`.
    ///
    /// This is the board half of the evict-then-place rule. The AI's
    /// lookahead calls it directly; [`MoveHistory::apply_move`](crate::MoveHistory::apply_move)
    /// checks its own result against it in debug builds.
    #[instrument(skip(self))]
    pub fn evict_and_place(
        &self,
        evicted: Option<Position>,
        player: Player,
        position: Position,
    ) -> Board {
        let mut next = self.clone();
        if let Some(evicted) = evicted {
            next.set(evicted, Square::Empty);
        }
        next.set(position, Square::Occupied(player));
        next
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based cell number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.symbol().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
