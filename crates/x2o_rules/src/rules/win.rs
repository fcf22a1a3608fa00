//! Win detection.

use super::super::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The 8 winning lines, in the order they are checked.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Win {
    /// Owner of the line.
    pub player: Player,
    /// The three positions of the line.
    pub line: [Position; 3],
}

impl Win {
    /// The line as board indices.
    pub fn indices(&self) -> [usize; 3] {
        self.line.map(Position::to_index)
    }
}

/// Returns the first complete line in [`WINNING_LINES`] order, if any.
#[instrument(skip(board))]
pub fn calculate_winner(board: &Board) -> Option<Win> {
    WINNING_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match board.get(a) {
            Square::Occupied(player) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
                Some(Win { player, line })
            }
            _ => None,
        }
    })
}

/// Returns the first complete line owned by `player`, ignoring the opponent.
pub fn winning_line_for(board: &Board, player: Player) -> Option<[Position; 3]> {
    let mark = Square::Occupied(player);
    WINNING_LINES
        .iter()
        .copied()
        .find(|line| line.iter().all(|&pos| board.get(pos) == mark))
}
