//! Cell positions on the 3x3 board.

use super::action::MoveError;
use super::types::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A position on the board (row-major index 0-8).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// The four corner positions.
    pub const CORNERS: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses a 1-based cell number ("1" to "9") as typed by a player.
    #[instrument]
    pub fn from_cell_number(s: &str) -> Result<Self, MoveError> {
        let num: usize = s
            .trim()
            .parse()
            .map_err(|_| MoveError::Unparsable(s.trim().to_string()))?;
        num.checked_sub(1)
            .and_then(Self::from_index)
            .ok_or(MoveError::OutOfBounds(num))
    }

    /// 1-based cell number, the inverse of [`Position::from_cell_number`].
    pub fn cell_number(self) -> usize {
        self.to_index() + 1
    }

    /// Returns true for the four corners.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// Filters positions by board state - returns only empty squares,
    /// in ascending index order.
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::ALL
            .iter()
            .copied()
            .filter(|pos| board.is_empty(*pos))
            .collect()
    }
}

impl TryFrom<usize> for Position {
    type Error = MoveError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(MoveError::OutOfBounds(index))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_index_matches_enum_order() {
        for (i, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), i);
            assert_eq!(Position::from_index(i), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(Position::try_from(4), Ok(Position::Center));
        assert_eq!(Position::try_from(9), Err(MoveError::OutOfBounds(9)));
    }

    #[test]
    fn test_cell_number_parsing() {
        assert_eq!(Position::from_cell_number("1"), Ok(Position::TopLeft));
        assert_eq!(Position::from_cell_number(" 9 "), Ok(Position::BottomRight));
        assert_eq!(Position::from_cell_number("0"), Err(MoveError::OutOfBounds(0)));
        assert_eq!(Position::from_cell_number("10"), Err(MoveError::OutOfBounds(10)));
        assert!(matches!(
            Position::from_cell_number("centre"),
            Err(MoveError::Unparsable(_))
        ));
    }

    #[test]
    fn test_corners() {
        let corners: Vec<usize> = Position::CORNERS.iter().map(|p| p.to_index()).collect();
        assert_eq!(corners, vec![0, 2, 6, 8]);
        assert!(!Position::Center.is_corner());
    }
}
