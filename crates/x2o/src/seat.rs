//! Who fills each side of the board.

use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, instrument};
use x2o_rules::{GameInProgress, HeuristicAi, Position};

/// What a human typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Place on a cell.
    Place(Position),
    /// Leave the session.
    Quit,
    /// Unusable input, with the reason to show.
    Invalid(String),
}

impl Input {
    /// Parses one line of input: a cell number 1-9 or `q`.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            return Input::Quit;
        }
        match Position::from_cell_number(trimmed) {
            Ok(pos) => Input::Place(pos),
            Err(e) => Input::Invalid(e.to_string()),
        }
    }
}

/// A side of the board.
#[derive(Debug)]
pub enum Seat {
    /// Moves typed at the terminal.
    Human {
        /// Display name.
        name: String,
    },
    /// Moves chosen by the heuristic.
    Computer {
        /// Display name.
        name: String,
        /// The heuristic.
        ai: HeuristicAi,
        /// Source of the heuristic's random choices.
        rng: StdRng,
        /// Pause before answering so the human can see the board.
        delay: Duration,
    },
}

impl Seat {
    /// Creates a human seat.
    pub fn human(name: impl Into<String>) -> Self {
        Seat::Human { name: name.into() }
    }

    /// Creates a computer seat.
    pub fn computer(name: impl Into<String>, ai: HeuristicAi, rng: StdRng, delay: Duration) -> Self {
        Seat::Computer {
            name: name.into(),
            ai,
            rng,
            delay,
        }
    }

    /// Returns the seat's display name.
    pub fn name(&self) -> &str {
        match self {
            Seat::Human { name } | Seat::Computer { name, .. } => name,
        }
    }

    /// Returns true for human seats.
    pub fn is_human(&self) -> bool {
        matches!(self, Seat::Human { .. })
    }

    /// Asks the computer for a move; `None` for humans or a full board.
    #[instrument(skip(self, game), fields(seat = %self.name()))]
    pub fn computer_move(&mut self, game: &GameInProgress) -> Option<Position> {
        match self {
            Seat::Human { .. } => None,
            Seat::Computer { ai, rng, delay, .. } => {
                if !delay.is_zero() {
                    std::thread::sleep(*delay);
                }
                let choice = ai.select_move_with_reason(&game.board(), game.history(), rng);
                if let Some((position, reason)) = choice {
                    debug!(%position, %reason, "Computer chose");
                }
                choice.map(|(position, _)| position)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("5\n"), Input::Place(Position::Center));
        assert_eq!(Input::parse(" Q "), Input::Quit);
        assert!(matches!(Input::parse("0"), Input::Invalid(_)));
        assert!(matches!(Input::parse("middle"), Input::Invalid(_)));
    }
}
