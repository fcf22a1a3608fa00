//! Phase-specific typestate structs for a single game.
//!
//! `GameSetup` (not started) → `GameInProgress` → `GameWon`.
//! There is no draw phase: with three marks per player at most six cells
//! are ever occupied. A `GameWon` has no move method, so placing after a
//! win is a compile error rather than a runtime check.

use super::action::{Move, MoveError, Placement};
use super::contracts::{Contract, PlacementContract};
use super::history::MoveHistory;
use super::rules::{self, Win};
use super::{Board, Player, Position};
use tracing::{info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - no moves yet.
#[derive(Debug, Clone, Default)]
pub struct GameSetup;

impl GameSetup {
    /// Creates a new game in setup phase.
    pub fn new() -> Self {
        Self
    }

    /// Starts the game with the first player.
    #[instrument(skip(self))]
    pub fn start(self, first_player: Player) -> GameInProgress {
        GameInProgress {
            history: MoveHistory::new(),
            to_move: first_player,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - can accept placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInProgress {
    history: MoveHistory,
    to_move: Player,
}

impl GameInProgress {
    /// Resumes a game from an existing history.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] if the history already contains a win.
    pub fn resume(history: MoveHistory, to_move: Player) -> Result<Self, MoveError> {
        if let Some(win) = rules::calculate_winner(&history.board()) {
            return Err(MoveError::GameOver(win.player));
        }
        Ok(Self { history, to_move })
    }

    /// Makes a placement, consuming self and transitioning to the next state.
    ///
    /// Preconditions are always checked; postconditions in debug builds.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn make_move(self, action: Placement) -> Result<GameResult, MoveError> {
        PlacementContract::pre(&self, &action)?;

        let history = self.history.apply_move(action.player, action.position)?;

        if let Some(win) = rules::calculate_winner(&history.board()) {
            info!(winner = %win.player, line = ?win.indices(), "Game won");
            return Ok(GameResult::Won(GameWon { history, win }));
        }

        let next = GameInProgress {
            history,
            to_move: self.to_move.opponent(),
        };

        #[cfg(debug_assertions)]
        PlacementContract::post(&self, &next)?;

        Ok(GameResult::InProgress(next))
    }

    /// Places a mark for the player to move.
    pub fn place(self, position: Position) -> Result<GameResult, MoveError> {
        let action = Placement::new(self.to_move, position);
        self.make_move(action)
    }

    /// Returns the current player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the derived board.
    pub fn board(&self) -> Board {
        self.history.board()
    }

    /// Returns the move history.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Returns valid positions in ascending order.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board())
    }

    /// The mark that vanishes when the player to move places next.
    pub fn fading(&self) -> Option<Move> {
        self.history.oldest_move_of(self.to_move)
    }

    /// Replays alternating placements, X first.
    #[instrument]
    pub fn replay(positions: &[Position]) -> Result<GameResult, MoveError> {
        let mut game = GameSetup::new().start(Player::X);

        for &position in positions {
            match game.place(position)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Won(g) => return Ok(GameResult::Won(g)),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Won Phase
// ─────────────────────────────────────────────────────────────

/// Game won - the winning line is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameWon {
    history: MoveHistory,
    win: Win,
}

impl GameWon {
    /// Returns the winner.
    pub fn winner(&self) -> Player {
        self.win.player
    }

    /// Returns the winning line.
    pub fn line(&self) -> [Position; 3] {
        self.win.line
    }

    /// Returns the full win.
    pub fn win(&self) -> Win {
        self.win
    }

    /// Returns the derived board.
    pub fn board(&self) -> Board {
        self.history.board()
    }

    /// Returns the move history.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Restarts the game (consumes won, returns setup).
    pub fn restart(self) -> GameSetup {
        GameSetup::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game won.
    Won(GameWon),
}
