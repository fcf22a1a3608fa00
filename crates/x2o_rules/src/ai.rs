//! Heuristic computer opponent.
//!
//! Priority order, first match wins: win now, block, center, random
//! corner, random empty cell. Lookahead uses the same evict-then-place rule
//! as real play, so a line that only exists because the mover's oldest mark
//! survives is never counted.

use super::history::MoveHistory;
use super::rules::winning_line_for;
use super::{Board, Player, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which branch of the heuristic produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Reason {
    /// Completes one of the computer's lines.
    #[display("win")]
    Win,
    /// Occupies the cell the opponent would win with.
    #[display("block")]
    Block,
    /// Takes the center.
    #[display("center")]
    Center,
    /// Takes a random empty corner.
    #[display("corner")]
    Corner,
    /// Takes any random empty cell.
    #[display("any")]
    Any,
}

/// Fixed-priority heuristic player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicAi {
    player: Player,
}

impl HeuristicAi {
    /// Creates a heuristic playing `player`.
    pub fn new(player: Player) -> Self {
        Self { player }
    }

    /// The side this heuristic plays.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Selects the next cell, or `None` when the board has no empty cell.
    ///
    /// `board` must be the board derived from `history`.
    pub fn select_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        history: &MoveHistory,
        rng: &mut R,
    ) -> Option<Position> {
        self.select_move_with_reason(board, history, rng)
            .map(|(position, _)| position)
    }

    /// Like [`HeuristicAi::select_move`], also reporting which rule fired.
    #[instrument(skip(self, board, history, rng), fields(player = %self.player))]
    pub fn select_move_with_reason<R: Rng + ?Sized>(
        &self,
        board: &Board,
        history: &MoveHistory,
        rng: &mut R,
    ) -> Option<(Position, Reason)> {
        let empty = board.empty_positions();
        if empty.is_empty() {
            debug!("No empty cell to play");
            return None;
        }

        let opponent = self.player.opponent();
        let choice = empty
            .iter()
            .copied()
            .find(|&pos| completes_line(board, history, self.player, pos))
            .map(|pos| (pos, Reason::Win))
            .or_else(|| {
                empty
                    .iter()
                    .copied()
                    .find(|&pos| completes_line(board, history, opponent, pos))
                    .map(|pos| (pos, Reason::Block))
            })
            .or_else(|| {
                board
                    .is_empty(Position::Center)
                    .then_some((Position::Center, Reason::Center))
            })
            .or_else(|| {
                let corners: Vec<Position> = empty.iter().copied().filter(|p| p.is_corner()).collect();
                corners.choose(&mut *rng).map(|&pos| (pos, Reason::Corner))
            })
            .or_else(|| empty.choose(&mut *rng).map(|&pos| (pos, Reason::Any)));

        if let Some((position, reason)) = choice {
            debug!(%position, %reason, "Selected move");
        }
        choice
    }
}

impl Default for HeuristicAi {
    fn default() -> Self {
        Self::new(Player::O)
    }
}

/// Would `player` own a complete line after placing at `position`?
///
/// Simulates the real rule: if `player` is at capacity their oldest mark is
/// cleared first.
fn completes_line(board: &Board, history: &MoveHistory, player: Player, position: Position) -> bool {
    let evicted = history.eviction_for(player).map(|m| m.position);
    let simulated = board.evict_and_place(evicted, player, position);
    winning_line_for(&simulated, player).is_some()
}

/// Selects the next cell for the computer (`O`).
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    history: &MoveHistory,
    rng: &mut R,
) -> Option<Position> {
    HeuristicAi::default().select_move(board, history, rng)
}
