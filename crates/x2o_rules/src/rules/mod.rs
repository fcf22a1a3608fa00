//! Game rules for infinite-mode tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state.
//! Rules are separated from history storage so that the engine and the
//! AI's lookahead share exactly the same definitions.

pub mod capacity;
pub mod win;

pub use capacity::{MAX_SYMBOLS_PER_PLAYER, eviction_target, oldest_of};
pub use win::{WINNING_LINES, Win, calculate_winner, winning_line_for};
