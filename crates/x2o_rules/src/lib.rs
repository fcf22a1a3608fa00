//! Rule engine and heuristic opponent for infinite-mode tic-tac-toe.
//!
//! Each player may have at most three marks on the board. Placing a fourth
//! removes that player's oldest surviving mark, so the board never fills up
//! and a game only ends when someone completes a line.
//!
//! # Architecture
//!
//! - **History**: the append log of live moves is the only source of truth;
//!   [`MoveHistory::apply_move`] returns the next log.
//! - **Rules**: board derivation, win detection and the eviction rule.
//! - **Typestate**: [`GameSetup`] → [`GameInProgress`] → [`GameWon`].
//! - **AI**: [`HeuristicAi`] picks win, block, center, corner, then any cell.
//! - **Record**: [`SharedGameRecord`] is the row synchronized for remote play.
//!
//! # Example
//!
//! ```
//! use x2o_rules::{GameResult, GameSetup, HeuristicAi, Player, Position};
//! use rand::SeedableRng;
//!
//! let game = GameSetup::new().start(Player::X);
//! let GameResult::InProgress(game) = game.place(Position::TopLeft)? else {
//!     unreachable!("one mark cannot win");
//! };
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let reply = HeuristicAi::default().select_move(&game.board(), game.history(), &mut rng);
//! assert_eq!(reply, Some(Position::Center));
//! # Ok::<(), x2o_rules::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod ai;
mod contracts;
mod history;
mod invariants;
mod position;
mod record;
mod rules;
mod typestate;
mod types;

pub use action::{Move, MoveError, Placement};
pub use ai::{HeuristicAi, Reason, select_move};
pub use contracts::{Contract, LegalPlacement, PlacementContract, PlayersTurn, SquareIsEmpty};
pub use history::{MoveHistory, apply_move, derive_board, oldest_move_of};
pub use invariants::{
    CapacityInvariant, Invariant, InvariantSet, InvariantViolation, MonotonicOrderInvariant,
    UniqueLivePositionsInvariant, X2oInvariants,
};
pub use position::Position;
pub use record::{RecordError, RecordStatus, SharedGameRecord};
pub use rules::{
    MAX_SYMBOLS_PER_PLAYER, WINNING_LINES, Win, calculate_winner, eviction_target,
    winning_line_for,
};
pub use typestate::{GameInProgress, GameResult, GameSetup, GameWon};
pub use types::{Board, Player, Square};
