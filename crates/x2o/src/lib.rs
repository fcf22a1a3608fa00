//! Terminal driver for infinite-mode tic-tac-toe.
//!
//! # Architecture
//!
//! - **Config**: `x2o.toml` / `$X2O_CONFIG`, overridden by CLI flags
//! - **Seats**: human (typed cells) or computer ([`x2o_rules::HeuristicAi`])
//! - **Orchestrator**: round loop, scores, rematches
//! - **Self-play / replay**: batch statistics and move-list replays

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod orchestrator;
pub mod replay;
pub mod seat;
pub mod self_play;

pub use config::{ConfigError, Mode, PlayConfig};
pub use orchestrator::{Orchestrator, RoundOutcome, Scoreboard};
pub use replay::{ReplayReport, replay};
pub use seat::{Input, Seat};
pub use self_play::{GameEnd, SelfPlayReport};
