//! Command-line interface for x2o.

use crate::config::Mode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use x2o_rules::Player;

/// X2O - tic-tac-toe where every player keeps at most three marks
#[derive(Parser, Debug)]
#[command(name = "x2o")]
#[command(about = "Infinite-mode tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Side selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// X
    X,
    /// O
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal against the computer or a second human
    Play {
        /// Opponent mode (overrides the config file)
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,

        /// Who moves first in the first round (overrides the config file)
        #[arg(long, value_enum)]
        first: Option<Side>,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Pause before each computer move, in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,

        /// Path to a TOML config file (defaults to $X2O_CONFIG, then ./x2o.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run heuristic-vs-heuristic games and report the results
    SelfPlay {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Base seed; game i uses seed + i
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Plies after which a game counts as unfinished
        #[arg(long, default_value = "200")]
        max_turns: u32,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay comma-separated cells (1-9), X first, and print the result
    Replay {
        /// Cells in play order, e.g. "1,5,2,9,3"
        cells: String,
    },
}
