//! x2o - infinite-mode tic-tac-toe in the terminal.

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use x2o::cli::{Cli, Command};
use x2o::{Mode, Orchestrator, PlayConfig, Seat, self_play};
use x2o_rules::{HeuristicAi, Player};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            mode,
            first,
            seed,
            ai_delay_ms,
            config,
        } => {
            let config = PlayConfig::load(config.as_deref())?.with_overrides(
                mode,
                first.map(Player::from),
                seed,
                ai_delay_ms,
            );
            run_play(config)
        }
        Command::SelfPlay {
            games,
            seed,
            max_turns,
            json,
        } => run_self_play(games, seed, max_turns, json),
        Command::Replay { cells } => run_replay(&cells),
    }
}

/// Play rounds in the terminal until the user quits
#[instrument]
fn run_play(config: PlayConfig) -> Result<()> {
    info!(mode = %config.mode(), "Starting play session");

    let rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_entropy(),
    };

    let (seat_x, seat_o) = match config.mode() {
        Mode::Computer => (
            Seat::human("You"),
            Seat::computer(
                "Computer",
                HeuristicAi::new(Player::O),
                rng,
                Duration::from_millis(*config.ai_delay_ms()),
            ),
        ),
        Mode::Hotseat => (Seat::human("Player 1"), Seat::human("Player 2")),
    };

    println!("X2O - each player keeps at most three marks; a fourth removes the oldest.");
    println!("Type a cell number 1-9, or q to quit.");

    let mut orchestrator = Orchestrator::new(
        seat_x,
        seat_o,
        *config.first_player(),
        std::io::stdin().lock(),
        std::io::stdout().lock(),
    );
    let scores = orchestrator.run()?;
    info!(x = scores.x, o = scores.o, "Session over");
    Ok(())
}

/// Run heuristic-vs-heuristic games and print the report
#[instrument]
fn run_self_play(games: u32, seed: u64, max_turns: u32, json: bool) -> Result<()> {
    let report = self_play::run(games, seed, max_turns)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

/// Replay a move list and print the final board and record
#[instrument]
fn run_replay(cells: &str) -> Result<()> {
    let report = x2o::replay(cells)?;
    println!("{}", report.record.board().display());
    match report.winner() {
        Some(winner) => println!("{} wins", winner),
        None => println!("{} to move", report.record.current_player),
    }
    if !report.ignored.is_empty() {
        println!("ignored after the win: {:?}", report.ignored);
    }
    println!("{}", serde_json::to_string_pretty(&report.record)?);
    Ok(())
}
