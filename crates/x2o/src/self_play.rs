//! Heuristic-vs-heuristic batch runs.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, instrument};
use x2o_rules::{GameResult, GameSetup, HeuristicAi, MoveError, Player};

/// How one self-play game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEnd {
    /// A line was completed after `plies` placements.
    Won {
        /// The winner.
        winner: Player,
        /// Placements made, including the winning one.
        plies: u32,
    },
    /// Nobody won within the ply limit.
    Unfinished,
}

/// Aggregate results of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelfPlayReport {
    /// Games played.
    pub games: u32,
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Games that hit the ply limit.
    pub unfinished: u32,
    /// Fewest plies in a won game.
    pub shortest_win: Option<u32>,
    /// Most plies in a won game.
    pub longest_win: Option<u32>,
}

impl SelfPlayReport {
    fn record(&mut self, end: GameEnd) {
        self.games += 1;
        match end {
            GameEnd::Won { winner, plies } => {
                match winner {
                    Player::X => self.x_wins += 1,
                    Player::O => self.o_wins += 1,
                }
                self.shortest_win = Some(self.shortest_win.map_or(plies, |s| s.min(plies)));
                self.longest_win = Some(self.longest_win.map_or(plies, |l| l.max(plies)));
            }
            GameEnd::Unfinished => self.unfinished += 1,
        }
    }
}

/// Plays one game between two heuristics, X first.
#[instrument]
pub fn play_one(seed: u64, max_plies: u32) -> Result<GameEnd, MoveError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameSetup::new().start(Player::X);

    for ply in 1..=max_plies {
        let ai = HeuristicAi::new(game.to_move());
        let Some(position) = ai.select_move(&game.board(), game.history(), &mut rng) else {
            debug!(ply, "No move available");
            return Ok(GameEnd::Unfinished);
        };
        match game.place(position)? {
            GameResult::InProgress(next) => game = next,
            GameResult::Won(won) => {
                return Ok(GameEnd::Won {
                    winner: won.winner(),
                    plies: ply,
                });
            }
        }
    }

    Ok(GameEnd::Unfinished)
}

/// Plays `games` games; game `i` uses seed `seed + i`.
#[instrument]
pub fn run(games: u32, seed: u64, max_plies: u32) -> Result<SelfPlayReport, MoveError> {
    let mut report = SelfPlayReport::default();
    for i in 0..games {
        report.record(play_one(seed.wrapping_add(u64::from(i)), max_plies)?);
    }
    info!(
        games = report.games,
        x_wins = report.x_wins,
        o_wins = report.o_wins,
        unfinished = report.unfinished,
        "Self-play finished"
    );
    Ok(report)
}

impl std::fmt::Display for SelfPlayReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "games:      {}", self.games)?;
        writeln!(f, "X wins:     {}", self.x_wins)?;
        writeln!(f, "O wins:     {}", self.o_wins)?;
        writeln!(f, "unfinished: {}", self.unfinished)?;
        match (self.shortest_win, self.longest_win) {
            (Some(s), Some(l)) => write!(f, "win length: {}-{} plies", s, l),
            _ => write!(f, "win length: -"),
        }
    }
}
