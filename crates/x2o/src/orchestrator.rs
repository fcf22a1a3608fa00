//! Game orchestration between two seats over a text console.

use crate::seat::{Input, Seat};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};
use x2o_rules::{
    GameInProgress, GameResult, GameSetup, GameWon, MAX_SYMBOLS_PER_PLAYER, Player,
};

/// Rounds won per side across a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    /// Rounds won by X.
    pub x: u32,
    /// Rounds won by O.
    pub o: u32,
}

impl Scoreboard {
    /// Credits a round to `player`.
    pub fn record(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A line was completed.
    Won(Player),
    /// A human quit mid-round, or the computer had no move.
    Abandoned,
}

/// Runs rounds between two seats, reading from `input` and writing to `output`.
#[derive(Debug, derive_new::new)]
pub struct Orchestrator<R, W> {
    seat_x: Seat,
    seat_o: Seat,
    first_player: Player,
    input: R,
    output: W,
    #[new(default)]
    scores: Scoreboard,
}

impl<R: BufRead, W: Write> Orchestrator<R, W> {
    /// Current scores.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Consumes the orchestrator, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays rounds until a human quits or input ends.
    ///
    /// Every round, rematches included, starts with the configured first player.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<Scoreboard> {
        info!(x = %self.seat_x.name(), o = %self.seat_o.name(), "Starting session");
        loop {
            match self.play_round(self.first_player)? {
                RoundOutcome::Abandoned => break,
                RoundOutcome::Won(winner) => {
                    self.scores.record(winner);
                    self.write_scores()?;
                    if !self.ask_rematch()? {
                        break;
                    }
                }
            }
        }

        writeln!(self.output, "Thanks for playing.")?;
        Ok(self.scores)
    }

    /// Plays a single round starting with `first`.
    #[instrument(skip(self))]
    pub fn play_round(&mut self, first: Player) -> Result<RoundOutcome> {
        let mut game = GameSetup::new().start(first);

        loop {
            self.render(&game)?;

            let to_move = game.to_move();
            let position = if self.seat(to_move).is_human() {
                match self.read_command(to_move)? {
                    Input::Place(pos) => pos,
                    Input::Quit => return Ok(RoundOutcome::Abandoned),
                    Input::Invalid(reason) => {
                        writeln!(self.output, "{}", reason)?;
                        continue;
                    }
                }
            } else {
                let Some(pos) = self.seat_mut(to_move).computer_move(&game) else {
                    writeln!(self.output, "No cell left to play.")?;
                    return Ok(RoundOutcome::Abandoned);
                };
                let name = self.seat(to_move).name().to_string();
                writeln!(self.output, "{} plays {}.", name, pos.cell_number())?;
                pos
            };

            if !game.board().is_empty(position) {
                writeln!(self.output, "Cell {} is taken.", position.cell_number())?;
                continue;
            }

            match game.place(position).context("Applying a validated move")? {
                GameResult::InProgress(next) => game = next,
                GameResult::Won(won) => {
                    self.render_won(&won)?;
                    return Ok(RoundOutcome::Won(won.winner()));
                }
            }
        }
    }

    fn seat(&self, player: Player) -> &Seat {
        match player {
            Player::X => &self.seat_x,
            Player::O => &self.seat_o,
        }
    }

    fn seat_mut(&mut self, player: Player) -> &mut Seat {
        match player {
            Player::X => &mut self.seat_x,
            Player::O => &mut self.seat_o,
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Reading input")?;
        Ok((read > 0).then_some(line))
    }

    fn read_command(&mut self, player: Player) -> Result<Input> {
        let name = self.seat(player).name().to_string();
        write!(self.output, "{} ({}) > ", name, player)?;
        self.output.flush()?;
        match self.read_line()? {
            Some(line) => Ok(Input::parse(&line)),
            None => {
                debug!("Input closed");
                Ok(Input::Quit)
            }
        }
    }

    fn ask_rematch(&mut self) -> Result<bool> {
        loop {
            write!(self.output, "r = rematch, q = quit > ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "r" | "rematch" => return Ok(true),
                "q" | "quit" => return Ok(false),
                _ => continue,
            }
        }
    }

    fn render(&mut self, game: &GameInProgress) -> Result<()> {
        let history = game.history();
        writeln!(self.output)?;
        writeln!(self.output, "{}", game.board().display())?;
        writeln!(
            self.output,
            "X {}/{}  O {}/{}",
            history.live_count(Player::X),
            MAX_SYMBOLS_PER_PLAYER,
            history.live_count(Player::O),
            MAX_SYMBOLS_PER_PLAYER,
        )?;
        match game.fading() {
            Some(oldest) => writeln!(
                self.output,
                "{}'s turn - cell {} fades on this move",
                game.to_move(),
                oldest.position.cell_number()
            )?,
            None => writeln!(self.output, "{}'s turn", game.to_move())?,
        }
        Ok(())
    }

    fn render_won(&mut self, won: &GameWon) -> Result<()> {
        let cells: Vec<String> = won
            .line()
            .iter()
            .map(|p| p.cell_number().to_string())
            .collect();
        let name = self.seat(won.winner()).name().to_string();
        writeln!(self.output)?;
        writeln!(self.output, "{}", won.board().display())?;
        writeln!(self.output, "{} WINS! ({} via {})", won.winner(), name, cells.join("-"))?;
        Ok(())
    }

    fn write_scores(&mut self) -> Result<()> {
        writeln!(self.output, "Score: X {} - O {}", self.scores.x, self.scores.o)?;
        Ok(())
    }
}
