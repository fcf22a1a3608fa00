//! Shared multiplayer record.
//!
//! Remote play synchronizes one record per room through an external
//! pub/sub service. The record stores per-player position lists rather
//! than full moves; before any rule is applied the lists are rebuilt into
//! an ordered [`MoveHistory`], so local and remote play share one engine.

use super::action::MoveError;
use super::history::MoveHistory;
use super::invariants::{InvariantSet, X2oInvariants};
use super::rules::calculate_winner;
use super::{Board, Move, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Lifecycle of a shared room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Created, waiting for the second player to join.
    #[display("waiting")]
    Waiting,
    /// Both players present, moves accepted.
    #[display("playing")]
    Playing,
    /// A line was completed; only a rematch continues the room.
    #[display("won")]
    Won,
}

/// Error applying a change to a shared record.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RecordError {
    /// The room is not accepting moves.
    #[display("Room is not playing (status: {})", _0)]
    NotPlaying(RecordStatus),

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// The stored board does not match the position lists.
    #[display("Record is inconsistent: {}", _0)]
    Inconsistent(String),

    /// The engine rejected the move.
    #[display("{}", _0)]
    Move(MoveError),
}

impl std::error::Error for RecordError {}

impl From<MoveError> for RecordError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

/// The externally synchronized game row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedGameRecord {
    /// Cell owners in row-major order.
    pub board: [Option<Player>; 9],
    /// X's live positions, oldest first. Serialized as cell indices 0-8.
    #[serde(with = "cell_indices")]
    pub x_moves: Vec<Position>,
    /// O's live positions, oldest first. Serialized as cell indices 0-8.
    #[serde(with = "cell_indices")]
    pub o_moves: Vec<Position>,
    /// Player to move.
    pub current_player: Player,
    /// Room status.
    pub status: RecordStatus,
    /// Winner of the current round, if any.
    pub winner: Option<Player>,
    /// Rounds won by X in this room.
    pub x_score: u32,
    /// Rounds won by O in this room.
    pub o_score: u32,
}

impl SharedGameRecord {
    /// Creates a fresh room waiting for an opponent.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            x_moves: Vec::new(),
            o_moves: Vec::new(),
            current_player: Player::X,
            status: RecordStatus::Waiting,
            winner: None,
            x_score: 0,
            o_score: 0,
        }
    }

    /// Marks the room as playing once the opponent joins.
    pub fn begin(&mut self) {
        self.status = RecordStatus::Playing;
    }

    /// Rebuilds an ordered history from the position lists.
    ///
    /// List index is the per-player age. Orders are interleaved (X's i-th
    /// move gets `2i`, O's gets `2i + 1`) so they are unique and increase
    /// within each player; cross-player order is never compared.
    ///
    /// # Errors
    ///
    /// [`RecordError::Inconsistent`] if the lists violate a history invariant
    /// or disagree with the stored board.
    #[instrument(skip(self))]
    pub fn to_history(&self) -> Result<MoveHistory, RecordError> {
        let tagged = |player: Player, offset: u64, list: &[Position]| -> Vec<Move> {
            list.iter()
                .enumerate()
                .map(|(i, &pos)| Move::new(player, pos, 2 * i as u64 + offset))
                .collect()
        };
        let mut moves = tagged(Player::X, 0, &self.x_moves);
        moves.extend(tagged(Player::O, 1, &self.o_moves));
        moves.sort_by_key(|m| m.order);

        let next_order = moves.last().map_or(0, |m| m.order + 1);
        let history = MoveHistory::from_parts(moves, next_order);

        X2oInvariants::check_all(&history).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            RecordError::Inconsistent(descriptions)
        })?;

        if history.board().cells() != self.board {
            warn!("Stored board disagrees with move lists");
            return Err(RecordError::Inconsistent(
                "board does not match move lists".to_string(),
            ));
        }

        Ok(history)
    }

    /// Projects a history onto the record's board and position lists.
    ///
    /// Turn, status and scores are left untouched.
    pub fn sync_from_history(&mut self, history: &MoveHistory) {
        self.board = history.board().cells();
        self.x_moves = history.moves_of(Player::X).iter().map(|m| m.position).collect();
        self.o_moves = history.moves_of(Player::O).iter().map(|m| m.position).collect();
    }

    /// Builds a playing record from a history, with zero scores.
    pub fn from_history(history: &MoveHistory, current_player: Player) -> Self {
        let mut record = Self::new();
        record.sync_from_history(history);
        record.current_player = current_player;
        match calculate_winner(&history.board()) {
            Some(win) => {
                record.status = RecordStatus::Won;
                record.winner = Some(win.player);
            }
            None => record.status = RecordStatus::Playing,
        }
        record
    }

    /// The derived board.
    pub fn board(&self) -> Board {
        Board::from_cells(self.board)
    }

    /// The cell that vanishes on the current player's next placement.
    ///
    /// `None` (with a warning) if the record is inconsistent.
    pub fn fading(&self) -> Option<Position> {
        if self.status != RecordStatus::Playing {
            return None;
        }
        match self.to_history() {
            Ok(history) => history
                .oldest_move_of(self.current_player)
                .map(|m| m.position),
            Err(e) => {
                warn!(error = %e, "Cannot derive fading cell");
                None
            }
        }
    }

    /// Applies `player`'s placement and returns the updated record.
    ///
    /// On a win the status becomes [`RecordStatus::Won`] and the winner's
    /// score is incremented.
    #[instrument(skip(self), fields(status = %self.status, current = %self.current_player))]
    pub fn apply_move(&self, player: Player, position: Position) -> Result<Self, RecordError> {
        if self.status != RecordStatus::Playing {
            return Err(RecordError::NotPlaying(self.status));
        }
        if player != self.current_player {
            return Err(RecordError::WrongPlayer(player));
        }

        let history = self.to_history()?.apply_move(player, position)?;

        let mut next = self.clone();
        next.sync_from_history(&history);
        next.current_player = player.opponent();

        if let Some(win) = calculate_winner(&history.board()) {
            info!(winner = %win.player, "Round won");
            next.status = RecordStatus::Won;
            next.winner = Some(win.player);
            match win.player {
                Player::X => next.x_score += 1,
                Player::O => next.o_score += 1,
            }
        }

        Ok(next)
    }

    /// Starts another round in the same room, keeping scores.
    #[instrument(skip(self))]
    pub fn rematch(&self) -> Self {
        Self {
            status: RecordStatus::Playing,
            x_score: self.x_score,
            o_score: self.o_score,
            ..Self::new()
        }
    }
}

/// Position lists as row-major cell indices.
mod cell_indices {
    use crate::Position;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(positions: &[Position], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(positions.iter().map(|p| p.to_index()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Position>, D::Error> {
        Vec::<usize>::deserialize(deserializer)?
            .into_iter()
            .map(|idx| Position::try_from(idx).map_err(D::Error::custom))
            .collect()
    }
}

impl Default for SharedGameRecord {
    fn default() -> Self {
        Self::new()
    }
}
