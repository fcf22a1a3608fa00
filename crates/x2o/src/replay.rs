//! Replays a typed move list through the shared record.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::instrument;
use x2o_rules::{Player, Position, RecordStatus, SharedGameRecord};

/// Result of a replay.
#[derive(Debug, Clone, Serialize, derive_new::new)]
pub struct ReplayReport {
    /// Final record, as it would be synchronized to a remote peer.
    pub record: SharedGameRecord,
    /// Cells left unplayed because the round was already won.
    pub ignored: Vec<usize>,
}

impl ReplayReport {
    /// The winner, if the replay ended in a win.
    pub fn winner(&self) -> Option<Player> {
        self.record.winner
    }
}

/// Replays comma- or space-separated 1-based cells, X first.
///
/// Cells after a win are reported as ignored rather than rejected.
#[instrument]
pub fn replay(cells: &str) -> Result<ReplayReport> {
    let positions = cells
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| Position::from_cell_number(s).with_context(|| format!("Bad cell {:?}", s)))
        .collect::<Result<Vec<_>>>()?;

    let mut record = SharedGameRecord::new();
    record.begin();
    let mut ignored = Vec::new();

    for position in positions {
        if record.status == RecordStatus::Won {
            ignored.push(position.cell_number());
            continue;
        }
        record = record
            .apply_move(record.current_player, position)
            .with_context(|| format!("Cell {} cannot be played", position.cell_number()))?;
    }

    Ok(ReplayReport::new(record, ignored))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_win_and_ignored_tail() {
        let report = replay("1,4,2,5,3,9").expect("valid cells");
        assert_eq!(report.winner(), Some(Player::X));
        assert_eq!(report.record.x_score, 1);
        assert_eq!(report.ignored, vec![9]);
    }

    #[test]
    fn test_replay_rejects_taken_cell() {
        let err = replay("5 5").expect_err("cell 5 is taken");
        assert!(format!("{:#}", err).contains("already occupied"));
    }

    #[test]
    fn test_replay_rejects_garbage() {
        assert!(replay("1,x").is_err());
    }
}
