//! Contract-based validation for placements.
//!
//! Contracts define correctness through preconditions and postconditions,
//! Hoare-style: {P} action {Q}.

use super::action::{MoveError, Placement};
use super::invariants::{InvariantSet, X2oInvariants};
use super::typestate::GameInProgress;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the target square holds no live move.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Checks the precondition.
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &GameInProgress) -> Result<(), MoveError> {
        if !game.board().is_empty(placement.position) {
            Err(MoveError::SquareOccupied(placement.position))
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the precondition.
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &GameInProgress) -> Result<(), MoveError> {
        if placement.player != game.to_move() {
            Err(MoveError::WrongPlayer(placement.player))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: the square is empty and it's the player's turn.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement.
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &GameInProgress) -> Result<(), MoveError> {
        SquareIsEmpty::check(placement, game)?;
        PlayersTurn::check(placement, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placements.
///
/// Preconditions:
/// - Square must be empty
/// - Must be player's turn
///
/// Postconditions:
/// - Capacity, unique live positions and monotonic order still hold
/// - Exactly one new move was recorded
pub struct PlacementContract;

impl Contract<GameInProgress, Placement> for PlacementContract {
    fn pre(game: &GameInProgress, action: &Placement) -> Result<(), MoveError> {
        LegalPlacement::check(action, game)
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), MoveError> {
        X2oInvariants::check_all(after.history()).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        if after.history().next_order() != before.history().next_order() + 1 {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: exactly one move must be recorded".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameResult, GameSetup, Player, Position};

    #[test]
    fn test_precondition_empty_square() {
        let game = GameSetup::new().start(Player::X);
        let action = Placement::new(Player::X, Position::Center);
        assert!(PlacementContract::pre(&game, &action).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let game = GameSetup::new().start(Player::X);
        let Ok(GameResult::InProgress(game)) = game.place(Position::Center) else {
            panic!("Expected in-progress game");
        };
        let action = Placement::new(Player::O, Position::Center);
        assert!(matches!(
            PlacementContract::pre(&game, &action),
            Err(MoveError::SquareOccupied(Position::Center))
        ));
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = GameSetup::new().start(Player::X);
        let action = Placement::new(Player::O, Position::Center);
        assert!(matches!(
            PlacementContract::pre(&game, &action),
            Err(MoveError::WrongPlayer(Player::O))
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let game = GameSetup::new().start(Player::X);
        let Ok(GameResult::InProgress(after)) = game.clone().place(Position::Center) else {
            panic!("Expected in-progress game");
        };
        assert!(PlacementContract::post(&game, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_move() {
        let game = GameSetup::new().start(Player::X);
        assert!(PlacementContract::post(&game, &game).is_err());
    }
}
