//! Tests for the typestate game lifecycle.

use x2o_rules::{GameInProgress, GameResult, GameSetup, MoveError, Placement, Player, Position};

#[test]
fn test_typestate_lifecycle() {
    let game = GameSetup::new().start(Player::X);
    assert_eq!(game.to_move(), Player::X);

    let result = game
        .make_move(Placement::new(Player::X, Position::Center))
        .expect("Valid move");
    let GameResult::InProgress(game) = result else {
        panic!("Game shouldn't finish after one move");
    };
    assert_eq!(game.to_move(), Player::O);
    assert_eq!(game.valid_moves().len(), 8);
}

#[test]
fn test_contracts_prevent_invalid_moves() {
    let GameResult::InProgress(game) = GameSetup::new()
        .start(Player::X)
        .place(Position::Center)
        .expect("Valid move")
    else {
        panic!("Unexpected finish");
    };

    let result = game.make_move(Placement::new(Player::O, Position::Center));
    assert!(matches!(result, Err(MoveError::SquareOccupied(_))));
}

#[test]
fn test_wrong_player_rejected() {
    let game = GameSetup::new().start(Player::X);
    let result = game.make_move(Placement::new(Player::O, Position::Center));
    assert!(matches!(result, Err(MoveError::WrongPlayer(Player::O))));
}

#[test]
fn test_win_reports_line() {
    let result = GameInProgress::replay(&[
        Position::TopLeft,
        Position::MiddleLeft,
        Position::TopCenter,
        Position::Center,
        Position::TopRight,
    ])
    .expect("Valid moves");

    match result {
        GameResult::Won(won) => {
            assert_eq!(won.winner(), Player::X);
            assert_eq!(
                won.line(),
                [Position::TopLeft, Position::TopCenter, Position::TopRight]
            );
            assert_eq!(won.history().len(), 5);
        }
        GameResult::InProgress(_) => panic!("Should have won"),
    }
}

#[test]
fn test_win_after_eviction() {
    // X: 0, 4, 8 would be a diagonal, but X's fourth mark evicts 0 first.
    // Sequence: X0 O1 X4 O2 X6 O7 X8 (evicts 0) -> no diagonal.
    let result = GameInProgress::replay(&[
        Position::TopLeft,
        Position::TopCenter,
        Position::Center,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ])
    .expect("Valid moves");
    let GameResult::InProgress(game) = result else {
        panic!("The evicted mark must not count toward a line");
    };
    assert!(game.board().is_empty(Position::TopLeft));
    assert_eq!(game.history().live_count(Player::X), 3);
}

#[test]
fn test_restart_after_win() {
    let Ok(GameResult::Won(won)) = GameInProgress::replay(&[
        Position::Center,
        Position::TopLeft,
        Position::TopRight,
        Position::TopCenter,
        Position::BottomLeft,
    ]) else {
        panic!("Expected X to win the anti-diagonal");
    };
    assert_eq!(won.line().map(Position::to_index), [2, 4, 6]);

    let game = won.restart().start(Player::O);
    assert!(game.history().is_empty());
    assert_eq!(game.to_move(), Player::O);
}
