//! Tests for the heuristic opponent through the public API.

use rand::SeedableRng;
use rand::rngs::StdRng;
use x2o_rules::{
    GameInProgress, GameResult, GameSetup, HeuristicAi, MoveHistory, Placement, Player, Position,
    select_move,
};

fn history_of(cells: &[(Player, usize)]) -> MoveHistory {
    let placements: Vec<Placement> = cells
        .iter()
        .map(|&(player, idx)| Placement::new(player, Position::try_from(idx).expect("valid index")))
        .collect();
    MoveHistory::replay(&placements).expect("legal history")
}

fn ai_move(history: &MoveHistory) -> Option<usize> {
    let mut rng = StdRng::seed_from_u64(42);
    select_move(&history.board(), history, &mut rng).map(Position::to_index)
}

#[test]
fn test_empty_board_center() {
    assert_eq!(ai_move(&MoveHistory::new()), Some(4));
}

#[test]
fn test_win_now_over_block() {
    let history = history_of(&[(Player::O, 0), (Player::O, 1), (Player::X, 3), (Player::X, 4)]);
    assert_eq!(ai_move(&history), Some(2));
}

#[test]
fn test_block_row() {
    let history = history_of(&[(Player::X, 3), (Player::X, 4)]);
    assert_eq!(ai_move(&history), Some(5));
}

#[test]
fn test_ai_can_play_x() {
    let history = history_of(&[(Player::X, 0), (Player::X, 1), (Player::O, 4)]);
    let mut rng = StdRng::seed_from_u64(0);
    let ai = HeuristicAi::new(Player::X);
    assert_eq!(ai.select_move(&history.board(), &history, &mut rng), Some(Position::TopRight));
}

#[test]
fn test_same_seed_same_game() {
    fn self_play(seed: u64) -> Vec<Position> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameSetup::new().start(Player::X);
        let mut played = Vec::new();
        for _ in 0..40 {
            let ai = HeuristicAi::new(game.to_move());
            let Some(pos) = ai.select_move(&game.board(), game.history(), &mut rng) else {
                break;
            };
            played.push(pos);
            match game.place(pos).expect("AI moves are legal") {
                GameResult::InProgress(next) => game = next,
                GameResult::Won(_) => break,
            }
        }
        played
    }

    for seed in 0..10 {
        assert_eq!(self_play(seed), self_play(seed));
    }
}

#[test]
fn test_ai_moves_are_always_legal() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..50 {
        let mut game: GameInProgress = GameSetup::new().start(Player::X);
        for _ in 0..30 {
            let ai = HeuristicAi::new(game.to_move());
            let pos = ai
                .select_move(&game.board(), game.history(), &mut rng)
                .expect("a cell is always free");
            assert!(game.board().is_empty(pos));
            match game.place(pos).expect("legal") {
                GameResult::InProgress(next) => game = next,
                GameResult::Won(_) => break,
            }
        }
    }
}
