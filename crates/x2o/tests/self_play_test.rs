//! Tests for heuristic self-play.

use x2o::GameEnd;
use x2o::self_play::{play_one, run};

#[test]
fn test_report_counts_add_up() {
    let report = run(25, 11, 120).expect("self-play runs");
    assert_eq!(report.games, 25);
    assert_eq!(report.x_wins + report.o_wins + report.unfinished, 25);
    if let (Some(shortest), Some(longest)) = (report.shortest_win, report.longest_win) {
        assert!(shortest >= 5);
        assert!(shortest <= longest);
    }
}

#[test]
fn test_seeded_games_repeat() {
    for seed in 0..10 {
        assert_eq!(play_one(seed, 150).expect("runs"), play_one(seed, 150).expect("runs"));
    }
}

#[test]
fn test_ply_limit_marks_unfinished() {
    // Nobody can complete a line in four placements.
    assert_eq!(play_one(1, 4).expect("runs"), GameEnd::Unfinished);
}

#[test]
fn test_json_report_shape() {
    let report = run(3, 0, 50).expect("self-play runs");
    let json = serde_json::to_value(&report).expect("serializable");
    assert_eq!(json["games"], 3);
    assert!(json.get("x_wins").is_some());
}
