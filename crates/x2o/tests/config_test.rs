//! Tests for play configuration loading.

use std::io::Write;
use x2o::{Mode, PlayConfig};
use x2o_rules::Player;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_partial_file_uses_defaults() {
    let file = write_config("mode = \"hotseat\"\nfirst_player = \"O\"\n");
    let config = PlayConfig::from_file(file.path()).expect("valid config");
    assert_eq!(*config.mode(), Mode::Hotseat);
    assert_eq!(*config.first_player(), Player::O);
    assert_eq!(*config.ai_delay_ms(), 500);
    assert_eq!(*config.seed(), None);
}

#[test]
fn test_invalid_file_reports_parse_error() {
    let file = write_config("mode = \"tournament\"\n");
    let err = PlayConfig::from_file(file.path()).expect_err("unknown mode");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.toml");
    let err = PlayConfig::load(Some(missing.as_path())).expect_err("missing file");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_overrides_win_over_file() {
    let file = write_config("mode = \"hotseat\"\nseed = 7\nai_delay_ms = 0\n");
    let config = PlayConfig::load(Some(file.path()))
        .expect("valid config")
        .with_overrides(Some(Mode::Computer), None, None, Some(250));
    assert_eq!(*config.mode(), Mode::Computer);
    assert_eq!(*config.seed(), Some(7));
    assert_eq!(*config.ai_delay_ms(), 250);
    assert_eq!(*config.first_player(), Player::X);
}
