//! Play configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use x2o_rules::Player;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "X2O_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "x2o.toml";

/// Who controls the second seat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Human plays X, the heuristic plays O.
    Computer,
    /// Two humans share the terminal.
    Hotseat,
}

/// Settings for `x2o play`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Opponent mode.
    #[serde(default = "default_mode")]
    mode: Mode,

    /// Who moves first in the first round.
    #[serde(default = "default_first_player")]
    first_player: Player,

    /// Pause before each computer move.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Seed for the computer's random choices; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_mode() -> Mode {
    Mode::Computer
}

fn default_first_player() -> Player {
    Player::X
}

fn default_ai_delay_ms() -> u64 {
    500
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            first_player: default_first_player(),
            ai_delay_ms: default_ai_delay_ms(),
            seed: None,
        }
    }
}

impl PlayConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the config file: explicit path, then `$X2O_CONFIG`, then
    /// `./x2o.toml`. Falls back to defaults when none is found.
    ///
    /// An explicitly named file that cannot be read is an error.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        if let Some(path) = named {
            return Self::from_file(path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            Self::from_file(local)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        mode: Option<Mode>,
        first_player: Option<Player>,
        seed: Option<u64>,
        ai_delay_ms: Option<u64>,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(first_player) = first_player {
            self.first_player = first_player;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(ai_delay_ms) = ai_delay_ms {
            self.ai_delay_ms = ai_delay_ms;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
