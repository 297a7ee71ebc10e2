//! Play configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use unbeatable_tictactoe::{Player as Mark, Strategy};

/// Which side opens each game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FirstMover {
    /// The human opens.
    #[default]
    Human,
    /// The engine opens.
    Engine,
}

impl FirstMover {
    /// Mark that opens, given the human's mark.
    pub fn mark(self, human: Mark) -> Mark {
        match self {
            FirstMover::Human => human,
            FirstMover::Engine => human.opponent(),
        }
    }
}

/// Settings for an interactive game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct PlayConfig {
    /// Human's mark; the engine takes the other one.
    #[serde(default = "default_human_mark")]
    human_mark: Mark,

    /// Side that opens each game.
    #[serde(default)]
    first: FirstMover,

    /// Pause between the engine finding its move and playing it.
    #[serde(default = "default_thinking_delay_ms")]
    thinking_delay_ms: u64,

    /// Search strategy.
    #[serde(default)]
    strategy: Strategy,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    log_level: String,

    /// Write logs here instead of stderr.
    #[serde(default)]
    log_file: Option<PathBuf>,
}

fn default_human_mark() -> Mark {
    Mark::X
}

fn default_thinking_delay_ms() -> u64 {
    50
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human_mark: default_human_mark(),
            first: FirstMover::default(),
            thinking_delay_ms: default_thinking_delay_ms(),
            strategy: Strategy::default(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl PlayConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(human_mark = %config.human_mark, strategy = %config.strategy, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
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
