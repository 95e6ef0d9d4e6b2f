//! Runtime options for the native runner
//!
//! Gameplay tuning is compile-time (see [`crate::consts`] and the stage
//! table); this only covers how a session is driven.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Base RNG seed; each new run offsets it by the run count
    pub seed: u64,
    /// Frame rate the loop is paced at
    pub target_fps: u32,
    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,
    /// Pace frames against the wall clock instead of a simulated one
    pub realtime: bool,
    /// Let the built-in autopilot steer
    pub autopilot: bool,
    /// Log a HUD line every N frames (0 = never)
    pub log_every: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x7468_7265_6164,
            target_fps: crate::consts::TICKS_PER_SECOND,
            max_frames: Some(60 * 120),
            realtime: false,
            autopilot: true,
            log_every: 300,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.target_fps, GameConfig::default().target_fps);
        assert!(config.autopilot);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = GameConfig::from_json(r#"{ "difficulty": "hard" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/nonexistent/threader.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
