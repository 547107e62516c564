//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clock::MatchClock;
use crate::error::{ReplaylensError, ReplaylensResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default analysis parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analysis parameters: run-wide constants and pipeline feature flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Frames per analysis window.
    pub window_size: u64,

    /// Seconds per replay frame.
    pub frame_duration_secs: f64,

    /// Average APM above which a player is flagged as automated.
    pub bot_threshold_apm: f64,

    /// Maximum per-axis distance (map units) for two mean positions to count as an engagement.
    pub distance_threshold: f64,

    /// Maximum window gap merged by highlight compression.
    pub compression_length: u64,

    /// Maximum window gap merged by attack-record compression.
    pub attack_compression: u64,

    /// Record the mean location of attack orders per window.
    pub track_attack_locations: bool,

    /// Merge nearby highlight windows.
    pub compress_highlights: bool,

    /// Look for windows where both players act close together.
    pub detect_engagements: bool,

    /// Compute both players' metrics on the rayon pool.
    pub parallel: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "replaylens=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            frame_duration_secs: 0.042,
            bot_threshold_apm: 400.0,
            distance_threshold: 50.0,
            compression_length: 2,
            attack_compression: 2,
            track_attack_locations: false,
            compress_highlights: true,
            detect_engagements: true,
            parallel: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AnalysisConfig {
    /// Clock matching this configuration's window size and frame duration.
    pub fn clock(&self) -> MatchClock {
        MatchClock::new(self.window_size, self.frame_duration_secs)
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file gives the defaults. A file that exists but cannot be
    /// read or parsed is an error, so the caller decides how to report it.
    pub fn load() -> ReplaylensResult<Self> {
        Self::load_if_present(config_file_path())
    }

    /// Load config from `path`, or the defaults when no file is there.
    pub fn load_if_present(path: impl AsRef<Path>) -> ReplaylensResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load config from an explicit path. Unlike [`AppConfig::load`], errors are returned.
    pub fn load_from(path: impl AsRef<Path>) -> ReplaylensResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReplaylensError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ReplaylensError::config(format!("{}: {e}", path.display())))
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("replaylens").join("config.json")
}
