//! Error types shared across Replaylens crates.

use std::path::PathBuf;

/// Top-level error type for Replaylens operations.
///
/// Crate-local errors (`AnalysisError`, `ReplayError`) convert into this
/// type at crate boundaries, keeping their stable `kind` label.
#[derive(Debug, thiserror::Error)]
pub enum ReplaylensError {
    #[error("Analysis error ({kind}): {message}")]
    Analysis { kind: &'static str, message: String },

    #[error("Replay error ({kind}): {message}")]
    Replay { kind: &'static str, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ReplaylensError.
pub type ReplaylensResult<T> = Result<T, ReplaylensError>;

impl ReplaylensError {
    pub fn analysis(kind: &'static str, msg: impl Into<String>) -> Self {
        Self::Analysis {
            kind,
            message: msg.into(),
        }
    }

    pub fn replay(kind: &'static str, msg: impl Into<String>) -> Self {
        Self::Replay {
            kind,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Stable label for the failure kind, suitable for user-facing reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Analysis { kind, .. } | Self::Replay { kind, .. } => kind,
            Self::Config { .. } => "config",
            Self::FileNotFound { .. } => "file_not_found",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Other(_) => "other",
        }
    }
}
