//! Analysis failures.

use replaylens_common::ReplaylensError;
use replaylens_match_model::PlayerSlot;

/// Errors that abort an analysis run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// The player issued no actions, so no rate statistics exist.
    #[error("{player} has no action windows; cannot compute APM statistics")]
    InsufficientData { player: PlayerSlot },

    #[error("Invalid analysis configuration: {message}")]
    InvalidConfig { message: String },
}

impl AnalysisError {
    /// Stable label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "insufficient_data",
            Self::InvalidConfig { .. } => "invalid_config",
        }
    }

    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: msg.into(),
        }
    }
}

impl From<AnalysisError> for ReplaylensError {
    fn from(err: AnalysisError) -> Self {
        ReplaylensError::analysis(err.kind(), err.to_string())
    }
}
