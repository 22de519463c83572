//! Error types shared by the recommendation and timer engine

use thiserror::Error;

use crate::{engine::TimerStatus, sources::SourceError};

/// Recoverable engine errors. A rejected operation never changes state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Negative, non-finite or otherwise unusable numeric input
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The operation is not allowed while the timer is in `status`
    #[error("cannot {operation} while timer is {status}")]
    InvalidTransition {
        operation: &'static str,
        status: TimerStatus,
    },
}

impl EngineError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_transition(operation: &'static str, status: TimerStatus) -> Self {
        Self::InvalidTransition { operation, status }
    }
}

/// Errors surfaced by the host around the engine
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// The host refuses to run the timer for the current reading
    #[error("{0}")]
    Refused(String),

    #[error("failed to lock {0} state")]
    Lock(&'static str),
}

/// Convert a signed count coming from the outside world into a `u64`
pub fn non_negative(field: &'static str, value: i64) -> Result<u64, EngineError> {
    u64::try_from(value).map_err(|_| EngineError::validation(field, format!("{} is negative", value)))
}
