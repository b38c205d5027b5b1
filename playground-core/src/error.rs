//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use playground_executor::ExecutorError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Execution service error (converted from library)
    #[error("{0}")]
    Executor(#[from] ExecutorError),
}

impl CoreError {
    /// Whether this is expected behavior (bad user input, routine service
    /// faults), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) => true,
            Self::Executor(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
