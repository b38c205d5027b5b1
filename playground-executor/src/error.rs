//! Unified error type for execution service operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while talking to the execution service.
///
/// All variants are serializable for structured error reporting. The tag is a
/// stable machine-readable code, so shells can pattern-match without parsing
/// display strings.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code", content = "details")]
pub enum ExecutorError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, broken body stream, etc.).
    #[error("Network error: {detail}")]
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("Request timed out: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The service answered with a non-success HTTP status.
    #[error("Execution service returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text, if any.
        body: String,
    },

    /// Failed to parse the service's response, including payloads carrying
    /// an unrecognized job status.
    #[error("Failed to parse execution service response: {detail}")]
    Parse {
        /// Details about the parse failure.
        detail: String,
    },
}

impl ExecutorError {
    /// Whether this is an expected operational fault, used for log
    /// classification: `warn` when `true`, `error` when `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Timeout { .. })
    }
}

/// Result type alias for execution service operations.
pub type Result<T> = std::result::Result<T, ExecutorError>;
