//! Wire types for the execution service contract.

use serde::{Deserialize, Serialize};

/// Request body for `POST /submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The compilation unit to build and run.
    pub code: String,
    /// Text fed to the program's standard input.
    pub input: String,
}

/// Response body for `POST /submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// Job identifier assigned by the service.
    pub job_id: String,
}

/// Job lifecycle status reported by the check endpoint.
///
/// This is a closed set: a payload carrying any other status string fails
/// deserialization, which callers surface as a transport fault instead of
/// polling forever on a value they do not understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Accepted by the service, not yet scheduled.
    Submitted,
    /// Scheduled or running.
    Pending,
    /// Finished; the report carries an output payload.
    Completed,
    /// The service could not execute the job; the report may carry an error
    /// message.
    Failed,
}

impl JobStatus {
    /// Whether no further status change can occur.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Structured result payload of a completed job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutput {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Process exit code.
    pub exit_code: i32,
    /// Wall-clock runtime in milliseconds.
    #[serde(default)]
    pub runtime_ms: u64,
    /// Service-internal result label (e.g. sandbox verdict). Informational.
    #[serde(default)]
    pub status: String,
}

/// Response body for `GET /check/{jobId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Current job status.
    pub status: JobStatus,
    /// Result payload, present once the job is `Completed`.
    pub output: Option<ExecutionOutput>,
    /// Error message, possibly present when the job is `Failed`.
    pub error: Option<String>,
}
