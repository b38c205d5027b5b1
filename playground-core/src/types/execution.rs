//! Execution job and observable display state

use serde::{Deserialize, Serialize};

use playground_executor::JobStatus;

/// One in-flight or completed remote execution.
///
/// At most one job is tracked at a time; a new submission replaces it, and
/// the replaced job's poll loop abandons itself (no history is kept).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionJob {
    /// Job identifier assigned by the remote service
    #[serde(rename = "jobId")]
    pub job_id: String,
    /// Source code submitted
    pub code: String,
    /// Stdin text submitted alongside the code
    pub input: String,
    /// Last observed status
    pub status: JobStatus,
}

/// Observable execution state for display surfaces.
///
/// Published through a watch channel; shells either read the current value
/// or await changes. Mutated only by the execution service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionDisplayState {
    /// True between submission and terminal resolution
    pub is_loading: bool,
    /// Full formatted transcript for the terminal panel
    pub terminal_text: String,
    /// User-facing result text
    pub output_text: String,
    /// True when the job failed or exited non-zero
    pub has_error: bool,
    /// Free-form stdin text supplied by the user
    pub input: String,
}
