//! Execution backend abstraction.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CheckResponse, SubmitRequest};

/// Port to a remote code execution service.
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// from concurrent tasks; the orchestration layer holds exactly one backend
/// and issues submit/check calls through it.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Backend identifier, used in logs.
    fn id(&self) -> &'static str;

    /// Submit a compilation unit for execution.
    ///
    /// Returns the job identifier assigned by the service.
    async fn submit(&self, request: &SubmitRequest) -> Result<String>;

    /// Query the current status of a previously submitted job.
    async fn check(&self, job_id: &str) -> Result<CheckResponse>;
}
