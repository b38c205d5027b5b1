//! Test helpers
//!
//! Provides a scriptable mock execution backend and convenient test
//! factories.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use playground_executor::{
    CheckResponse, ExecutionBackend, ExecutionOutput, ExecutorError, JobStatus, SubmitRequest,
};
use tokio::sync::RwLock;

use crate::services::{ExecutionService, PollPolicy};

// ===== MockExecutionBackend =====

type CheckScript = VecDeque<Result<CheckResponse, ExecutorError>>;

/// Scriptable in-memory stand-in for the remote execution service.
pub struct MockExecutionBackend {
    /// Job identifiers handed out by `submit`, in order. When empty,
    /// identifiers are generated from the call count.
    submit_ids: RwLock<VecDeque<String>>,
    /// If Some, `submit` fails with this error.
    submit_error: RwLock<Option<ExecutorError>>,
    /// Scripted `check` responses per job; the last entry repeats forever.
    check_scripts: RwLock<HashMap<String, CheckScript>>,
    /// Artificial latency applied to `check`, per job.
    check_delays: RwLock<HashMap<String, Duration>>,
    submit_calls: RwLock<Vec<SubmitRequest>>,
    check_calls: RwLock<u32>,
}

impl MockExecutionBackend {
    pub fn new() -> Self {
        Self {
            submit_ids: RwLock::new(VecDeque::new()),
            submit_error: RwLock::new(None),
            check_scripts: RwLock::new(HashMap::new()),
            check_delays: RwLock::new(HashMap::new()),
            submit_calls: RwLock::new(Vec::new()),
            check_calls: RwLock::new(0),
        }
    }

    pub async fn push_submit_id(&self, id: impl Into<String>) {
        self.submit_ids.write().await.push_back(id.into());
    }

    pub async fn set_submit_error(&self, err: Option<ExecutorError>) {
        *self.submit_error.write().await = err;
    }

    pub async fn script_check(
        &self,
        job_id: impl Into<String>,
        script: Vec<Result<CheckResponse, ExecutorError>>,
    ) {
        self.check_scripts
            .write()
            .await
            .insert(job_id.into(), script.into());
    }

    pub async fn set_check_delay(&self, job_id: impl Into<String>, delay: Duration) {
        self.check_delays.write().await.insert(job_id.into(), delay);
    }

    /// Every request `submit` has received, in order.
    pub async fn submit_calls(&self) -> Vec<SubmitRequest> {
        self.submit_calls.read().await.clone()
    }

    /// Total number of `check` calls across all jobs.
    pub async fn check_count(&self) -> u32 {
        *self.check_calls.read().await
    }
}

#[async_trait]
impl ExecutionBackend for MockExecutionBackend {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn submit(&self, request: &SubmitRequest) -> playground_executor::Result<String> {
        self.submit_calls.write().await.push(request.clone());
        if let Some(err) = self.submit_error.read().await.clone() {
            return Err(err);
        }
        if let Some(id) = self.submit_ids.write().await.pop_front() {
            return Ok(id);
        }
        let count = self.submit_calls.read().await.len();
        Ok(format!("job-{count}"))
    }

    async fn check(&self, job_id: &str) -> playground_executor::Result<CheckResponse> {
        *self.check_calls.write().await += 1;
        if let Some(delay) = self.check_delays.read().await.get(job_id).copied() {
            tokio::time::sleep(delay).await;
        }
        let mut scripts = self.check_scripts.write().await;
        let Some(script) = scripts.get_mut(job_id) else {
            return Err(ExecutorError::Api {
                status: 404,
                body: format!("unknown job: {job_id}"),
            });
        };
        let response = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        match response {
            Some(result) => result,
            None => Err(ExecutorError::Api {
                status: 404,
                body: format!("no scripted response for job: {job_id}"),
            }),
        }
    }
}

// ===== Response builders =====

/// A `PENDING` check response.
pub fn pending() -> CheckResponse {
    CheckResponse {
        status: JobStatus::Pending,
        output: None,
        error: None,
    }
}

/// A `COMPLETED` check response with the given output payload.
pub fn completed(stdout: &str, stderr: &str, exit_code: i32) -> CheckResponse {
    CheckResponse {
        status: JobStatus::Completed,
        output: Some(ExecutionOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code,
            runtime_ms: 0,
            status: String::new(),
        }),
        error: None,
    }
}

/// A `FAILED` check response, optionally carrying an error message.
pub fn failed(error: Option<&str>) -> CheckResponse {
    CheckResponse {
        status: JobStatus::Failed,
        output: None,
        error: error.map(ToString::to_string),
    }
}

// ===== Factories =====

/// A polling policy tight enough for tests.
pub fn fast_policy() -> PollPolicy {
    PollPolicy {
        interval: Duration::from_millis(1),
        max_attempts: 50,
    }
}

/// Create an `ExecutionService` over a fresh mock backend, polling fast.
pub fn create_test_service() -> (Arc<ExecutionService>, Arc<MockExecutionBackend>) {
    let backend = Arc::new(MockExecutionBackend::new());
    let service = Arc::new(ExecutionService::with_poll_policy(
        backend.clone(),
        fast_policy(),
    ));
    (service, backend)
}
