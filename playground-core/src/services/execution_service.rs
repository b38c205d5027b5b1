//! Execution orchestration service
//!
//! Owns the full lifecycle of a remote execution: submit, poll until a
//! terminal status, format the transcript, and publish observable display
//! state. At most one job is current at a time; a new submission supersedes
//! any in-flight poll loop via a generation counter, and superseded loops
//! abandon themselves without writing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};

use playground_executor::{
    CheckResponse, ExecutionBackend, ExecutionOutput, ExecutorError, JobStatus, SubmitRequest,
};

use crate::types::{ExecutionDisplayState, ExecutionJob};

const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 300;

/// Displayed when the service reports `FAILED` without an error message.
const EXECUTION_FAILED_FALLBACK: &str = "Execution failed";

/// Polling cadence and budget for job status checks.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Delay before each status check.
    pub interval: Duration,
    /// Maximum number of status checks before the job is declared timed out.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    /// One check per second, five minutes total.
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

/// How one run terminated.
///
/// Every path through `execute` funnels into exactly one outcome, and
/// `finish` publishes the corresponding display state, so loading is cleared
/// exactly once per run.
enum RunOutcome {
    /// Terminal `COMPLETED` with its output payload.
    Completed(ExecutionOutput),
    /// Terminal `FAILED` with the service-supplied message, if any.
    Failed(Option<String>),
    /// The poll budget ran out before a terminal status.
    TimedOut { attempts: u32 },
    /// A newer submission took over; this run must not touch shared state.
    Superseded,
    /// Submit or check failed, or a payload was malformed.
    Fault(ExecutorError),
}

/// Orchestrates remote code execution and publishes display state.
///
/// Shells hold this behind an `Arc`, claim a run with
/// [`begin`](Self::begin) and spawn [`run_claimed`](Self::run_claimed) as a
/// task so submissions never block, and observe results through
/// [`subscribe`](Self::subscribe).
pub struct ExecutionService {
    backend: Arc<dyn ExecutionBackend>,
    policy: PollPolicy,
    /// Current run generation. Writes to display state and the job record
    /// are gated on holding the latest generation.
    generation: AtomicU64,
    job: RwLock<Option<ExecutionJob>>,
    display_tx: watch::Sender<ExecutionDisplayState>,
}

impl ExecutionService {
    /// Create a service with the default [`PollPolicy`].
    #[must_use]
    pub fn new(backend: Arc<dyn ExecutionBackend>) -> Self {
        Self::with_poll_policy(backend, PollPolicy::default())
    }

    /// Create a service with an explicit [`PollPolicy`].
    #[must_use]
    pub fn with_poll_policy(backend: Arc<dyn ExecutionBackend>, policy: PollPolicy) -> Self {
        let (display_tx, _) = watch::channel(ExecutionDisplayState::default());
        Self {
            backend,
            policy,
            generation: AtomicU64::new(0),
            job: RwLock::new(None),
            display_tx,
        }
    }

    /// Obtain a receiver for display state changes.
    ///
    /// The receiver immediately holds the current value; awaiting `changed`
    /// yields on every subsequent publish.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ExecutionDisplayState> {
        self.display_tx.subscribe()
    }

    /// One-shot snapshot of the current display state.
    #[must_use]
    pub fn display_state(&self) -> ExecutionDisplayState {
        self.display_tx.borrow().clone()
    }

    /// Snapshot of the most recent job, if any.
    pub async fn current_job(&self) -> Option<ExecutionJob> {
        self.job.read().await.clone()
    }

    /// Replace the stdin text carried in the display state.
    pub fn set_input(&self, input: impl Into<String>) {
        let input = input.into();
        self.display_tx.send_modify(|state| state.input = input);
    }

    /// Clear transcript text and the error flag.
    ///
    /// Leaves `is_loading` and `input` untouched and does not cancel an
    /// in-flight job.
    pub fn clear_output(&self) {
        self.display_tx.send_modify(|state| {
            state.terminal_text.clear();
            state.output_text.clear();
            state.has_error = false;
        });
    }

    /// Submit `code` with `input` on stdin and drive it to a terminal state.
    ///
    /// Blank code is refused without touching any state. Starting a new run
    /// supersedes any in-flight one: the older poll loop abandons itself at
    /// its next wake-up and its writes are discarded.
    ///
    /// All faults are absorbed into display state; this method never
    /// returns an error. Callers that spawn the run as a task and need the
    /// reset visible before the task is first polled use
    /// [`begin`](Self::begin) plus [`run_claimed`](Self::run_claimed)
    /// instead.
    pub async fn run(&self, code: String, input: String) {
        if code.trim().is_empty() {
            log::debug!("Ignoring submission with blank code");
            return;
        }
        let generation = self.begin();
        self.run_claimed(generation, code, input).await;
    }

    /// Claim the display for a new run.
    ///
    /// Bumps the run generation and publishes the loading reset under the
    /// new claim, superseding any in-flight run. This is synchronous, so a
    /// caller that spawns [`run_claimed`](Self::run_claimed) as a task
    /// makes the reset observable before the task is first polled; a rapid
    /// resubmission can then never see the previous run's output.
    #[must_use]
    pub fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(generation, |state| {
            state.is_loading = true;
            state.terminal_text.clear();
            state.output_text.clear();
            state.has_error = false;
        });
        generation
    }

    /// Drive a run whose display claim was already taken with
    /// [`begin`](Self::begin).
    ///
    /// Code validation is the caller's job. All faults are absorbed into
    /// display state; this method never returns an error.
    pub async fn run_claimed(&self, generation: u64, code: String, input: String) {
        let outcome = self.execute(generation, code, input).await;
        self.finish(generation, outcome);
    }

    /// Submit the job and poll it to an outcome.
    async fn execute(&self, generation: u64, code: String, input: String) -> RunOutcome {
        let request = SubmitRequest { code, input };
        let job_id = match self.backend.submit(&request).await {
            Ok(job_id) => job_id,
            Err(e) => return RunOutcome::Fault(e),
        };
        log::debug!("Job {job_id} accepted by backend {}", self.backend.id());

        let SubmitRequest { code, input } = request;
        self.store_job(
            generation,
            ExecutionJob {
                job_id: job_id.clone(),
                code,
                input,
                status: JobStatus::Submitted,
            },
        )
        .await;

        for attempt in 1..=self.policy.max_attempts {
            tokio::time::sleep(self.policy.interval).await;

            if self.is_superseded(generation) {
                log::debug!("Job {job_id} superseded, abandoning poll loop");
                return RunOutcome::Superseded;
            }

            let report: CheckResponse = match self.backend.check(&job_id).await {
                Ok(report) => report,
                Err(e) => return RunOutcome::Fault(e),
            };
            self.update_job_status(generation, report.status).await;

            match report.status {
                JobStatus::Submitted | JobStatus::Pending => {
                    log::debug!(
                        "Job {job_id} not finished (attempt {attempt}/{})",
                        self.policy.max_attempts
                    );
                }
                JobStatus::Completed => {
                    return match report.output {
                        Some(output) => RunOutcome::Completed(output),
                        None => RunOutcome::Fault(ExecutorError::Parse {
                            detail: "COMPLETED response missing output payload".to_string(),
                        }),
                    };
                }
                JobStatus::Failed => return RunOutcome::Failed(report.error),
            }
        }

        RunOutcome::TimedOut {
            attempts: self.policy.max_attempts,
        }
    }

    /// Publish the terminal display state for `outcome`.
    fn finish(&self, generation: u64, outcome: RunOutcome) {
        match outcome {
            RunOutcome::Completed(output) => {
                let has_error = output.exit_code != 0;
                if has_error {
                    log::warn!("Job completed with exit code {}", output.exit_code);
                }
                let transcript = format_transcript(&output);
                self.publish(generation, move |state| {
                    state.is_loading = false;
                    state.terminal_text = transcript.clone();
                    state.output_text = transcript;
                    state.has_error = has_error;
                });
            }
            RunOutcome::Failed(message) => {
                let message = message.unwrap_or_else(|| EXECUTION_FAILED_FALLBACK.to_string());
                log::warn!("Job failed: {message}");
                self.fail_display(generation, message);
            }
            RunOutcome::TimedOut { attempts } => {
                let message = format!(
                    "Timed out waiting for the execution result after {attempts} status checks"
                );
                log::warn!("{message}");
                self.fail_display(generation, message);
            }
            RunOutcome::Fault(e) => {
                if e.is_expected() {
                    log::warn!("Execution request failed: {e}");
                } else {
                    log::error!("Execution request failed: {e}");
                }
                self.fail_display(generation, e.to_string());
            }
            RunOutcome::Superseded => {}
        }
    }

    fn fail_display(&self, generation: u64, message: String) {
        self.publish(generation, move |state| {
            state.is_loading = false;
            state.terminal_text = message.clone();
            state.output_text = message;
            state.has_error = true;
        });
    }

    /// Apply `mutate` to the display state unless `generation` has been
    /// superseded.
    ///
    /// The generation check runs inside the watch critical section, so a
    /// stale loop can never interleave with a newer run's publish.
    fn publish<F>(&self, generation: u64, mutate: F)
    where
        F: FnOnce(&mut ExecutionDisplayState),
    {
        self.display_tx.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            mutate(state);
            true
        });
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    async fn store_job(&self, generation: u64, job: ExecutionJob) {
        let mut slot = self.job.write().await;
        if self.is_superseded(generation) {
            return;
        }
        *slot = Some(job);
    }

    async fn update_job_status(&self, generation: u64, status: JobStatus) {
        let mut slot = self.job.write().await;
        if self.is_superseded(generation) {
            return;
        }
        if let Some(job) = slot.as_mut() {
            job.status = status;
        }
    }
}

/// Format the terminal transcript of a completed job: stdout, then a stderr
/// section when present, then an exit-code trailer when non-zero.
fn format_transcript(output: &ExecutionOutput) -> String {
    let mut transcript = output.stdout.clone();
    if !output.stderr.is_empty() {
        transcript.push_str("\nError:\n");
        transcript.push_str(&output.stderr);
    }
    if output.exit_code != 0 {
        transcript.push_str(&format!(
            "\n\nProcess finished with exit code {}",
            output.exit_code
        ));
    }
    transcript
}
