//! Platform-agnostic application state for Code Playground.
//!
//! Provides `AppState` (box collection + execution orchestration behind one
//! surface) and `AppStateBuilder` (backend injection). Every frontend
//! constructs one `AppState` at startup and maps its UI events 1:1 onto the
//! methods here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use playground_core::collection::BoxCollection;
use playground_core::error::{CoreError, CoreResult};
use playground_core::services::{ExecutionService, PollPolicy};
use playground_core::types::{
    BoxColor, CodeBox, ExecutionBackend, ExecutionDisplayState, ExecutionJob,
};

/// Platform-agnostic application state.
///
/// Owns the code box collection, the execution service, and the terminal
/// panel visibility flag. Collection mutations are serialized behind one
/// async lock; execution state is observed through a watch channel.
pub struct AppState {
    collection: RwLock<BoxCollection>,
    execution: Arc<ExecutionService>,
    terminal_open: AtomicBool,
}

impl AppState {
    // ---- Box collection ----

    /// Insert a new box right after `after_id`; appends at the end when the
    /// anchor is unknown. Returns the new box's identifier.
    pub async fn add_box(&self, after_id: &str) -> String {
        self.collection.write().await.add_box(after_id)
    }

    /// Remove a box. Refused when it is the last one. Returns whether a box
    /// was removed.
    pub async fn delete_box(&self, id: &str) -> bool {
        self.collection.write().await.delete_box(id)
    }

    /// Replace a box's code. Returns whether a box was updated.
    pub async fn update_box_code(&self, id: &str, code: impl Into<String>) -> bool {
        self.collection.write().await.update_code(id, code)
    }

    /// Replace a box's color tag. Returns whether a box was updated.
    pub async fn update_box_color(&self, id: &str, color: BoxColor) -> bool {
        self.collection.write().await.update_color(id, color)
    }

    /// Move box `active_id` to the position of `over_id`. Returns whether
    /// the order changed.
    pub async fn reorder_boxes(&self, active_id: &str, over_id: &str) -> bool {
        self.collection.write().await.reorder(active_id, over_id)
    }

    /// Set or clear the color view filter.
    pub async fn set_filter_color(&self, filter: Option<BoxColor>) {
        self.collection.write().await.set_filter(filter);
    }

    /// The active color view filter.
    pub async fn filter_color(&self) -> Option<BoxColor> {
        self.collection.read().await.filter()
    }

    /// Snapshot of all boxes in storage order.
    pub async fn boxes(&self) -> Vec<CodeBox> {
        self.collection.read().await.boxes().to_vec()
    }

    /// Snapshot of the boxes matching the active filter, in storage order.
    pub async fn visible_boxes(&self) -> Vec<CodeBox> {
        self.collection
            .read()
            .await
            .visible_boxes()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Number of boxes.
    pub async fn box_count(&self) -> usize {
        self.collection.read().await.len()
    }

    /// Concatenated code of every box tagged `color`, in storage order.
    pub async fn combined_code(&self, color: BoxColor) -> String {
        self.collection.read().await.combined_code(color)
    }

    // ---- Execution ----

    /// Submit the combined code of every box tagged `color`.
    ///
    /// Returns `false` without touching execution state when that code is
    /// empty or blank. Otherwise claims the display, spawns the rest of the
    /// run as a background task (the caller must be inside a tokio runtime)
    /// and returns `true` with the loading reset already published;
    /// progress is observed via [`subscribe`](Self::subscribe). Submitting
    /// while a run is in flight supersedes it.
    pub async fn submit_by_color(&self, color: BoxColor) -> bool {
        let code = self.combined_code(color).await;
        if code.trim().is_empty() {
            log::debug!("No runnable code tagged {color}");
            return false;
        }
        let input = self.execution.display_state().input;
        // Claim before spawning: the reset must be observable once the
        // submission is accepted, not when the task is first polled.
        let generation = self.execution.begin();
        let execution = Arc::clone(&self.execution);
        tokio::spawn(async move {
            execution.run_claimed(generation, code, input).await;
        });
        true
    }

    /// Replace the stdin text sent with the next submission.
    pub fn set_input(&self, input: impl Into<String>) {
        self.execution.set_input(input);
    }

    /// Clear transcript text and the error flag.
    pub fn clear_output(&self) {
        self.execution.clear_output();
    }

    /// Obtain a receiver for execution display state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ExecutionDisplayState> {
        self.execution.subscribe()
    }

    /// One-shot snapshot of the execution display state.
    #[must_use]
    pub fn display_state(&self) -> ExecutionDisplayState {
        self.execution.display_state()
    }

    /// Snapshot of the most recent execution job, if any.
    pub async fn current_job(&self) -> Option<ExecutionJob> {
        self.execution.current_job().await
    }

    // ---- Terminal panel ----

    /// Set the terminal panel visibility flag.
    pub fn set_terminal_open(&self, open: bool) {
        self.terminal_open.store(open, Ordering::SeqCst);
    }

    /// Flip the terminal panel visibility flag; returns the new value.
    pub fn toggle_terminal(&self) -> bool {
        !self.terminal_open.fetch_xor(true, Ordering::SeqCst)
    }

    /// Whether the terminal panel is open.
    #[must_use]
    pub fn is_terminal_open(&self) -> bool {
        self.terminal_open.load(Ordering::SeqCst)
    }
}

/// Builder for constructing `AppState` with a platform-specific backend.
///
/// # Required
/// - `backend` — transport to the remote execution service
///
/// # Optional
/// - `poll_policy` — defaults to one check per second, five minutes total
pub struct AppStateBuilder {
    backend: Option<Arc<dyn ExecutionBackend>>,
    poll_policy: Option<PollPolicy>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: None,
            poll_policy: None,
        }
    }

    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn ExecutionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = Some(policy);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if the backend is missing.
    pub fn build(self) -> CoreResult<AppState> {
        let backend = self
            .backend
            .ok_or_else(|| CoreError::ValidationError("backend is required".to_string()))?;

        let execution = match self.poll_policy {
            Some(policy) => ExecutionService::with_poll_policy(backend, policy),
            None => ExecutionService::new(backend),
        };

        Ok(AppState {
            collection: RwLock::new(BoxCollection::new()),
            execution: Arc::new(execution),
            terminal_open: AtomicBool::new(false),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
