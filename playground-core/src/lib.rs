//! Code Playground Core Library
//!
//! Provides the core business logic for code playground applications:
//! - Ordered, color-tagged code box collection (add/delete/reorder/filter,
//!   color-scoped combined code)
//! - Execution orchestration (submit, poll, terminal-state reconciliation,
//!   observable display state)
//!
//! This library is platform-independent. The remote execution service is
//! abstracted behind the `ExecutionBackend` trait from `playground-executor`,
//! so desktop shells, TUIs and tests can each supply their own transport.

pub mod collection;
pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use collection::BoxCollection;
pub use error::{CoreError, CoreResult};
pub use services::{ExecutionService, PollPolicy};
pub use types::{
    BoxColor, CheckResponse, CodeBox, ExecutionBackend, ExecutionDisplayState, ExecutionJob,
    ExecutionOutput, ExecutorError, HttpExecutionBackend, JobStatus, SubmitRequest,
};
