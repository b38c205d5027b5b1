//! Business logic services.

mod execution_service;

pub use execution_service::{ExecutionService, PollPolicy};
