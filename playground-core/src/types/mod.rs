//! Type definition module

mod code_box;
mod execution;

pub use code_box::{BoxColor, CodeBox, DEFAULT_CODE, NEW_BOX_CODE};
pub use execution::{ExecutionDisplayState, ExecutionJob};

// Re-export public types of the executor library
pub use playground_executor::{
    CheckResponse, ExecutionBackend, ExecutionOutput, ExecutorError, HttpExecutionBackend,
    JobStatus, SubmitRequest, SubmitResponse,
};
