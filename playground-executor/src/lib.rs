//! # playground-executor
//!
//! Client library for the Code Playground execution service: a remote
//! compile-and-run API that accepts a compilation unit plus stdin, assigns a
//! job identifier, and reports progress through a status endpoint.
//!
//! ## Service Contract
//!
//! | Endpoint | Method | Body / Response |
//! |----------|--------|-----------------|
//! | `{base_url}/submit` | POST | `{"code", "input"}` → `{"jobId"}` |
//! | `{base_url}/check/{jobId}` | GET | `{"status", "output"?, "error"?}` |
//!
//! `status` is one of `SUBMITTED`, `PENDING`, `COMPLETED`, `FAILED`; the
//! last two are terminal. Any other value fails decoding and surfaces as
//! [`ExecutorError::Parse`] — callers never loop on a status they do not
//! understand.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! playground-executor = "0.1"
//! ```
//!
//! ```rust,no_run
//! use playground_executor::{ExecutionBackend, HttpExecutionBackend, SubmitRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpExecutionBackend::new("http://localhost:8080");
//!
//!     let request = SubmitRequest {
//!         code: "int main() { return 0; }".to_string(),
//!         input: String::new()
//!     };
//!     let job_id = backend.submit(&request).await?;
//!
//!     let report = backend.check(&job_id).await?;
//!     println!("{} -> {:?}", job_id, report.status);
//!
//!     Ok(())
//! }
//! ```

mod error;
mod http;
mod traits;
mod types;

pub use error::{ExecutorError, Result};
pub use http::HttpExecutionBackend;
pub use traits::ExecutionBackend;
pub use types::{CheckResponse, ExecutionOutput, JobStatus, SubmitRequest, SubmitResponse};
