//! HTTP implementation of the execution backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ExecutorError, Result};
use crate::traits::ExecutionBackend;
use crate::types::{CheckResponse, SubmitRequest, SubmitResponse};

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Create an HTTP client with timeout configuration.
fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Production [`ExecutionBackend`] speaking the service's HTTP contract.
pub struct HttpExecutionBackend {
    client: Client,
    base_url: String,
}

impl HttpExecutionBackend {
    /// Create a backend for the service at `base_url`.
    ///
    /// A trailing slash on `base_url` is tolerated and stripped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: create_http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Execute a GET request and decode the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        decode(response).await
    }

    /// Execute a POST request with a JSON body and decode the JSON response.
    async fn post_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        decode(response).await
    }
}

#[async_trait]
impl ExecutionBackend for HttpExecutionBackend {
    fn id(&self) -> &'static str {
        "http"
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<String> {
        let response: SubmitResponse = self.post_json("/submit", request).await?;
        Ok(response.job_id)
    }

    async fn check(&self, job_id: &str) -> Result<CheckResponse> {
        self.get_json(&format!("/check/{job_id}")).await
    }
}

/// Classify a reqwest transport failure.
fn map_transport_error(e: reqwest::Error) -> ExecutorError {
    if e.is_timeout() {
        ExecutorError::Timeout {
            detail: e.to_string(),
        }
    } else {
        ExecutorError::Network {
            detail: e.to_string(),
        }
    }
}

/// Check the HTTP status and parse the response body.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    log::debug!("Response Status: {status}");

    let response_text = response.text().await.map_err(|e| ExecutorError::Network {
        detail: format!("Failed to read response body: {e}"),
    })?;

    if !status.is_success() {
        log::warn!("Execution service error (HTTP {status}): {response_text}");
        return Err(ExecutorError::Api {
            status: status.as_u16(),
            body: response_text,
        });
    }

    log::debug!("Response Body: {response_text}");

    parse_json(&response_text)
}

/// Parse a JSON response body into the expected shape.
fn parse_json<T: DeserializeOwned>(response_text: &str) -> Result<T> {
    serde_json::from_str(response_text).map_err(|e| {
        log::error!("JSON parse failed: {e}");
        log::error!("Raw response: {response_text}");
        ExecutorError::Parse {
            detail: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- base url ----

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let backend = HttpExecutionBackend::new("http://localhost:8080/");
        assert_eq!(backend.base_url, "http://localhost:8080");
    }

    #[test]
    fn base_url_without_slash_is_kept() {
        let backend = HttpExecutionBackend::new("http://localhost:8080");
        assert_eq!(backend.base_url, "http://localhost:8080");
    }

    // ---- parse_json ----

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Payload {
            exit_code: i32,
        }
        let result: Result<Payload> = parse_json(r#"{"exit_code":0}"#);
        assert!(
            matches!(&result, Ok(Payload { exit_code: 0 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Payload {
            exit_code: i32,
        }
        let result: Result<Payload> = parse_json("not json");
        assert!(
            matches!(&result, Err(ExecutorError::Parse { .. })),
            "unexpected parse result: {result:?}"
        );
    }
}
