//! Search-specific error types
//!
//! This module separates local rejections from backend failures:
//!
//! - **`EmptyQuery`**: the question was empty or whitespace; no request sent
//! - **`Busy`**: a search is already in flight; no request sent
//! - **`SearchFailed`**: the Search API could not produce an answer (wraps
//!   `BackendError`)
//!
//! `BackendError` covers everything that can go wrong talking to the backend:
//! transport errors, non-2xx statuses, error payloads, undecodable bodies and
//! timeouts. None of them mutates the session history.

use std::time::Duration;

use thiserror::Error;

/// Failures of the external Search / Contract list API
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level error (connection refused, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Server answered 200 but reported an internal failure
    #[error("Backend reported an error: {0}")]
    Backend(String),

    /// Body did not match the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// No answer within the configured timeout
    #[error("Search timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Search orchestration errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// Question was empty or whitespace-only
    #[error("Please enter a question")]
    EmptyQuery,

    /// Another search is still in flight
    #[error("A search is already in progress")]
    Busy,

    /// The backend could not answer
    #[error("Search failed: {0}")]
    SearchFailed(#[from] BackendError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
