//! Search API wire types and the HTTP backend
//!
//! The backend exposes two endpoints:
//!
//! - `POST /api/search` with `{query, file_name, answer_lang[, category]}`,
//!   answering `{answer, file, preview_chunks}`; internal failures come back
//!   as `200` with `{"error": "..."}`
//! - `GET /api/contracts`, answering `{contracts: [...]}`

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::Language;
use crate::search::error::BackendError;

/// Longest error body kept in `BackendError::Status`
const MAX_ERROR_BODY: usize = 512;

/// Body of `POST /api/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    /// Contract to restrict the search to; `null` searches everything
    pub file_name: Option<String>,
    pub answer_lang: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Successful body of `POST /api/search`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    pub answer: String,
    /// Contract the answer was drawn from, as reported by the backend
    pub file: String,
    #[serde(default)]
    pub preview_chunks: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Either an answer or the backend's in-band error report
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchPayload {
    Failure { error: String },
    Answer(SearchResponse),
}

/// Body of `GET /api/contracts`
#[derive(Debug, Deserialize)]
struct ContractList {
    #[serde(default)]
    contracts: Vec<String>,
}

/// Anything that can answer contract questions
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Answer one question
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure, non-success status,
    /// in-band error report or undecodable body.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError>;

    /// List the contracts that can be used as a file filter
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the list cannot be fetched or decoded.
    async fn contracts(&self) -> Result<Vec<String>, BackendError>;
}

/// `SearchBackend` speaking JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSearchClient {
    /// Create a client for the backend at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn read_body(response: reqwest::Response) -> Result<String, BackendError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(BackendError::Status {
                status: status.as_u16(),
                body: truncate(body, MAX_ERROR_BODY),
            })
        }
    }
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError> {
        let response = self
            .http
            .post(self.endpoint("/api/search"))
            .json(request)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        parse_search_body(&body)
    }

    async fn contracts(&self) -> Result<Vec<String>, BackendError> {
        let response = self.http.get(self.endpoint("/api/contracts")).send().await?;
        let body = Self::read_body(response).await?;
        let list: ContractList =
            serde_json::from_str(&body).map_err(|e| BackendError::Malformed(e.to_string()))?;
        Ok(list.contracts)
    }
}

/// Decode a `/api/search` body, surfacing in-band error reports
///
/// # Errors
///
/// Returns `BackendError::Backend` for `{"error": ...}` bodies and
/// `BackendError::Malformed` for anything that is not a valid answer.
pub fn parse_search_body(body: &str) -> Result<SearchResponse, BackendError> {
    match serde_json::from_str::<SearchPayload>(body) {
        Ok(SearchPayload::Answer(response)) => Ok(response),
        Ok(SearchPayload::Failure { error }) => Err(BackendError::Backend(error)),
        Err(e) => Err(BackendError::Malformed(e.to_string())),
    }
}

fn truncate(mut text: String, max: usize) -> String {
    if text.len() > max {
        let mut cut = max;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
