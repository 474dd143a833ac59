//! Turns a submitted question into a history item
//!
//! `SearchOrchestrator` is a two-state machine:
//!
//! ```text
//! Idle ──submit──▶ Searching ──answer──▶ Idle   (Ok(item))
//!                           └──failure─▶ Idle   (Err(SearchFailed))
//! ```
//!
//! A `submit` arriving while not `Idle` is rejected with `SearchError::Busy`
//! without touching the backend, so two answers can never race into the
//! history. Every backend call is bounded by the configured timeout.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::models::{ChunkPreview, FileFilter, HistoryItem, Language};
use crate::search::client::{SearchBackend, SearchRequest, SearchResponse};
use crate::search::error::{BackendError, SearchError};

/// Default upper bound on one backend call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Ready to accept a submission
    Idle,
    /// A backend call is in flight
    Searching,
}

/// Marks the orchestrator busy until dropped
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Glue between the question box, the Search API and the history
pub struct SearchOrchestrator {
    backend: Arc<dyn SearchBackend>,
    timeout: Duration,
    busy: AtomicBool,
}

impl SearchOrchestrator {
    /// Create an idle orchestrator
    #[must_use]
    pub fn new(backend: Arc<dyn SearchBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            timeout,
            busy: AtomicBool::new(false),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> SearchState {
        if self.busy.load(Ordering::Acquire) {
            SearchState::Searching
        } else {
            SearchState::Idle
        }
    }

    /// Whether a search is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state() == SearchState::Searching
    }

    /// Ask the backend one question and build the resulting history item
    ///
    /// The question is trimmed before sending. The returned item is
    /// unbookmarked; inserting it into the history is the caller's job.
    ///
    /// # Errors
    ///
    /// - `SearchError::EmptyQuery` if `question` is blank
    /// - `SearchError::Busy` if another search is in flight
    /// - `SearchError::SearchFailed` if the backend fails or times out
    pub async fn submit(
        &self,
        question: &str,
        filter: &FileFilter,
        language: Language,
    ) -> Result<HistoryItem, SearchError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let _guard = self.begin()?;
        let request = SearchRequest {
            query: question.to_string(),
            file_name: filter.target_file().map(str::to_string),
            answer_lang: language,
            category: None,
        };

        tracing::debug!(query = %request.query, file = ?request.file_name, lang = %language, "searching");

        let response = match tokio::time::timeout(self.timeout, self.backend.search(&request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "search failed");
                return Err(e.into());
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "search timed out");
                return Err(BackendError::Timeout(self.timeout).into());
            }
        };

        let item = build_item(question, response);
        tracing::info!(
            id = %item.id,
            file = %item.file,
            chunks = item.preview_chunks.len(),
            "search completed"
        );
        Ok(item)
    }

    fn begin(&self) -> Result<InFlight<'_>, SearchError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(&self.busy))
            .map_err(|_| SearchError::Busy)
    }
}

/// History item for one answered question
fn build_item(question: &str, response: SearchResponse) -> HistoryItem {
    let chunks = response
        .preview_chunks
        .iter()
        .map(|snippet| ChunkPreview::from_snippet(snippet, &response.file))
        .collect();
    HistoryItem::new(question, response.answer, response.file, chunks)
}
