//! Testing utilities for contract-ask
//!
//! Fixtures for unit tests: history item builders and `MockBackend`, a
//! scripted `SearchBackend` that records every request it receives.
//!
//! Only available when compiled with `cfg(test)`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::models::HistoryItem;
use crate::search::client::{SearchBackend, SearchRequest, SearchResponse};
use crate::search::error::BackendError;

/// Unbookmarked item whose answer and file derive from the question
#[must_use]
pub fn item(question: &str) -> HistoryItem {
    HistoryItem::new(question, format!("answer to {question}"), "contract.pdf", vec![])
}

/// Questions of a view, in order
#[must_use]
pub fn questions<'a>(items: &[&'a HistoryItem]) -> Vec<&'a str> {
    items.iter().map(|i| i.question.as_str()).collect()
}

/// Successful search response
#[must_use]
pub fn answer(answer: &str, file: &str, chunks: &[&str]) -> SearchResponse {
    SearchResponse {
        answer: answer.to_string(),
        file: file.to_string(),
        preview_chunks: chunks.iter().map(|c| (*c).to_string()).collect(),
        category: None,
    }
}

/// Scripted search backend
///
/// Searches pop responses from a queue; an exhausted queue answers with a
/// generic response echoing the query. When a gate is set, every search
/// waits for one notification before answering.
#[derive(Default)]
pub struct MockBackend {
    responses: Mutex<VecDeque<Result<SearchResponse, BackendError>>>,
    contracts: Mutex<Option<Result<Vec<String>, BackendError>>>,
    requests: Mutex<Vec<SearchRequest>>,
    gate: Option<Arc<Notify>>,
}

impl MockBackend {
    /// Backend with an empty script
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful answer
    #[must_use]
    pub fn with_answer(self, response: SearchResponse) -> Self {
        lock(&self.responses).push_back(Ok(response));
        self
    }

    /// Queue a failure
    #[must_use]
    pub fn with_failure(self, error: BackendError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Answer for the next contract-list request
    #[must_use]
    pub fn with_contracts(self, contracts: Result<Vec<String>, BackendError>) -> Self {
        *lock(&self.contracts) = Some(contracts);
        self
    }

    /// Hold every search until `gate` is notified
    #[must_use]
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<SearchRequest> {
        lock(&self.requests).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError> {
        lock(&self.requests).push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let scripted = lock(&self.responses).pop_front();
        scripted.unwrap_or_else(|| {
            Ok(SearchResponse {
                answer: format!("answer to {}", request.query),
                file: request
                    .file_name
                    .clone()
                    .unwrap_or_else(|| crate::search::ALL_CONTRACTS.to_string()),
                preview_chunks: Vec::new(),
                category: None,
            })
        })
    }

    async fn contracts(&self) -> Result<Vec<String>, BackendError> {
        lock(&self.contracts).take().unwrap_or_else(|| Ok(Vec::new()))
    }
}
