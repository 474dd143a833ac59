//! contract-ask - question answering over a contract corpus
//!
//! This library holds the client-side core of a contract Q&A tool: a bounded,
//! bookmark-aware history of question/answer pairs, an index-based export
//! selection, a search orchestrator talking to a remote retrieval backend, and
//! an export pipeline producing tabular (CSV) and document (DOCX) artifacts.
//!
//! [`session::Session`] ties the pieces together the way a front end drives them.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod export;
pub mod history;
pub mod models;
pub mod output;
pub mod search;
pub mod session;
pub mod shell;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AskError {
    /// History or selection error
    #[error("History error: {0}")]
    HistoryError(#[from] history::HistoryError),
    /// Search error
    #[error("Search error: {0}")]
    SearchError(#[from] search::SearchError),
    /// Search backend error outside a search (e.g. client construction)
    #[error("Backend error: {0}")]
    BackendError(#[from] search::BackendError),
    /// Export error
    #[error("Export error: {0}")]
    ExportError(#[from] export::ExportError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Clipboard could not be accessed
    #[error("Clipboard error: {0}")]
    ClipboardError(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions_keep_messages() {
        let err: AskError = history::HistoryError::IndexOutOfRange { index: 4, len: 2 }.into();
        assert!(matches!(err, AskError::HistoryError(_)));
        assert!(err.to_string().starts_with("History error: "));

        let err: AskError = search::SearchError::Busy.into();
        assert!(matches!(err, AskError::SearchError(search::SearchError::Busy)));

        let err: AskError = export::ExportError::EmptySelection.into();
        assert!(err.to_string().starts_with("Export error: "));
    }

    #[test]
    fn test_invalid_input_message() {
        let err = AskError::InvalidInput("unknown contract 'x.pdf'".into());
        assert_eq!(err.to_string(), "Invalid input: unknown contract 'x.pdf'");
    }
}
