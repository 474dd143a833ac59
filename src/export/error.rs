//! Export-specific error types
//!
//! # Error Types
//!
//! - **`EmptySelection`**: nothing was selected; the export is refused
//! - **`Csv`**: the CSV writer failed
//! - **`Zip`**: the workbook or document container could not be assembled
//! - **`Io`**: writing into the in-memory buffer or onto disk failed
//! - **`Selection`**: the selection no longer matches the history view

use thiserror::Error;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export requested with no selected items
    #[error("Select at least one history item to export")]
    EmptySelection,

    /// CSV encoding error
    #[error("Error while writing table: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook or document container error
    #[error("Error while packaging workbook or document: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Selected indices do not resolve against the current view
    #[error("Invalid selection: {0}")]
    Selection(#[from] crate::history::HistoryError),

    /// Unknown export format name
    #[error("Unknown export format '{0}' (expected 'xlsx', 'csv' or 'docx')")]
    UnknownFormat(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
