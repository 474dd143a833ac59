//! Export pipeline for selected history items
//!
//! Turns an ordered list of history items into a single in-memory artifact:
//!
//! - **Tabular**: an Excel workbook (`.xlsx`) with one sheet, one row per
//!   item, columns question / answer / file / bookmark (`Y` or `N`)
//! - **Csv**: the same table as UTF-8 CSV with a byte order mark
//! - **Document**: a `.docx` document, one labelled block per item
//!
//! All are pure functions of their input: the same items in the same order
//! always produce the same bytes. No clock is read and no file is written
//! here; choosing a file name and saving the bytes is up to the caller (see
//! [`suggested_file_name`]).
//!
//! # Examples
//!
//! ```
//! use contract_ask::export::{ExportFormat, export};
//! use contract_ask::models::{HistoryItem, Language};
//!
//! let item = HistoryItem::new("Termination terms?", "30 days notice.", "lease.pdf", vec![]);
//! let bytes = export(&[&item], ExportFormat::Csv, Language::En).unwrap();
//! assert!(String::from_utf8_lossy(&bytes).contains("30 days notice."));
//! ```

pub mod delimited;
pub mod document;
pub mod error;
mod package;
pub mod workbook;

pub use error::ExportError;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::{HistoryItem, Language};

/// Prefix of suggested export file names
pub const FILE_NAME_PREFIX: &str = "aSK_selected_history";

/// Target format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Excel workbook
    Tabular,
    /// CSV table
    Csv,
    /// Word document
    Document,
}

impl ExportFormat {
    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Tabular => "xlsx",
            Self::Csv => "csv",
            Self::Document => "docx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "xlsx" | "excel" | "tabular" | "table" => Ok(Self::Tabular),
            "csv" => Ok(Self::Csv),
            "docx" | "doc" | "document" | "word" => Ok(Self::Document),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Bookmark column value of the table formats
pub(crate) const fn bookmark_flag(bookmark: bool) -> &'static str {
    if bookmark { "Y" } else { "N" }
}

/// Fixed, localised labels used by every format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    /// Tabular header row: question, answer, file, bookmark
    pub columns: [&'static str; 4],
    /// Document label preceding the question
    pub question: &'static str,
    /// Document label preceding the answer
    pub answer: &'static str,
    /// Attribution template, `{}` is replaced by the file name
    pub source: &'static str,
}

impl Labels {
    /// Labels for a session language
    #[must_use]
    pub const fn for_language(language: Language) -> Self {
        match language {
            Language::Ko => Self {
                columns: ["질문", "AI 답변", "선택한 계약서", "북마크 여부"],
                question: "[질문]",
                answer: "[AI 답변]",
                source: "(파일: {})",
            },
            Language::En => Self {
                columns: ["Question", "AI Answer", "Contract", "Bookmarked"],
                question: "[Question]",
                answer: "[AI Answer]",
                source: "(File: {})",
            },
        }
    }

    /// Attribution line for one file
    #[must_use]
    pub fn source_line(&self, file: &str) -> String {
        self.source.replacen("{}", file, 1)
    }
}

/// Render `items` in `format`
///
/// # Errors
///
/// - `ExportError::EmptySelection` if `items` is empty
/// - `ExportError::Csv`, `Zip` or `Io` if encoding fails
pub fn export(
    items: &[&HistoryItem],
    format: ExportFormat,
    language: Language,
) -> Result<Vec<u8>, ExportError> {
    if items.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    let labels = Labels::for_language(language);
    let bytes = match format {
        ExportFormat::Tabular => workbook::write_workbook(items, &labels)?,
        ExportFormat::Csv => delimited::write_csv(items, &labels)?,
        ExportFormat::Document => document::write_document(items, &labels)?,
    };

    tracing::info!(%format, items = items.len(), bytes = bytes.len(), "rendered export");
    Ok(bytes)
}

/// File name for an export made on `date`
#[must_use]
pub fn suggested_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{FILE_NAME_PREFIX}_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}
