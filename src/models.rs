//! Value types shared by the history, search and export subsystems
//!
//! These records carry no behaviour beyond construction helpers. A
//! `HistoryItem` is written once by the search orchestrator; afterwards only
//! its `bookmark` flag changes, and only through `HistoryStore`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Backend snippet prefix: `"<n>. [<TAG>] [<file> / p.<page>] <text>"`
static SNIPPET_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\.\s*\[[^\]]*\]\s*\[(?P<file>[^\]]+?) / p\.(?P<page>\d+)\]")
        .expect("snippet prefix pattern is valid")
});

/// Opaque, stable identifier of a history entry
///
/// Assigned once at construction and never reused. Positions in the store's
/// view change on every re-sort; the id does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A short excerpt of a source document cited as evidence for an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPreview {
    /// Source document the excerpt came from
    pub file: String,
    /// Page within the source document, when the backend reported one
    pub page: Option<u32>,
    /// Excerpt text, verbatim from the backend
    pub preview: String,
}

impl ChunkPreview {
    /// Build a preview from one backend snippet string
    ///
    /// The snippet text is kept verbatim. File and page are recovered from the
    /// backend's `[<file> / p.<page>]` prefix when present; otherwise `file`
    /// falls back to `fallback_file` and `page` stays unknown. The backend
    /// writes `p.0` when it has no page metadata, so page 0 is also unknown.
    #[must_use]
    pub fn from_snippet(snippet: &str, fallback_file: &str) -> Self {
        let (file, page) = match SNIPPET_PREFIX.captures(snippet) {
            Some(caps) => {
                let file = caps
                    .name("file")
                    .map_or(fallback_file, |m| m.as_str().trim());
                let page = caps
                    .name("page")
                    .and_then(|m| m.as_str().parse::<u32>().ok())
                    .filter(|&p| p > 0);
                (file.to_string(), page)
            }
            None => (fallback_file.to_string(), None),
        };

        Self {
            file,
            page,
            preview: snippet.to_string(),
        }
    }
}

/// One completed question/answer exchange plus its supporting evidence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// Stable identity, never exported
    pub id: ItemId,
    pub question: String,
    pub answer: String,
    /// Contract the answer was drawn from (or the "all contracts" label)
    pub file: String,
    pub bookmark: bool,
    pub preview_chunks: Vec<ChunkPreview>,
}

impl HistoryItem {
    /// Create a new, unbookmarked item
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        file: impl Into<String>,
        preview_chunks: Vec<ChunkPreview>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            question: question.into(),
            answer: answer.into(),
            file: file.into(),
            bookmark: false,
            preview_chunks,
        }
    }
}

/// Answer language requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Korean
    #[default]
    Ko,
    /// English
    En,
}

impl Language {
    /// Wire tag sent as `answer_lang`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" => Ok(Self::Ko),
            "en" | "english" => Ok(Self::En),
            other => Err(format!("Unknown language '{other}' (expected 'ko' or 'en')")),
        }
    }
}

/// Restriction of a search to one contract
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileFilter {
    /// Search the whole corpus
    #[default]
    All,
    /// Search a single contract by file name
    File(String),
}

impl FileFilter {
    /// File name to send to the backend (`None` means no filter)
    #[must_use]
    pub fn target_file(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::File(name) => Some(name),
        }
    }
}

/// Which projection of the history the user is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Every entry, bookmarked first
    #[default]
    History,
    /// Bookmarked entries only
    Bookmarks,
}
