//! Output formatting for CLI display
//!
//! Plain-text renderings of history entries for the interactive shell. Every
//! function returns a `String`; printing is left to the caller.

use colored::Colorize;

use crate::models::{HistoryItem, ViewMode};

/// Longest question prefix shown in list rows
pub const TITLE_WIDTH: usize = 18;

/// Question shortened for list display
#[must_use]
pub fn title(question: &str) -> String {
    if question.chars().count() > TITLE_WIDTH {
        let head: String = question.chars().take(TITLE_WIDTH).collect();
        format!("{head}...")
    } else {
        question.to_string()
    }
}

/// One list row: number, selection tick, bookmark star, title
#[must_use]
pub fn list_row(index: usize, item: &HistoryItem, selected: bool, focused: bool) -> String {
    let tick = if selected { "[x]" } else { "[ ]" };
    let star = if item.bookmark {
        "★".yellow().to_string()
    } else {
        "☆".dimmed().to_string()
    };
    let title = title(&item.question);
    let title = if focused { title.bold().to_string() } else { title };
    format!("{:>3} {tick} {star} {title}", index + 1)
}

/// Placeholder shown for an empty view
#[must_use]
pub const fn empty_view(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::History => "No history yet",
        ViewMode::Bookmarks => "No bookmarks",
    }
}

/// Full rendering of one entry: contract, question, answer, evidence
#[must_use]
pub fn detail(item: &HistoryItem) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Contract:".cyan().bold(), item.file));
    out.push_str(&format!("{}\n{}\n\n", "Question:".cyan().bold(), item.question));
    out.push_str(&format!("{}\n{}\n\n", "Answer:".cyan().bold(), item.answer));
    out.push_str(&format!("{}\n", "Evidence:".cyan().bold()));

    if item.preview_chunks.is_empty() {
        out.push_str("  (no chunks retrieved)\n");
    }
    for chunk in &item.preview_chunks {
        let location = match chunk.page {
            Some(page) => format!("{} p.{page}", chunk.file),
            None => chunk.file.clone(),
        };
        out.push_str(&format!("  - {} {}\n", format!("[{location}]").dimmed(), chunk.preview));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChunkPreview;

    #[test]
    fn test_title_truncates_by_chars() {
        assert_eq!(title("short"), "short");
        let korean = "계약 해지 조건은 무엇인가요 그리고 위약금은 얼마인가요";
        let shown = title(korean);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), TITLE_WIDTH + 3);
    }

    #[test]
    fn test_list_row_numbers_from_one() {
        colored::control::set_override(false);
        let item = HistoryItem::new("Q", "A", "f.pdf", vec![]);
        assert_eq!(list_row(0, &item, true, false), "  1 [x] ☆ Q");
    }

    #[test]
    fn test_detail_lists_chunks() {
        colored::control::set_override(false);
        let item = HistoryItem::new(
            "Q",
            "A",
            "f.pdf",
            vec![
                ChunkPreview { file: "f.pdf".into(), page: Some(3), preview: "text".into() },
                ChunkPreview { file: "g.pdf".into(), page: None, preview: "more".into() },
            ],
        );
        let text = detail(&item);
        assert!(text.contains("[f.pdf p.3] text"));
        assert!(text.contains("[g.pdf] more"));
    }

    #[test]
    fn test_empty_view_messages() {
        assert_eq!(empty_view(ViewMode::History), "No history yet");
        assert_eq!(empty_view(ViewMode::Bookmarks), "No bookmarks");
    }
}
