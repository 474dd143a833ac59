//! CSV rendering of history items
//!
//! The output starts with a UTF-8 byte order mark so spreadsheet programs
//! decode the Korean labels and answers correctly.

use crate::export::{ExportError, Labels, bookmark_flag};
use crate::models::HistoryItem;

/// UTF-8 byte order mark written before the header row
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write a header row plus one row per item, in input order
///
/// # Errors
///
/// Returns `ExportError::Csv` if a record cannot be written, or
/// `ExportError::Io` if the writer cannot be flushed.
pub fn write_csv(items: &[&HistoryItem], labels: &Labels) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(labels.columns)?;

    for item in items {
        writer.write_record([
            item.question.as_str(),
            item.answer.as_str(),
            item.file.as_str(),
            bookmark_flag(item.bookmark),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HistoryItem, Language};

    fn read_rows(bytes: &[u8]) -> Vec<Vec<String>> {
        let body = bytes.strip_prefix(UTF8_BOM).expect("missing byte order mark");
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(body);
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_header_and_rows_in_order() {
        let mut first = HistoryItem::new("Q1", "A1", "lease.pdf", vec![]);
        first.bookmark = true;
        let second = HistoryItem::new("Q2", "A2", "nda.pdf", vec![]);

        let bytes = write_csv(&[&first, &second], &Labels::for_language(Language::En)).unwrap();
        let rows = read_rows(&bytes);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Question", "AI Answer", "Contract", "Bookmarked"]);
        assert_eq!(rows[1], vec!["Q1", "A1", "lease.pdf", "Y"]);
        assert_eq!(rows[2], vec!["Q2", "A2", "nda.pdf", "N"]);
    }

    #[test]
    fn test_korean_header_after_bom() {
        let item = HistoryItem::new("해지 조건?", "30일 전 통지", "계약서.pdf", vec![]);
        let bytes = write_csv(&[&item], &Labels::for_language(Language::Ko)).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let rows = read_rows(&bytes);
        assert_eq!(rows[0], vec!["질문", "AI 답변", "선택한 계약서", "북마크 여부"]);
        assert_eq!(rows[1][0], "해지 조건?");
    }

    #[test]
    fn test_multiline_answer_is_quoted() {
        let item = HistoryItem::new("Q", "line one\nline \"two\", end", "f.pdf", vec![]);
        let bytes = write_csv(&[&item], &Labels::for_language(Language::En)).unwrap();
        let rows = read_rows(&bytes);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], "line one\nline \"two\", end");
    }
}
