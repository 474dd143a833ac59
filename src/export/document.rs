//! Word (`.docx`) rendering of history items
//!
//! The package is a minimal WordprocessingML container: content types, the
//! package relationship and `word/document.xml`. Each item contributes six
//! paragraphs in a fixed order:
//!
//! ```text
//! [Question]          bold, 14pt
//! <question text>
//! [AI Answer]         bold, 14pt
//! <answer text>       line breaks kept
//! (File: <file>)      grey, 10pt
//! ─────────────       bottom-bordered separator
//! ```

use crate::export::package::{XML_DECLARATION, escape_xml, write_package};
use crate::export::{ExportError, Labels};
use crate::models::HistoryItem;

const CONTENT_TYPES: &str = concat!(
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#,
);

const PACKAGE_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#,
);

const DOCUMENT_OPEN: &str = concat!(
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:body>"#,
);

const DOCUMENT_CLOSE: &str = r#"<w:sectPr/></w:body></w:document>"#;

/// Label font size in half-points (14pt)
const LABEL_SIZE: u32 = 28;
/// Attribution font size in half-points (10pt)
const SOURCE_SIZE: u32 = 20;
const SOURCE_COLOR: &str = "888888";

/// One paragraph with a single run
#[derive(Debug, Default)]
struct Paragraph<'a> {
    text: &'a str,
    bold: bool,
    size: Option<u32>,
    color: Option<&'a str>,
    /// Spacing before / after in twentieths of a point
    before: u32,
    after: u32,
    separator: bool,
}

impl Paragraph<'_> {
    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:p><w:pPr>");
        if self.separator {
            out.push_str(
                r#"<w:pBdr><w:bottom w:val="single" w:sz="6" w:space="1" w:color="auto"/></w:pBdr>"#,
            );
        }
        out.push_str(&format!(
            r#"<w:spacing w:before="{}" w:after="{}"/>"#,
            self.before, self.after
        ));
        out.push_str("</w:pPr>");

        if self.text.is_empty() {
            out.push_str("</w:p>");
            return;
        }

        out.push_str("<w:r>");
        if self.bold || self.size.is_some() || self.color.is_some() {
            out.push_str("<w:rPr>");
            if self.bold {
                out.push_str("<w:b/>");
            }
            if let Some(color) = self.color {
                out.push_str(&format!(r#"<w:color w:val="{color}"/>"#));
            }
            if let Some(size) = self.size {
                out.push_str(&format!(r#"<w:sz w:val="{size}"/>"#));
            }
            out.push_str("</w:rPr>");
        }

        for (i, line) in self.text.split('\n').enumerate() {
            if i > 0 {
                out.push_str("<w:br/>");
            }
            out.push_str(r#"<w:t xml:space="preserve">"#);
            out.push_str(&escape_xml(line.trim_end_matches('\r')));
            out.push_str("</w:t>");
        }
        out.push_str("</w:r></w:p>");
    }
}

/// The six paragraphs of one item's block
fn item_block<'a>(item: &'a HistoryItem, labels: &'a Labels, source: &'a str) -> [Paragraph<'a>; 6] {
    [
        Paragraph {
            text: labels.question,
            bold: true,
            size: Some(LABEL_SIZE),
            before: 200,
            after: 100,
            ..Paragraph::default()
        },
        Paragraph {
            text: &item.question,
            after: 300,
            ..Paragraph::default()
        },
        Paragraph {
            text: labels.answer,
            bold: true,
            size: Some(LABEL_SIZE),
            after: 100,
            ..Paragraph::default()
        },
        Paragraph {
            text: &item.answer,
            after: 300,
            ..Paragraph::default()
        },
        Paragraph {
            text: source,
            size: Some(SOURCE_SIZE),
            color: Some(SOURCE_COLOR),
            after: 200,
            ..Paragraph::default()
        },
        Paragraph {
            separator: true,
            before: 400,
            after: 400,
            ..Paragraph::default()
        },
    ]
}

/// Body XML (`word/document.xml`) for `items`, blocks in input order
#[must_use]
pub fn document_xml(items: &[&HistoryItem], labels: &Labels) -> String {
    let mut xml = format!("{XML_DECLARATION}{DOCUMENT_OPEN}");
    for item in items {
        let source = labels.source_line(&item.file);
        for paragraph in item_block(item, labels, &source) {
            paragraph.write_xml(&mut xml);
        }
    }
    xml.push_str(DOCUMENT_CLOSE);
    xml
}

/// Package `items` as a single `.docx` file
///
/// # Errors
///
/// Returns `ExportError::Zip` or `ExportError::Io` if the container cannot be
/// written.
pub fn write_document(items: &[&HistoryItem], labels: &Labels) -> Result<Vec<u8>, ExportError> {
    let content_types = format!("{XML_DECLARATION}{CONTENT_TYPES}");
    let rels = format!("{XML_DECLARATION}{PACKAGE_RELS}");
    let body = document_xml(items, labels);
    write_package(&[
        ("[Content_Types].xml", content_types.as_str()),
        ("_rels/.rels", rels.as_str()),
        ("word/document.xml", body.as_str()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use std::io::{Cursor, Read};

    fn unpack(bytes: Vec<u8>, part: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(part).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_contains_required_parts() {
        let item = HistoryItem::new("Q", "A", "f.pdf", vec![]);
        let bytes = write_document(&[&item], &Labels::for_language(Language::En)).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"[Content_Types].xml"));
        assert!(names.contains(&"_rels/.rels"));
        assert!(names.contains(&"word/document.xml"));
    }

    #[test]
    fn test_blocks_follow_input_order() {
        let first = HistoryItem::new("First question", "First answer", "a.pdf", vec![]);
        let second = HistoryItem::new("Second question", "Second answer", "b.pdf", vec![]);
        let bytes =
            write_document(&[&first, &second], &Labels::for_language(Language::En)).unwrap();
        let xml = unpack(bytes, "word/document.xml");

        let order = [
            "[Question]",
            "First question",
            "[AI Answer]",
            "First answer",
            "(File: a.pdf)",
            "Second question",
            "Second answer",
            "(File: b.pdf)",
        ];
        let mut cursor = 0;
        for needle in order {
            let found = xml[cursor..]
                .find(needle)
                .unwrap_or_else(|| panic!("{needle} missing or out of order"));
            cursor += found + needle.len();
        }
        assert_eq!(xml.matches("<w:pBdr>").count(), 2);
    }

    #[test]
    fn test_each_item_yields_six_paragraphs() {
        let item = HistoryItem::new("Q", "A", "f.pdf", vec![]);
        let xml = document_xml(&[&item, &item], &Labels::for_language(Language::Ko));
        assert_eq!(xml.matches("<w:p>").count(), 12);
        assert!(xml.contains("[질문]"));
        assert!(xml.contains("(파일: f.pdf)"));
    }

    #[test]
    fn test_text_is_escaped_and_breaks_kept() {
        let item = HistoryItem::new("A < B & C?", "line1\nline2", "f.pdf", vec![]);
        let xml = document_xml(&[&item], &Labels::for_language(Language::En));
        assert!(xml.contains("A &lt; B &amp; C?"));
        assert!(xml.contains("line1</w:t><w:br/><w:t xml:space=\"preserve\">line2"));
    }

    #[test]
    fn test_labels_are_bold() {
        let item = HistoryItem::new("Q", "A", "f.pdf", vec![]);
        let xml = document_xml(&[&item], &Labels::for_language(Language::En));
        assert!(xml.contains(
            r#"<w:rPr><w:b/><w:sz w:val="28"/></w:rPr><w:t xml:space="preserve">[Question]</w:t>"#
        ));
    }
}
