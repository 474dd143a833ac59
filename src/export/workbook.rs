//! Excel (`.xlsx`) rendering of history items
//!
//! A minimal SpreadsheetML package with a single sheet named
//! [`SHEET_NAME`]. Row 1 holds the localised column headers, then one row
//! per item with columns question / answer / file / bookmark (`Y` or `N`).
//! Cells are inline strings, so no shared-string table or style part is
//! needed; line breaks inside an answer are kept.

use crate::export::package::{XML_DECLARATION, escape_xml, write_package};
use crate::export::{ExportError, Labels, bookmark_flag};
use crate::models::HistoryItem;

/// Name of the worksheet holding the history rows
pub const SHEET_NAME: &str = "검색기록";

const COLUMNS: [char; 4] = ['A', 'B', 'C', 'D'];

const CONTENT_TYPES: &str = concat!(
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"</Types>"#,
);

const PACKAGE_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#,
);

const WORKBOOK_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"</Relationships>"#,
);

const SHEET_OPEN: &str = concat!(
    r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<sheetData>"#,
);

const SHEET_CLOSE: &str = "</sheetData></worksheet>";

fn workbook_xml() -> String {
    format!(
        concat!(
            "{}",
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        XML_DECLARATION,
        escape_xml(SHEET_NAME)
    )
}

fn write_row(out: &mut String, row: usize, cells: [&str; 4]) {
    out.push_str(&format!(r#"<row r="{row}">"#));
    for (column, value) in COLUMNS.iter().zip(cells) {
        out.push_str(&format!(
            r#"<c r="{column}{row}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
            escape_xml(value)
        ));
    }
    out.push_str("</row>");
}

/// Worksheet XML (`xl/worksheets/sheet1.xml`): header row, then items in input order
#[must_use]
pub fn sheet_xml(items: &[&HistoryItem], labels: &Labels) -> String {
    let mut xml = format!("{XML_DECLARATION}{SHEET_OPEN}");
    write_row(&mut xml, 1, labels.columns);
    for (i, item) in items.iter().enumerate() {
        write_row(
            &mut xml,
            i + 2,
            [
                item.question.as_str(),
                item.answer.as_str(),
                item.file.as_str(),
                bookmark_flag(item.bookmark),
            ],
        );
    }
    xml.push_str(SHEET_CLOSE);
    xml
}

/// Package `items` as a single-sheet `.xlsx` workbook
///
/// # Errors
///
/// Returns `ExportError::Zip` or `ExportError::Io` if the container cannot be
/// written.
pub fn write_workbook(items: &[&HistoryItem], labels: &Labels) -> Result<Vec<u8>, ExportError> {
    let content_types = format!("{XML_DECLARATION}{CONTENT_TYPES}");
    let package_rels = format!("{XML_DECLARATION}{PACKAGE_RELS}");
    let workbook_rels = format!("{XML_DECLARATION}{WORKBOOK_RELS}");
    let workbook = workbook_xml();
    let sheet = sheet_xml(items, labels);

    write_package(&[
        ("[Content_Types].xml", content_types.as_str()),
        ("_rels/.rels", package_rels.as_str()),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", workbook_rels.as_str()),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ])
}
