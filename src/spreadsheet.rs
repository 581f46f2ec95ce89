/*!
 * Row extraction from XML spreadsheet documents.
 *
 * Input files use the XML Spreadsheet dialect:
 *
 * ```xml
 * <Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet">
 *   <Worksheet>
 *     <Table>
 *       <Row><Cell><Data>...</Data></Cell>...</Row>
 *     </Table>
 *   </Worksheet>
 * </Workbook>
 * ```
 *
 * The first eight rows of the table hold metadata and are skipped. Every
 * remaining row becomes one translation row.
 */

use anyhow::{Context, Result};
use roxmltree::{Document, Node, ParsingOptions};
use std::path::Path;

use crate::errors::SpreadsheetError;
use crate::file_utils::FileManager;
use crate::translation::row::TranslationRow;

/// Namespace of the spreadsheet dialect
pub const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Metadata rows at the top of every table
pub const HEADER_ROWS: usize = 8;

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.has_tag_name((SPREADSHEET_NS, name)))
}

/// Flatten every data row of `xml` into its cell texts.
///
/// Each element inside each cell contributes its leading text, or `None` when
/// it has none. The field count is not checked here.
pub fn parse_rows(xml: &str) -> Result<Vec<Vec<Option<String>>>, SpreadsheetError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    let sheet = child(doc.root_element(), "Worksheet").ok_or(SpreadsheetError::MissingWorksheet)?;
    let table = child(sheet, "Table").ok_or(SpreadsheetError::MissingTable)?;

    let rows: Vec<Vec<Option<String>>> = table
        .children()
        .filter(|n| n.is_element() && n.has_tag_name((SPREADSHEET_NS, "Row")))
        .skip(HEADER_ROWS)
        .map(|row| {
            row.children()
                .filter(Node::is_element)
                .flat_map(|cell| cell.children().filter(Node::is_element))
                .map(|data| data.text().map(str::to_string))
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(rows)
}

/// Parse `xml` into translation rows.
pub fn parse_document(xml: &str) -> Result<Vec<TranslationRow>, SpreadsheetError> {
    parse_rows(xml)?
        .into_iter()
        .enumerate()
        .map(|(i, fields)| TranslationRow::from_fields(fields, HEADER_ROWS + i + 1))
        .collect()
}

/// Read the document at `path` and extract its translation rows.
pub fn extract_rows(path: &Path) -> Result<Vec<TranslationRow>> {
    let xml = FileManager::read_to_string(path)?;
    parse_document(&xml).with_context(|| format!("Failed to parse spreadsheet: {:?}", path))
}
