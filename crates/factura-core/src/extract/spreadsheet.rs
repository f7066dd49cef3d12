//! Spreadsheet normalization into inference-ready plain text.
//!
//! The model receives workbooks as text: one delimited section per sheet, in
//! the workbook's native sheet order, each rendered as comma-separated
//! values.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, DataType, Reader};

use crate::error::SpreadsheetError;

/// Render every sheet of a workbook as a sectioned CSV text blob.
///
/// Accepts any container calamine can sniff (`.xlsx`, `.xls`, ods). Fails
/// with [`SpreadsheetError::Workbook`] when the bytes are not a readable
/// workbook.
pub fn sheets_to_text(bytes: &[u8]) -> Result<String, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_names = workbook.sheet_names().to_vec();

    let mut text = String::new();
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .ok_or_else(|| SpreadsheetError::Sheet {
                name: name.clone(),
                reason: "sheet listed but not present".to_string(),
            })?
            .map_err(|err| SpreadsheetError::Sheet {
                name: name.clone(),
                reason: err.to_string(),
            })?;

        text.push_str(&format!("\n=== Sheet: {name} ===\n"));
        for row in range.rows() {
            let line: Vec<String> = row.iter().map(csv_cell).collect();
            text.push_str(&line.join(","));
            text.push('\n');
        }
    }

    Ok(text)
}

fn csv_cell(cell: &DataType) -> String {
    let value = cell_to_string(cell);
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
