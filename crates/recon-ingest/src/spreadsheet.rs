//! Spreadsheet loading (first worksheet only).

use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::csv_table::normalize_header;
use crate::error::{IngestError, Result};
use crate::polars_utils::format_numeric;
use crate::table::RawTable;

/// Text form of a spreadsheet cell. Error cells (`#N/A` and friends) read as
/// blank; string cells keep their padding.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => format_numeric(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        other => other.to_string(),
    }
}

/// Reads the first worksheet of a workbook into a raw table.
pub fn read_spreadsheet_table(path: &Path) -> Result<RawTable> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: format!("sheet '{sheet_name}': {e}"),
        })?;
    debug!(
        sheet = %sheet_name,
        height = range.height(),
        width = range.width(),
        "read worksheet"
    );

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for row in range.rows() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        match headers {
            None => headers = Some(cells.iter().map(|h| normalize_header(h)).collect()),
            Some(_) => rows.push(cells),
        }
    }
    let headers = headers.ok_or_else(|| IngestError::EmptyInput {
        path: path.to_path_buf(),
    })?;
    Ok(RawTable { headers, rows })
}

/// Reads the first worksheet of a workbook into a frame of nullable text columns.
pub fn read_spreadsheet_frame(path: &Path) -> Result<DataFrame> {
    read_spreadsheet_table(path)?.into_frame()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_render_like_the_sheet() {
        assert_eq!(cell_text(&Data::Float(12345.0)), "12345");
        assert_eq!(cell_text(&Data::Float(0.8)), "0.8");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String(" DrugA ".to_string())), " DrugA ");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
