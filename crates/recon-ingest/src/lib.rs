//! Loading of reference and target datasets.
//!
//! Files are read into polars frames of nullable text columns, then
//! validated and turned into typed records for the reconciler.

pub mod csv_table;
pub mod error;
pub mod polars_utils;
pub mod records;
pub mod spreadsheet;
pub mod table;

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::{debug, info};

pub use csv_table::{read_csv_frame, read_csv_table};
pub use error::{IngestError, Result};
pub use polars_utils::{any_to_text, column_text, format_numeric};
pub use records::{reference_records, require_columns, target_records};
pub use spreadsheet::{read_spreadsheet_frame, read_spreadsheet_table};
pub use table::RawTable;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Spreadsheet,
}

impl InputFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            _ => None,
        }
    }
}

/// Loads a dataset file into a frame of nullable text columns.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = InputFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    debug!(path = %path.display(), ?format, "loading dataset");
    let df = match format {
        InputFormat::Csv => read_csv_frame(path)?,
        InputFormat::Spreadsheet => read_spreadsheet_frame(path)?,
    };
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "dataset loaded"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("veeva.XLSX")),
            Some(InputFormat::Spreadsheet)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("xponent.csv")),
            Some(InputFormat::Csv)
        );
        assert_eq!(InputFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(InputFormat::from_path(Path::new("no_extension")), None);
    }
}
