//! Error types for dataset ingestion.

use std::path::PathBuf;

use thiserror::Error;

use recon_model::{DatasetRole, ReconError};

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File extension is not one of the supported formats.
    #[error("unsupported file type for {path}: expected .csv, .xlsx, .xlsm, .xls or .ods")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to open or read a spreadsheet.
    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// Workbook has no worksheets.
    #[error("spreadsheet has no worksheets: {path}")]
    NoWorksheet { path: PathBuf },

    /// File has no header row.
    #[error("no header row found in {path}")]
    EmptyInput { path: PathBuf },

    // === Schema Errors ===
    /// A required column is absent.
    #[error("{dataset} dataset is missing required column '{column}'")]
    MissingColumn {
        dataset: DatasetRole,
        column: String,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<IngestError> for ReconError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::MissingColumn { dataset, column } => {
                ReconError::MissingColumn { dataset, column }
            }
            other => ReconError::Message(other.to_string()),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/veeva.xlsx"),
        };
        assert_eq!(err.to_string(), "input file not found: /path/to/veeva.xlsx");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }

    #[test]
    fn missing_column_keeps_its_shape_in_recon_error() {
        let err: ReconError = IngestError::MissingColumn {
            dataset: DatasetRole::Reference,
            column: "HCP ID".to_string(),
        }
        .into();
        assert!(matches!(err, ReconError::MissingColumn { .. }));
    }
}
