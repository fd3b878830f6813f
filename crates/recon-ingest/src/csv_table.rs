//! Delimited-text loading.

use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reads a CSV file into a raw table. The first non-blank record is the header.
///
/// Only headers are normalized. Cell text is kept byte for byte so that the
/// resolvers see exactly what the file holds.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match headers {
            None => headers = Some(record.iter().map(normalize_header).collect()),
            Some(_) => rows.push(record.iter().map(str::to_string).collect()),
        }
    }
    let headers = headers.ok_or_else(|| IngestError::EmptyInput {
        path: path.to_path_buf(),
    })?;
    Ok(RawTable { headers, rows })
}

/// Reads a CSV file into a frame of nullable text columns.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    read_csv_table(path)?.into_frame()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_collapse_whitespace_and_bom() {
        assert_eq!(normalize_header("\u{feff}HCP  ID "), "HCP ID");
        assert_eq!(normalize_header(" Medication\tAdherence % "), "Medication Adherence %");
    }
}
