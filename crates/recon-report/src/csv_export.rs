use std::path::Path;

use tracing::debug;

use recon_model::{OutputColumn, ReconciliationOutput};

use crate::error::{ExportError, Result};

/// Writes the cleaned table as CSV with a header row.
pub fn write_csv(output: &ReconciliationOutput, path: &Path) -> Result<()> {
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer
        .write_record(OutputColumn::ALL.map(|column| column.as_str()))
        .map_err(csv_err)?;
    for row in output.rows() {
        writer.write_record(row.values()).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = output.len(), "wrote CSV output");
    Ok(())
}
