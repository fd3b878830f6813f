use std::fs;
use std::path::Path;

use recon_model::ReconciliationOutput;

use crate::error::{ExportError, Result};

/// Writes the change mask as a JSON array with one object per row, keyed by
/// output column name.
pub fn write_mask_json(output: &ReconciliationOutput, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(output.mask())?;
    fs::write(path, format!("{json}\n")).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
