use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use recon_model::ReconciliationOutput;

use crate::csv_export::write_csv;
use crate::error::{ExportError, Result};
use crate::mask::write_mask_json;
use crate::xlsx::write_xlsx;

/// Default output location.
pub const DEFAULT_OUTPUT: &str = "output/cleaned_xponent.xlsx";

/// Which table formats to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Both,
}

/// Where and how to write a run's output.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output: PathBuf,
    pub format: ExportFormat,
    /// Also write the change mask as JSON here.
    pub mask_json: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ExportFormat::default(),
            mask_json: None,
        }
    }
}

impl ExportOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_mask_json(mut self, path: impl Into<PathBuf>) -> Self {
        self.mask_json = Some(path.into());
        self
    }

    /// Table paths that [`export`] will write.
    ///
    /// A single format writes to `output` as given; `Both` swaps the
    /// extension per format.
    pub fn table_paths(&self) -> Vec<(ExportFormat, PathBuf)> {
        match self.format {
            ExportFormat::Xlsx | ExportFormat::Csv => vec![(self.format, self.output.clone())],
            ExportFormat::Both => vec![
                (ExportFormat::Xlsx, self.output.with_extension("xlsx")),
                (ExportFormat::Csv, self.output.with_extension("csv")),
            ],
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| ExportError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Writes every artifact requested by `options`; returns the written paths.
pub fn export(output: &ReconciliationOutput, options: &ExportOptions) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (format, path) in options.table_paths() {
        ensure_parent_dir(&path)?;
        match format {
            ExportFormat::Csv => write_csv(output, &path)?,
            ExportFormat::Xlsx | ExportFormat::Both => write_xlsx(output, &path)?,
        }
        written.push(path);
    }
    if let Some(path) = &options.mask_json {
        ensure_parent_dir(path)?;
        write_mask_json(output, path)?;
        written.push(path.clone());
    }
    info!(files = written.len(), rows = output.len(), "export complete");
    Ok(written)
}
