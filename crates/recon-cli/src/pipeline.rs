//! Stages behind `hcp-recon reconcile`: ingest, reconcile, export.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use recon_core::{RunStats, reconcile_frames};
use recon_ingest::load_dataset;
use recon_map::{ChatOracle, DisabledOracle, MatchingOracle, OracleConfig};
use recon_model::ReconciliationOutput;
use recon_report::{ExportOptions, export, preview_frame};

/// How unmatched values are looked up.
#[derive(Debug, Clone)]
pub enum OracleMode {
    /// No lookups; every oracle query finds nothing.
    Offline,
    /// Chat-completions service.
    Remote(OracleConfig),
}

impl OracleMode {
    /// Remote mode from CLI-level settings.
    pub fn remote(
        api_key: Option<String>,
        endpoint: &str,
        model: &str,
        timeout: Duration,
    ) -> Self {
        let mut config = OracleConfig::default()
            .with_endpoint(endpoint)
            .with_model(model)
            .with_timeout(timeout);
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        Self::Remote(config)
    }
}

/// Builds the oracle for `mode`.
///
/// Remote mode without a credential is an error rather than a silent
/// fallback to offline.
pub fn build_oracle(mode: &OracleMode) -> Result<Box<dyn MatchingOracle>> {
    match mode {
        OracleMode::Offline => {
            warn!("matching service disabled; unmatched names and IDs are not looked up");
            Ok(Box::new(DisabledOracle))
        }
        OracleMode::Remote(config) => {
            let oracle = ChatOracle::new(config.clone()).context(
                "configure matching service (pass --api-key, set OPENAI_API_KEY, or use --offline)",
            )?;
            info!(
                endpoint = %config.endpoint,
                model = %config.model,
                timeout_secs = config.timeout.as_secs(),
                "matching service configured"
            );
            Ok(Box::new(oracle))
        }
    }
}

/// Loaded input frames.
pub struct IngestResult {
    pub reference: DataFrame,
    pub target: DataFrame,
}

pub fn ingest(reference: &Path, target: &Path) -> Result<IngestResult> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let reference_df = load_dataset(reference)
        .with_context(|| format!("load reference dataset {}", reference.display()))?;
    let target_df = load_dataset(target)
        .with_context(|| format!("load target dataset {}", target.display()))?;
    Ok(IngestResult {
        reference: reference_df,
        target: target_df,
    })
}

/// Everything a finished run reports.
#[derive(Debug)]
pub struct RunResult {
    pub reference: PathBuf,
    pub target: PathBuf,
    pub output: ReconciliationOutput,
    pub stats: RunStats,
    /// Files written; empty on a dry run.
    pub written: Vec<PathBuf>,
    /// First rows of the cleaned table.
    pub preview: DataFrame,
}

/// Runs ingest, reconciliation, and (unless `export_options` is `None`) export.
pub fn run_pipeline(
    reference: &Path,
    target: &Path,
    oracle: &dyn MatchingOracle,
    export_options: Option<&ExportOptions>,
    preview_rows: usize,
) -> Result<RunResult> {
    let inputs = ingest(reference, target)?;
    let run = reconcile_frames(&inputs.reference, &inputs.target, oracle)
        .context("reconcile datasets")?;

    let written = match export_options {
        Some(options) => export(&run.output, options).context("write outputs")?,
        None => {
            info!("dry run: no files written");
            Vec::new()
        }
    };
    let preview = preview_frame(&run.output, preview_rows).context("build preview")?;

    Ok(RunResult {
        reference: reference.to_path_buf(),
        target: target.to_path_buf(),
        output: run.output,
        stats: run.stats,
        written,
        preview,
    })
}
