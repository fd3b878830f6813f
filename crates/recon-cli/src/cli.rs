//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use recon_map::chat::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use recon_report::DEFAULT_OUTPUT;

#[derive(Parser)]
#[command(
    name = "hcp-recon",
    version,
    about = "Reconcile HCP, drug, and GPO records against a reference dataset",
    long_about = "Reconcile a target dataset (e.g. an Xponent extract) against a trusted \
                  reference dataset (e.g. a Veeva extract).\n\n\
                  Adherence values are bucketed, HCP IDs cleaned and corrected, drug names \
                  matched, and missing GPO affiliations imputed. Changed cells are \
                  highlighted in the XLSX output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include HCP IDs and drug names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile a target dataset against a reference dataset.
    Reconcile(ReconcileArgs),

    /// List required input columns and produced output columns.
    Columns,
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// Reference dataset (CSV or spreadsheet) with HCP ID, Product Name, Customer Group.
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Target dataset (CSV or spreadsheet) to clean.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output file for the cleaned table.
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output table format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: OutputFormatArg,

    /// Also write the per-cell change mask as JSON.
    #[arg(long = "mask-json", value_name = "PATH")]
    pub mask_json: Option<PathBuf>,

    /// Skip the matching service; unmatched values fall back without a lookup.
    #[arg(long = "offline")]
    pub offline: bool,

    /// Credential for the matching service.
    #[arg(
        long = "api-key",
        env = "OPENAI_API_KEY",
        hide_env_values = true,
        value_name = "KEY"
    )]
    pub api_key: Option<String>,

    /// Model name sent to the matching service.
    #[arg(long = "model", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Chat-completions endpoint of the matching service.
    #[arg(long = "oracle-url", value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub oracle_url: String,

    /// Per-request timeout for the matching service, in seconds.
    #[arg(long = "oracle-timeout", value_name = "SECS", default_value_t = 30)]
    pub oracle_timeout: u64,

    /// Number of cleaned rows to print after the run.
    #[arg(long = "preview", value_name = "N", default_value_t = 5)]
    pub preview: usize,

    /// Reconcile and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Xlsx,
    Csv,
    Both,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
