use std::time::Duration;

use anyhow::Result;
use comfy_table::Table;
use tracing::info_span;

use recon_cli::pipeline::{OracleMode, RunResult, build_oracle, run_pipeline};
use recon_model::{DatasetRole, OutputColumn};
use recon_report::{ExportFormat, ExportOptions};

use crate::cli::{OutputFormatArg, ReconcileArgs};
use crate::summary::apply_table_style;

pub fn run_columns() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Dataset", "Column", "Role"]);
    apply_table_style(&mut table);
    for role in [DatasetRole::Reference, DatasetRole::Target] {
        for column in role.required_columns() {
            table.add_row(vec![role.as_str(), *column, "required input"]);
        }
    }
    for column in OutputColumn::ALL {
        let role = if column.is_masked() {
            "output, highlighted when changed"
        } else {
            "output"
        };
        table.add_row(vec!["output", column.as_str(), role]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_reconcile(args: &ReconcileArgs) -> Result<RunResult> {
    let span = info_span!("run", dry_run = args.dry_run, offline = args.offline);
    let _guard = span.enter();

    let mode = if args.offline {
        OracleMode::Offline
    } else {
        OracleMode::remote(
            args.api_key.clone(),
            &args.oracle_url,
            &args.model,
            Duration::from_secs(args.oracle_timeout),
        )
    };
    let oracle = build_oracle(&mode)?;

    let export_options = (!args.dry_run).then(|| export_options(args));
    run_pipeline(
        &args.reference,
        &args.target,
        oracle.as_ref(),
        export_options.as_ref(),
        args.preview,
    )
}

fn export_options(args: &ReconcileArgs) -> ExportOptions {
    let mut options = ExportOptions::new(&args.output).with_format(export_format(args.format));
    if let Some(path) = &args.mask_json {
        options = options.with_mask_json(path);
    }
    options
}

fn export_format(format: OutputFormatArg) -> ExportFormat {
    match format {
        OutputFormatArg::Xlsx => ExportFormat::Xlsx,
        OutputFormatArg::Csv => ExportFormat::Csv,
        OutputFormatArg::Both => ExportFormat::Both,
    }
}
