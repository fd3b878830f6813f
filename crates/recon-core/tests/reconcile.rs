use std::cell::Cell;
use std::fs;

use polars::prelude::DataFrame;

use recon_core::{Reconciler, reconcile_frames};
use recon_ingest::{RawTable, load_dataset};
use recon_map::{DisabledOracle, MatchKind, MatchingOracle, OracleError, ReferenceIndex};
use recon_model::{
    DatasetRole, NO_CHANGES, OutputColumn, ReconError, ReferenceRecord, TargetRecord,
};
use tempfile::TempDir;

/// Oracle double driven by a closure, counting calls.
struct FnOracle<F> {
    answer: F,
    calls: Cell<usize>,
}

impl<F> FnOracle<F>
where
    F: Fn(MatchKind, &str) -> Result<Option<String>, OracleError>,
{
    fn new(answer: F) -> Self {
        Self {
            answer,
            calls: Cell::new(0),
        }
    }
}

impl<F> MatchingOracle for FnOracle<F>
where
    F: Fn(MatchKind, &str) -> Result<Option<String>, OracleError>,
{
    fn resolve(
        &self,
        kind: MatchKind,
        query: &str,
        _candidates: &[String],
    ) -> Result<Option<String>, OracleError> {
        self.calls.set(self.calls.get() + 1);
        (self.answer)(kind, query)
    }
}

fn frame(headers: &[&str], rows: &[&[&str]]) -> DataFrame {
    RawTable {
        headers: headers.iter().map(|h| (*h).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    }
    .into_frame()
    .expect("frame")
}

fn reference_frame() -> DataFrame {
    frame(
        &["HCP ID", "Product Name", "Customer Group"],
        &[&["12345", "DrugA", "GroupX"]],
    )
}

#[test]
fn end_to_end_single_row() {
    let target = frame(
        &[
            "Medication Adherence %",
            "Drug Name",
            "HCP ID",
            "GPO Affiliation",
        ],
        &[&["80%", "DrugA", "12-345", ""]],
    );
    let oracle = FnOracle::new(|_, _| Ok(None));
    let run = reconcile_frames(&reference_frame(), &target, &oracle).expect("reconcile");

    assert_eq!(oracle.calls.get(), 0);
    assert_eq!(run.stats.oracle_calls, 0);
    let output = run.output;
    assert_eq!(output.len(), 1);
    let row = &output.rows()[0];
    assert_eq!(row.row_label, "Row 1");
    assert_eq!(row.adherence_status, "High");
    assert_eq!(row.drug_name, "DrugA");
    assert_eq!(row.hcp_id, "12345");
    assert_eq!(row.gpo_affiliation, "GroupX");
    insta::assert_snapshot!(
        row.operations,
        @r#"Medication Adherence: Mapped from "80%" to "High", HCP ID: Mapped from "12-345" to "12345", GPO Affiliation: Mapped missing GPO Affiliation for "12-345""#
    );

    let flags: Vec<bool> = OutputColumn::MASKED
        .iter()
        .map(|column| output.is_changed(0, *column))
        .collect();
    assert_eq!(flags, [true, false, true, true]);
}

#[test]
fn padded_cells_from_file_are_reported_as_changes() {
    let dir = TempDir::new().expect("temp dir");
    let reference_path = dir.path().join("veeva.csv");
    let target_path = dir.path().join("xponent.csv");
    fs::write(
        &reference_path,
        "HCP ID,Product Name,Customer Group\n12345,DrugA,GroupX\n54321,DrugB,GroupY\n",
    )
    .expect("write reference");
    fs::write(
        &target_path,
        "Medication Adherence %,Drug Name,HCP ID,GPO Affiliation\n\
         High,DrugA ,\" 12345\",\" GroupY \"\n",
    )
    .expect("write target");
    let reference = load_dataset(&reference_path).expect("load reference");
    let target = load_dataset(&target_path).expect("load target");

    let oracle = FnOracle::new(|_, _| Ok(None));
    let run = reconcile_frames(&reference, &target, &oracle).expect("reconcile");
    let output = run.output;
    let row = &output.rows()[0];

    // "DrugA " is not an exact reference name, so it goes to the oracle.
    assert_eq!(oracle.calls.get(), 1);
    assert_eq!(row.drug_name, "DrugA ");
    assert!(!output.is_changed(0, OutputColumn::DrugName));

    assert_eq!(row.hcp_id, "12345");
    assert!(output.is_changed(0, OutputColumn::HcpId));
    assert_eq!(row.gpo_affiliation, " GroupY ");
    assert!(!output.is_changed(0, OutputColumn::GpoAffiliation));
    insta::assert_snapshot!(row.operations, @r#"HCP ID: Mapped from " 12345" to "12345""#);
}

#[test]
fn invalid_adherence_is_annotated_with_raw_value() {
    let index = ReferenceIndex::build(&[ReferenceRecord::new("12345", "DrugA", "GroupX")]);
    let records = [TargetRecord::new(
        "abc",
        "DrugA",
        "12345",
        Some("GroupX".to_string()),
    )];
    let output = Reconciler::new(&index, &DisabledOracle)
        .reconcile(&records)
        .expect("reconcile");
    let row = &output.rows()[0];
    assert_eq!(row.adherence_status, "Invalid");
    assert!(output.is_changed(0, OutputColumn::AdherenceStatus));
    assert!(row.operations.contains("abc"));
    assert!(!output.is_changed(0, OutputColumn::GpoAffiliation));
}

#[test]
fn unchanged_row_reports_no_changes() {
    let index = ReferenceIndex::build(&[ReferenceRecord::new("12345", "DrugA", "GroupX")]);
    let records = [TargetRecord::new(
        " high ",
        "DrugA",
        "12345",
        Some("Independent".to_string()),
    )];
    let output = Reconciler::new(&index, &DisabledOracle)
        .reconcile(&records)
        .expect("reconcile");
    assert_eq!(output.rows()[0].operations, NO_CHANGES);
    assert_eq!(output.rows()[0].adherence_status, "High");
    assert!(!output.mask()[0].any());
}

#[test]
fn row_order_is_preserved() {
    let index = ReferenceIndex::build(&[
        ReferenceRecord::new("12345", "DrugA", "GroupX"),
        ReferenceRecord::new("54321", "DrugB", "GroupY"),
    ]);
    let records: Vec<TargetRecord> = ["10", "60", "90", "120", "high"]
        .iter()
        .map(|adherence| TargetRecord::new(*adherence, "DrugA", "54321", None))
        .collect();
    let output = Reconciler::new(&index, &DisabledOracle)
        .reconcile(&records)
        .expect("reconcile");

    let buckets: Vec<&str> = output
        .rows()
        .iter()
        .map(|row| row.adherence_status.as_str())
        .collect();
    assert_eq!(buckets, ["Low", "Medium", "High", "Outlier", "High"]);
    let labels: Vec<&str> = output.rows().iter().map(|row| row.row_label.as_str()).collect();
    assert_eq!(labels, ["Row 1", "Row 2", "Row 3", "Row 4", "Row 5"]);
    assert_eq!(output.mask().len(), output.rows().len());
    assert!(!output.is_changed(4, OutputColumn::AdherenceStatus));
    assert!(output.is_changed(3, OutputColumn::AdherenceStatus));
    assert!(output.rows().iter().all(|row| row.gpo_affiliation == "GroupY"));
}

#[test]
fn affiliation_uses_corrected_identifier() {
    let index = ReferenceIndex::build(&[
        ReferenceRecord::new("12345", "DrugA", "GroupX"),
        ReferenceRecord::new("12346", "DrugB", "GroupRaw"),
    ]);
    // "1234-7" cleans to "12347", which the oracle corrects to "12345".
    let oracle = FnOracle::new(|kind, query| match (kind, query) {
        (MatchKind::HcpId, "12347") => Ok(Some("12345".to_string())),
        _ => Ok(None),
    });
    let records = [TargetRecord::new("50", "DrugA", "1234-7", None)];
    let output = Reconciler::new(&index, &oracle)
        .reconcile(&records)
        .expect("reconcile");
    let row = &output.rows()[0];
    assert_eq!(row.hcp_id, "12345");
    assert_eq!(row.gpo_affiliation, "GroupX");
    assert_eq!(oracle.calls.get(), 1);
}

#[test]
fn drug_oracle_failure_keeps_raw_name() {
    let index = ReferenceIndex::build(&[ReferenceRecord::new("12345", "DrugA", "GroupX")]);
    let oracle = FnOracle::new(|kind, _| match kind {
        MatchKind::DrugName => Err(OracleError::Network("connection reset".to_string())),
        MatchKind::HcpId => Ok(None),
    });
    let records = [TargetRecord::new(
        "High",
        "Drgua",
        "12345",
        Some("GroupX".to_string()),
    )];
    let run = Reconciler::new(&index, &oracle)
        .run(&records)
        .expect("reconcile");
    let row = &run.output.rows()[0];
    assert_eq!(row.drug_name, "Drgua");
    assert!(!run.output.is_changed(0, OutputColumn::DrugName));
    assert_eq!(row.operations, NO_CHANGES);
    assert_eq!(run.stats.oracle_calls, 1);
    assert_eq!(run.stats.oracle_failures, 1);
}

#[test]
fn repeated_values_each_call_the_oracle() {
    let index = ReferenceIndex::build(&[ReferenceRecord::new("12345", "DrugA", "GroupX")]);
    let oracle = FnOracle::new(|kind, _| match kind {
        MatchKind::DrugName => Ok(Some("DrugA".to_string())),
        MatchKind::HcpId => Ok(None),
    });
    let records = vec![TargetRecord::new("High", "Drug-A", "12345", None); 3];
    let output = Reconciler::new(&index, &oracle)
        .reconcile(&records)
        .expect("reconcile");
    assert_eq!(oracle.calls.get(), 3);
    assert!(output.rows().iter().all(|row| row.drug_name == "DrugA"));
    assert_eq!(output.summary().changed(OutputColumn::DrugName), 3);
}

#[test]
fn missing_column_aborts_before_oracle() {
    let target = frame(
        &["Medication Adherence %", "Drug Name", "HCP ID"],
        &[&["80%", "Drgua", "1234"]],
    );
    let oracle = FnOracle::new(|_, _| Ok(None));
    let err = reconcile_frames(&reference_frame(), &target, &oracle).expect_err("missing column");
    match err {
        ReconError::MissingColumn { dataset, column } => {
            assert_eq!(dataset, DatasetRole::Target);
            assert_eq!(column, "GPO Affiliation");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(oracle.calls.get(), 0);
}

#[test]
fn missing_reference_column_is_fatal() {
    let reference = frame(&["HCP ID", "Product Name"], &[&["12345", "DrugA"]]);
    let target = frame(
        &[
            "Medication Adherence %",
            "Drug Name",
            "HCP ID",
            "GPO Affiliation",
        ],
        &[&["80%", "DrugA", "12345", ""]],
    );
    let err = reconcile_frames(&reference, &target, &DisabledOracle).expect_err("missing column");
    assert_eq!(
        err.to_string(),
        "reference dataset is missing required column 'Customer Group'"
    );
}
