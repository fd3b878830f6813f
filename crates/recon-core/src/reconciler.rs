//! Reconciliation of target records against the reference index.
//!
//! # Field order
//!
//! 1. Medication adherence
//! 2. Drug name
//! 3. HCP ID
//! 4. GPO affiliation
//!
//! Affiliation imputation looks up the identifier produced in step 3, so the
//! order is fixed.

use std::time::{Duration, Instant};

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use recon_ingest::{reference_records, require_columns, target_records};
use recon_map::{
    MatchingOracle, ReferenceIndex, resolve_adherence, resolve_affiliation, resolve_drug_name,
    resolve_identifier,
};
use recon_model::{
    CleanedRecord, DatasetRole, OutputColumn, ReconciliationOutput, Result, RowChanges,
    TargetRecord,
};

use crate::instrumented::InstrumentedOracle;
use crate::row::RowDraft;

/// Counters for one run, reported alongside the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub rows: usize,
    pub oracle_calls: usize,
    pub oracle_failures: usize,
    pub elapsed: Duration,
}

/// Output of a run plus its counters.
#[derive(Debug, Clone)]
pub struct ReconRun {
    pub output: ReconciliationOutput,
    pub stats: RunStats,
}

/// Applies the field resolvers to every target record.
pub struct Reconciler<'a> {
    index: &'a ReferenceIndex,
    oracle: &'a dyn MatchingOracle,
}

impl<'a> Reconciler<'a> {
    pub fn new(index: &'a ReferenceIndex, oracle: &'a dyn MatchingOracle) -> Self {
        Self { index, oracle }
    }

    /// Reconciles `records` in input order.
    pub fn reconcile(&self, records: &[TargetRecord]) -> Result<ReconciliationOutput> {
        self.run(records).map(|run| run.output)
    }

    /// Like [`Reconciler::reconcile`], also returning run counters.
    pub fn run(&self, records: &[TargetRecord]) -> Result<ReconRun> {
        let span = info_span!("reconcile", rows = records.len());
        let _guard = span.enter();
        let start = Instant::now();
        let oracle = InstrumentedOracle::new(self.oracle);

        let output = ReconciliationOutput::from_pairs(
            records
                .iter()
                .enumerate()
                .map(|(row, record)| reconcile_record(row, record, self.index, &oracle)),
        );

        let stats = RunStats {
            rows: output.len(),
            oracle_calls: oracle.calls(),
            oracle_failures: oracle.failures(),
            elapsed: start.elapsed(),
        };
        let summary = output.summary();
        info!(
            rows = stats.rows,
            rows_with_changes = summary.rows_with_changes,
            changed_cells = summary.total_changed_cells(),
            oracle_calls = stats.oracle_calls,
            oracle_failures = stats.oracle_failures,
            duration_ms = stats.elapsed.as_millis(),
            "reconciliation complete"
        );
        Ok(ReconRun { output, stats })
    }
}

/// Resolves one record into its cleaned row and mask entry.
pub fn reconcile_record(
    row: usize,
    record: &TargetRecord,
    index: &ReferenceIndex,
    oracle: &dyn MatchingOracle,
) -> (CleanedRecord, RowChanges) {
    let draft = RowDraft::default();
    let (draft, adherence_status) = draft.fold(
        OutputColumn::AdherenceStatus,
        resolve_adherence(&record.adherence),
    );
    let (draft, drug_name) = draft.fold(
        OutputColumn::DrugName,
        resolve_drug_name(&record.drug_name, index, oracle),
    );
    let (draft, hcp_id) = draft.fold(
        OutputColumn::HcpId,
        resolve_identifier(&record.hcp_id, index, oracle),
    );
    let (draft, gpo_affiliation) = draft.fold(
        OutputColumn::GpoAffiliation,
        resolve_affiliation(
            record.gpo_affiliation.as_deref(),
            &hcp_id,
            &record.hcp_id,
            index,
        ),
    );
    debug!(row, changes = draft.operations().len(), "row reconciled");

    let cleaned = CleanedRecord {
        row_label: CleanedRecord::row_label(row),
        adherence_status,
        drug_name,
        hcp_id,
        gpo_affiliation,
        operations: draft.operations_log(),
    };
    (cleaned, draft.changes())
}

/// Validates both frames, builds the reference index, and reconciles.
///
/// Column checks run before any record is read, so a malformed input never
/// reaches the oracle.
pub fn reconcile_frames(
    reference: &DataFrame,
    target: &DataFrame,
    oracle: &dyn MatchingOracle,
) -> Result<ReconRun> {
    require_columns(reference, DatasetRole::Reference)?;
    require_columns(target, DatasetRole::Target)?;

    let references = reference_records(reference)?;
    let index = ReferenceIndex::build(&references);
    let records = target_records(target)?;
    Reconciler::new(&index, oracle).run(&records)
}
