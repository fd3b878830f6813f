//! Change-annotated reconciliation output.
//!
//! The cleaned table and its change mask are stored pairwise so that row
//! `i` of the table always corresponds to row `i` of the mask.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::columns::OutputColumn;

/// Operations-log value for rows where nothing was rewritten.
pub const NO_CHANGES: &str = "No Changes";

/// Separator between entries of a row's operations log.
pub const OPERATION_SEPARATOR: &str = ", ";

/// Affiliation used when a missing value cannot be imputed.
pub const UNKNOWN_AFFILIATION: &str = "Unknown";

/// One cleaned output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    #[serde(rename = "Row #")]
    pub row_label: String,
    #[serde(rename = "Medication Adherence Status")]
    pub adherence_status: String,
    #[serde(rename = "Mapped Drug Name")]
    pub drug_name: String,
    #[serde(rename = "Corrected HCP ID")]
    pub hcp_id: String,
    #[serde(rename = "GPO Affiliation")]
    pub gpo_affiliation: String,
    #[serde(rename = "Operations Performed")]
    pub operations: String,
}

impl CleanedRecord {
    /// Human-readable label for the zero-based input row `index`.
    pub fn row_label(index: usize) -> String {
        format!("Row {}", index + 1)
    }

    /// Cell text for an output column.
    pub fn value(&self, column: OutputColumn) -> &str {
        match column {
            OutputColumn::RowLabel => &self.row_label,
            OutputColumn::AdherenceStatus => &self.adherence_status,
            OutputColumn::DrugName => &self.drug_name,
            OutputColumn::HcpId => &self.hcp_id,
            OutputColumn::GpoAffiliation => &self.gpo_affiliation,
            OutputColumn::Operations => &self.operations,
        }
    }

    /// Cell texts in output column order.
    pub fn values(&self) -> [&str; 6] {
        OutputColumn::ALL.map(|column| self.value(column))
    }
}

/// Change-mask row: one flag per masked output column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowChanges {
    #[serde(rename = "Medication Adherence Status")]
    pub adherence_status: bool,
    #[serde(rename = "Mapped Drug Name")]
    pub drug_name: bool,
    #[serde(rename = "Corrected HCP ID")]
    pub hcp_id: bool,
    #[serde(rename = "GPO Affiliation")]
    pub gpo_affiliation: bool,
}

impl RowChanges {
    /// Returns a copy with the flag for `column` set to `changed`.
    ///
    /// Unmasked columns are ignored.
    #[must_use]
    pub fn with(mut self, column: OutputColumn, changed: bool) -> Self {
        match column {
            OutputColumn::AdherenceStatus => self.adherence_status = changed,
            OutputColumn::DrugName => self.drug_name = changed,
            OutputColumn::HcpId => self.hcp_id = changed,
            OutputColumn::GpoAffiliation => self.gpo_affiliation = changed,
            OutputColumn::RowLabel | OutputColumn::Operations => {}
        }
        self
    }

    /// Flag for `column`; always false for unmasked columns.
    pub fn get(&self, column: OutputColumn) -> bool {
        match column {
            OutputColumn::AdherenceStatus => self.adherence_status,
            OutputColumn::DrugName => self.drug_name,
            OutputColumn::HcpId => self.hcp_id,
            OutputColumn::GpoAffiliation => self.gpo_affiliation,
            OutputColumn::RowLabel | OutputColumn::Operations => false,
        }
    }

    pub fn any(&self) -> bool {
        OutputColumn::MASKED.iter().any(|column| self.get(*column))
    }
}

/// Cleaned table plus aligned change mask for one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationOutput {
    rows: Vec<CleanedRecord>,
    mask: Vec<RowChanges>,
}

impl ReconciliationOutput {
    /// Builds the output from `(row, mask)` pairs in input order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (CleanedRecord, RowChanges)>) -> Self {
        let (rows, mask) = pairs.into_iter().unzip();
        Self { rows, mask }
    }

    pub fn rows(&self) -> &[CleanedRecord] {
        &self.rows
    }

    pub fn mask(&self) -> &[RowChanges] {
        &self.mask
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows together with their mask entries.
    pub fn iter(&self) -> impl Iterator<Item = (&CleanedRecord, &RowChanges)> {
        self.rows.iter().zip(self.mask.iter())
    }

    /// Whether the cell at (`row`, `column`) was changed.
    pub fn is_changed(&self, row: usize, column: OutputColumn) -> bool {
        self.mask.get(row).is_some_and(|changes| changes.get(column))
    }

    /// Aggregated change counts.
    pub fn summary(&self) -> ReconSummary {
        let mut changed_by_column = BTreeMap::new();
        for column in OutputColumn::MASKED {
            let count = self.mask.iter().filter(|row| row.get(column)).count();
            changed_by_column.insert(column, count);
        }
        ReconSummary {
            total_rows: self.rows.len(),
            rows_with_changes: self.mask.iter().filter(|row| row.any()).count(),
            changed_by_column,
        }
    }
}

/// Change counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconSummary {
    pub total_rows: usize,
    pub rows_with_changes: usize,
    pub changed_by_column: BTreeMap<OutputColumn, usize>,
}

impl ReconSummary {
    pub fn changed(&self, column: OutputColumn) -> usize {
        self.changed_by_column.get(&column).copied().unwrap_or(0)
    }

    pub fn total_changed_cells(&self) -> usize {
        self.changed_by_column.values().sum()
    }
}
