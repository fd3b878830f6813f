//! Per-row change accumulation.

use recon_model::{NO_CHANGES, OPERATION_SEPARATOR, OutputColumn, Resolution, RowChanges};

/// Change flags and notes gathered while resolving one row.
///
/// Each [`RowDraft::fold`] consumes the draft and returns a new one, so the
/// resolvers compose as a chain of steps in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowDraft {
    changes: RowChanges,
    operations: Vec<String>,
}

impl RowDraft {
    /// Records `resolution` under `column` and hands back its value.
    #[must_use]
    pub fn fold(self, column: OutputColumn, resolution: Resolution) -> (Self, String) {
        let changed = resolution.is_changed();
        let (value, note) = resolution.into_parts();
        let mut operations = self.operations;
        operations.extend(note);
        let draft = Self {
            changes: self.changes.with(column, changed),
            operations,
        };
        (draft, value)
    }

    pub fn changes(&self) -> RowChanges {
        self.changes
    }

    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    /// Notes joined in resolution order, or `No Changes`.
    pub fn operations_log(&self) -> String {
        if self.operations.is_empty() {
            NO_CHANGES.to_string()
        } else {
            self.operations.join(OPERATION_SEPARATOR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_reports_no_changes() {
        let draft = RowDraft::default();
        assert_eq!(draft.operations_log(), "No Changes");
        assert!(!draft.changes().any());
    }

    #[test]
    fn fold_keeps_note_order_and_flags() {
        let (draft, first) = RowDraft::default()
            .fold(OutputColumn::AdherenceStatus, Resolution::changed("High", "a"));
        let (draft, second) = draft.fold(OutputColumn::DrugName, Resolution::unchanged("DrugA"));
        let (draft, _) = draft.fold(OutputColumn::HcpId, Resolution::changed("12345", "b"));

        assert_eq!(first, "High");
        assert_eq!(second, "DrugA");
        assert_eq!(draft.operations(), ["a", "b"]);
        assert_eq!(draft.operations_log(), "a, b");
        let changes = draft.changes();
        assert!(changes.adherence_status);
        assert!(!changes.drug_name);
        assert!(changes.hcp_id);
        assert!(!changes.gpo_affiliation);
    }
}
