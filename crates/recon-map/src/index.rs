//! Lookup structures over the reference dataset.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use recon_model::ReferenceRecord;
use recon_normalization::{CANONICAL_ID_LENGTH, is_canonical_identifier};

/// Read-only view over the reference dataset, built once per run.
///
/// # Example
///
/// ```ignore
/// use recon_map::ReferenceIndex;
/// use recon_model::ReferenceRecord;
///
/// let index = ReferenceIndex::build(&[ReferenceRecord::new("12345", "DrugA", "GroupX")]);
/// assert!(index.contains_identifier("12345"));
/// assert_eq!(index.affiliation_for("12345"), Some("GroupX"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    /// Canonical identifiers in first-appearance order, without duplicates.
    identifiers: Vec<String>,
    identifier_set: BTreeSet<String>,
    /// Every product name, duplicates included.
    names: Vec<String>,
    name_set: BTreeSet<String>,
    affiliations: BTreeMap<String, String>,
}

impl ReferenceIndex {
    /// Builds the index from reference records.
    ///
    /// Identifiers that are not exactly five digits are left out of the
    /// candidate set but still key the affiliation map. When an identifier
    /// repeats, the later record's affiliation replaces the earlier one.
    pub fn build(records: &[ReferenceRecord]) -> Self {
        let mut index = Self::default();
        let mut overwritten = 0usize;
        for record in records {
            if is_canonical_identifier(&record.hcp_id, CANONICAL_ID_LENGTH)
                && index.identifier_set.insert(record.hcp_id.clone())
            {
                index.identifiers.push(record.hcp_id.clone());
            }
            index.names.push(record.product_name.clone());
            index.name_set.insert(record.product_name.clone());
            let previous = index
                .affiliations
                .insert(record.hcp_id.clone(), record.customer_group.clone());
            if previous.is_some_and(|prev| prev != record.customer_group) {
                overwritten += 1;
            }
        }
        debug!(
            records = records.len(),
            identifier_candidates = index.identifiers.len(),
            names = index.names.len(),
            affiliations = index.affiliations.len(),
            overwritten_affiliations = overwritten,
            "reference index built"
        );
        index
    }

    /// Canonical identifiers offered to the oracle as candidates.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn contains_identifier(&self, id: &str) -> bool {
        self.identifier_set.contains(id)
    }

    /// Product names offered to the oracle as candidates.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Exact, case-sensitive name membership.
    pub fn contains_name(&self, name: &str) -> bool {
        self.name_set.contains(name)
    }

    pub fn affiliation_for(&self, id: &str) -> Option<&str> {
        self.affiliations.get(id).map(String::as_str)
    }
}
