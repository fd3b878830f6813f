//! Column names shared by ingest, reconciliation, and export.
//!
//! Input names follow the Veeva (reference) and Xponent (target) extracts.
//! Output names are the contract with exporters: change-mask keys use the
//! same strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference dataset: HCP identifier.
pub const REFERENCE_HCP_ID: &str = "HCP ID";
/// Reference dataset: product (drug) name.
pub const REFERENCE_PRODUCT_NAME: &str = "Product Name";
/// Reference dataset: customer group (GPO affiliation).
pub const REFERENCE_CUSTOMER_GROUP: &str = "Customer Group";

/// Target dataset: free-form adherence percentage or label.
pub const TARGET_ADHERENCE: &str = "Medication Adherence %";
/// Target dataset: raw drug name.
pub const TARGET_DRUG_NAME: &str = "Drug Name";
/// Target dataset: raw HCP identifier.
pub const TARGET_HCP_ID: &str = "HCP ID";
/// Target dataset: GPO affiliation, may be missing.
pub const TARGET_GPO_AFFILIATION: &str = "GPO Affiliation";

/// Columns the reference dataset must provide.
pub const REFERENCE_COLUMNS: [&str; 3] = [
    REFERENCE_HCP_ID,
    REFERENCE_PRODUCT_NAME,
    REFERENCE_CUSTOMER_GROUP,
];

/// Columns the target dataset must provide.
pub const TARGET_COLUMNS: [&str; 4] = [
    TARGET_ADHERENCE,
    TARGET_DRUG_NAME,
    TARGET_HCP_ID,
    TARGET_GPO_AFFILIATION,
];

/// Which of the two input datasets a column or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetRole {
    /// The trusted dataset used for lookups.
    Reference,
    /// The dataset being cleaned.
    Target,
}

impl DatasetRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Target => "target",
        }
    }

    /// Columns required for this dataset role.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Reference => &REFERENCE_COLUMNS,
            Self::Target => &TARGET_COLUMNS,
        }
    }
}

impl fmt::Display for DatasetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns of the cleaned output table, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutputColumn {
    RowLabel,
    AdherenceStatus,
    DrugName,
    HcpId,
    GpoAffiliation,
    Operations,
}

impl OutputColumn {
    /// All output columns in table order.
    pub const ALL: [OutputColumn; 6] = [
        Self::RowLabel,
        Self::AdherenceStatus,
        Self::DrugName,
        Self::HcpId,
        Self::GpoAffiliation,
        Self::Operations,
    ];

    /// Columns that carry a change-mask bit, in resolver order.
    pub const MASKED: [OutputColumn; 4] = [
        Self::AdherenceStatus,
        Self::DrugName,
        Self::HcpId,
        Self::GpoAffiliation,
    ];

    /// Header text written to exports and used as mask keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RowLabel => "Row #",
            Self::AdherenceStatus => "Medication Adherence Status",
            Self::DrugName => "Mapped Drug Name",
            Self::HcpId => "Corrected HCP ID",
            Self::GpoAffiliation => "GPO Affiliation",
            Self::Operations => "Operations Performed",
        }
    }

    /// Whether the column can be flagged as changed.
    pub fn is_masked(&self) -> bool {
        !matches!(self, Self::RowLabel | Self::Operations)
    }
}

impl fmt::Display for OutputColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_columns_exclude_label_and_log() {
        let masked: Vec<_> = OutputColumn::ALL
            .into_iter()
            .filter(OutputColumn::is_masked)
            .collect();
        assert_eq!(masked, OutputColumn::MASKED.to_vec());
    }
}
