use serde::{Deserialize, Serialize};

/// One entity from the trusted reference dataset.
///
/// Values are the text form of the source cells. Identifiers may carry
/// noise and are neither unique nor validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub hcp_id: String,
    pub product_name: String,
    pub customer_group: String,
}

impl ReferenceRecord {
    pub fn new(
        hcp_id: impl Into<String>,
        product_name: impl Into<String>,
        customer_group: impl Into<String>,
    ) -> Self {
        Self {
            hcp_id: hcp_id.into(),
            product_name: product_name.into(),
            customer_group: customer_group.into(),
        }
    }
}

/// One row of the dataset being cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    /// Free-form adherence value: a label, a percentage, or a bare number.
    pub adherence: String,
    pub drug_name: String,
    /// Raw identifier, may contain separators or other non-digits.
    pub hcp_id: String,
    /// `None` when the source cell was null or empty.
    pub gpo_affiliation: Option<String>,
}

impl TargetRecord {
    pub fn new(
        adherence: impl Into<String>,
        drug_name: impl Into<String>,
        hcp_id: impl Into<String>,
        gpo_affiliation: Option<String>,
    ) -> Self {
        Self {
            adherence: adherence.into(),
            drug_name: drug_name.into(),
            hcp_id: hcp_id.into(),
            gpo_affiliation,
        }
    }
}
