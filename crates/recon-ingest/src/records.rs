//! Column validation and record extraction.

use polars::prelude::DataFrame;

use recon_model::columns::{
    REFERENCE_CUSTOMER_GROUP, REFERENCE_HCP_ID, REFERENCE_PRODUCT_NAME, TARGET_ADHERENCE,
    TARGET_DRUG_NAME, TARGET_GPO_AFFILIATION, TARGET_HCP_ID,
};
use recon_model::{DatasetRole, ReferenceRecord, TargetRecord};

use crate::error::{IngestError, Result};
use crate::polars_utils::{column_text, column_text_or_empty};

/// Fails with the first required column of `role` that `df` lacks.
pub fn require_columns(df: &DataFrame, role: DatasetRole) -> Result<()> {
    for column in role.required_columns() {
        if df.column(column).is_err() {
            return Err(IngestError::MissingColumn {
                dataset: role,
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Extracts reference records, coercing every cell to text.
///
/// Empty cells become empty strings; they never match a cleaned identifier
/// or a drug name.
pub fn reference_records(df: &DataFrame) -> Result<Vec<ReferenceRecord>> {
    require_columns(df, DatasetRole::Reference)?;
    let records = (0..df.height())
        .map(|idx| ReferenceRecord {
            hcp_id: column_text_or_empty(df, REFERENCE_HCP_ID, idx),
            product_name: column_text_or_empty(df, REFERENCE_PRODUCT_NAME, idx),
            customer_group: column_text_or_empty(df, REFERENCE_CUSTOMER_GROUP, idx),
        })
        .collect();
    Ok(records)
}

/// Extracts target records in row order.
///
/// Cell text is passed through as read. Only a null or empty affiliation
/// counts as absent.
pub fn target_records(df: &DataFrame) -> Result<Vec<TargetRecord>> {
    require_columns(df, DatasetRole::Target)?;
    let records = (0..df.height())
        .map(|idx| TargetRecord {
            adherence: column_text_or_empty(df, TARGET_ADHERENCE, idx),
            drug_name: column_text_or_empty(df, TARGET_DRUG_NAME, idx),
            hcp_id: column_text_or_empty(df, TARGET_HCP_ID, idx),
            gpo_affiliation: column_text(df, TARGET_GPO_AFFILIATION, idx),
        })
        .collect();
    Ok(records)
}
