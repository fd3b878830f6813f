//! Per-field resolution strategies.
//!
//! Each resolver turns one raw field into a [`Resolution`]. None of them
//! fail: oracle errors are logged and folded into a fallback value.

use tracing::{debug, warn};

use recon_model::redact::redact_value;
use recon_model::{Resolution, UNKNOWN_AFFILIATION};
use recon_normalization::{bucket_adherence, clean_identifier};

use crate::index::ReferenceIndex;
use crate::oracle::{MatchKind, MatchingOracle};

/// Buckets the adherence value. Never consults the oracle.
pub fn resolve_adherence(raw: &str) -> Resolution {
    bucket_adherence(raw)
}

/// Keeps names found in the reference list; asks the oracle otherwise.
///
/// An oracle that fails, finds nothing, or echoes the input leaves the raw
/// name in place without a note.
pub fn resolve_drug_name(
    raw: &str,
    index: &ReferenceIndex,
    oracle: &dyn MatchingOracle,
) -> Resolution {
    if index.contains_name(raw) {
        return Resolution::unchanged(raw);
    }
    match oracle.resolve(MatchKind::DrugName, raw, index.names()) {
        Ok(Some(candidate)) if candidate != raw => {
            debug!(
                from = %redact_value(raw),
                to = %redact_value(&candidate),
                "drug name mapped"
            );
            let note = format!("Drug Name: Mapped from \"{raw}\" to \"{candidate}\"");
            Resolution::changed(candidate, note)
        }
        Ok(_) => Resolution::unchanged(raw),
        Err(error) => {
            warn!(
                field = %MatchKind::DrugName,
                value = %redact_value(raw),
                %error,
                retryable = error.is_retryable(),
                "oracle call failed, keeping raw drug name"
            );
            Resolution::unchanged(raw)
        }
    }
}

/// Cleans the identifier and, if it is not a known reference identifier,
/// asks the oracle for the closest one.
///
/// Known identifiers never reach the oracle. Every oracle outcome is marked
/// as a change, since the value at least went through cleaning.
pub fn resolve_identifier(
    raw: &str,
    index: &ReferenceIndex,
    oracle: &dyn MatchingOracle,
) -> Resolution {
    let cleaned = clean_identifier(raw);
    if index.contains_identifier(&cleaned) {
        if cleaned == raw {
            return Resolution::unchanged(cleaned);
        }
        let note = format!("HCP ID: Mapped from \"{raw}\" to \"{cleaned}\"");
        return Resolution::changed(cleaned, note);
    }
    match oracle.resolve(MatchKind::HcpId, &cleaned, index.identifiers()) {
        Ok(Some(candidate)) if candidate != cleaned => {
            let note = format!("HCP ID: Mapped from \"{raw}\" to \"{candidate}\"");
            Resolution::changed(candidate, note)
        }
        Ok(_) => {
            let note = format!("HCP ID: Corrected \"{raw}\" but no valid 5-digit match found");
            Resolution::changed(cleaned, note)
        }
        Err(error) => {
            warn!(
                field = %MatchKind::HcpId,
                value = %redact_value(raw),
                %error,
                retryable = error.is_retryable(),
                "oracle call failed, keeping cleaned identifier"
            );
            let note = format!("HCP ID: Error mapping \"{raw}\"");
            Resolution::changed(cleaned, note)
        }
    }
}

/// Passes a present affiliation through; imputes a missing one from the
/// reference dataset using the *resolved* identifier.
///
/// `raw_hcp_id` only appears in the note.
pub fn resolve_affiliation(
    raw: Option<&str>,
    resolved_hcp_id: &str,
    raw_hcp_id: &str,
    index: &ReferenceIndex,
) -> Resolution {
    if let Some(value) = raw {
        return Resolution::unchanged(value);
    }
    let imputed = index
        .affiliation_for(resolved_hcp_id)
        .unwrap_or(UNKNOWN_AFFILIATION);
    let note = format!("GPO Affiliation: Mapped missing GPO Affiliation for \"{raw_hcp_id}\"");
    Resolution::changed(imputed, note)
}
