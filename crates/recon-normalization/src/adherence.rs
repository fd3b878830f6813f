//! Medication adherence bucketing.

use std::fmt;

use serde::{Deserialize, Serialize};

use recon_model::Resolution;

/// Lower bound (inclusive) of the `High` bucket, in percent.
pub const HIGH_THRESHOLD: f64 = 75.0;
/// Lower bound (inclusive) of the `Medium` bucket, in percent.
pub const MEDIUM_THRESHOLD: f64 = 50.0;

/// Adherence buckets written to the cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdherenceBucket {
    High,
    Medium,
    Low,
    /// Parsed percentage outside `[0, 100]`.
    Outlier,
    /// Neither a canonical label nor a number.
    Invalid,
}

impl AdherenceBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Outlier => "Outlier",
            Self::Invalid => "Invalid",
        }
    }

    /// Matches an already-bucketed label, ignoring case and surrounding whitespace.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Buckets a percentage value.
    ///
    /// The comparison chain mirrors the bucket boundaries directly, so a
    /// NaN falls through every test and lands in `Low`.
    pub fn from_percentage(value: f64) -> Self {
        if value < 0.0 || value > 100.0 {
            Self::Outlier
        } else if value >= HIGH_THRESHOLD {
            Self::High
        } else if value >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for AdherenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a percentage such as `"80%"`, `" 62.5 "` or `"1e2"`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let stripped = raw.trim().replace('%', "");
    stripped.trim().parse::<f64>().ok()
}

/// Maps a raw adherence cell onto a bucket.
///
/// Canonical labels come back unchanged (with canonical casing). Every other
/// input is rewritten, including unparseable text, which becomes `Invalid`.
pub fn bucket_adherence(raw: &str) -> Resolution {
    if let Some(bucket) = AdherenceBucket::from_label(raw) {
        return Resolution::unchanged(bucket.as_str());
    }
    let bucket = match parse_percentage(raw) {
        Some(value) => AdherenceBucket::from_percentage(value),
        None => AdherenceBucket::Invalid,
    };
    Resolution::changed(
        bucket.as_str(),
        format!("Medication Adherence: Mapped from \"{raw}\" to \"{bucket}\""),
    )
}
