//! Matching oracle capability.
//!
//! An oracle picks the candidate closest to a noisy value when exact rules
//! fail. Implementations are free to be non-deterministic and slow; callers
//! treat each call as best-effort and at-most-once.

use std::fmt;

use thiserror::Error;

/// Which field a match is requested for. Adapters use it to phrase the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    DrugName,
    HcpId,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DrugName => "drug_name",
            Self::HcpId => "hcp_id",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from a single oracle call. Resolvers absorb these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// No credential was configured for a service that needs one.
    #[error("oracle credential is not configured")]
    MissingCredential,

    /// The request did not complete within the configured timeout.
    #[error("oracle request timed out")]
    Timeout,

    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// Service quota exhausted.
    #[error("oracle rate limit exceeded")]
    RateLimited,

    /// Service answered with a non-success status.
    #[error("oracle returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Reply body could not be decoded.
    #[error("malformed oracle reply: {0}")]
    MalformedReply(String),
}

impl OracleError {
    /// Whether a later attempt could plausibly succeed. Informational only;
    /// calls are never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Network(_) | Self::RateLimited => true,
            Self::Status { status, .. } => *status >= 500,
            Self::MissingCredential | Self::MalformedReply(_) => false,
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::MalformedReply(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedReply(err.to_string())
    }
}

/// Resolves a noisy value against a candidate list.
pub trait MatchingOracle {
    /// Returns the chosen candidate, `Ok(None)` when the oracle found no
    /// match, or an error when the call itself failed.
    fn resolve(
        &self,
        kind: MatchKind,
        query: &str,
        candidates: &[String],
    ) -> Result<Option<String>, OracleError>;
}

impl<T: MatchingOracle + ?Sized> MatchingOracle for Box<T> {
    fn resolve(
        &self,
        kind: MatchKind,
        query: &str,
        candidates: &[String],
    ) -> Result<Option<String>, OracleError> {
        (**self).resolve(kind, query, candidates)
    }
}

/// Oracle that never finds a match. Used for offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledOracle;

impl MatchingOracle for DisabledOracle {
    fn resolve(
        &self,
        _kind: MatchKind,
        _query: &str,
        _candidates: &[String],
    ) -> Result<Option<String>, OracleError> {
        Ok(None)
    }
}
