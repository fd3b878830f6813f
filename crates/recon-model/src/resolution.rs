//! Per-field resolution outcome.

use serde::{Deserialize, Serialize};

/// Result of resolving one field of one record.
///
/// A resolution is changed exactly when it carries a note. Both are set
/// together by [`Resolution::changed`], so the flag cannot drift from the
/// description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Resolution {
    /// Value passed through as-is.
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            note: None,
        }
    }

    /// Value rewritten, with a human-readable description of the rewrite.
    pub fn changed(value: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            note: Some(note.into()),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn is_changed(&self) -> bool {
        self.note.is_some()
    }

    pub fn into_parts(self) -> (String, Option<String>) {
        (self.value, self.note)
    }
}
