//! Reply parsing for the chat oracle.
//!
//! The service is prompted to answer in the form
//! `Mapped 'query' to 'candidate'`. The chosen candidate is the second
//! single-quoted substring of the reply. Any other phrasing yields no match.

use std::sync::LazyLock;

use regex::Regex;

static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'(.+?)'").expect("valid regex"));

/// Extracts the second single-quoted substring of `reply`.
pub fn extract_mapped_value(reply: &str) -> Option<String> {
    QUOTED
        .captures_iter(reply)
        .nth(1)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Renders candidates as a bracketed list of single-quoted values.
pub fn render_candidates(candidates: &[String]) -> String {
    let quoted: Vec<String> = candidates.iter().map(|c| format!("'{c}'")).collect();
    format!("[{}]", quoted.join(", "))
}
