//! CLI library components for HCP reconciliation.

pub mod logging;
pub mod pipeline;
