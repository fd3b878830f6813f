//! Reconciliation engine: drives the field resolvers over a target dataset
//! and assembles the cleaned table with its change mask.

pub mod instrumented;
pub mod reconciler;
pub mod row;

pub use instrumented::InstrumentedOracle;
pub use reconciler::{ReconRun, Reconciler, RunStats, reconcile_frames, reconcile_record};
pub use row::RowDraft;
