pub mod columns;
pub mod error;
pub mod output;
pub mod records;
pub mod redact;
pub mod resolution;

pub use columns::{DatasetRole, OutputColumn};
pub use error::{ReconError, Result};
pub use output::{
    CleanedRecord, NO_CHANGES, OPERATION_SEPARATOR, ReconSummary, ReconciliationOutput,
    RowChanges, UNKNOWN_AFFILIATION,
};
pub use records::{ReferenceRecord, TargetRecord};
pub use resolution::Resolution;
