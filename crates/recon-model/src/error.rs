use thiserror::Error;

use crate::columns::DatasetRole;

/// Batch-level failures. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("{dataset} dataset is missing required column '{column}'")]
    MissingColumn {
        dataset: DatasetRole,
        column: String,
    },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ReconError>;
