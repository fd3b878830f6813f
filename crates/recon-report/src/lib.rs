//! Output writers for a reconciliation run.

pub mod csv_export;
pub mod error;
pub mod frame;
pub mod mask;
pub mod options;
pub mod xlsx;

pub use csv_export::write_csv;
pub use error::{ExportError, Result};
pub use frame::{cleaned_frame, preview_frame};
pub use mask::write_mask_json;
pub use options::{DEFAULT_OUTPUT, ExportFormat, ExportOptions, export};
pub use xlsx::{HIGHLIGHT_RGB, SHEET_NAME, write_xlsx};
