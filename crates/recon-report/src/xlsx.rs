//! Workbook export with changed cells highlighted.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};
use tracing::debug;

use recon_model::{OutputColumn, ReconciliationOutput};

use crate::error::{ExportError, Result};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Mapped Data";

/// Fill for changed cells (light green).
pub const HIGHLIGHT_RGB: u32 = 0x90_EE_90;

/// Writes the cleaned table to `path`, filling every changed cell.
///
/// Row 0 holds the headers; cleaned row `i` lands on sheet row `i + 1`.
pub fn write_xlsx(output: &ReconciliationOutput, path: &Path) -> Result<()> {
    let xlsx_err = |source: XlsxError| ExportError::Xlsx {
        path: path.to_path_buf(),
        source,
    };
    let header_format = Format::new().set_bold();
    let highlight = Format::new().set_background_color(Color::RGB(HIGHLIGHT_RGB));

    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(xlsx_err)?;

    for (col, column) in OutputColumn::ALL.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, column.as_str(), &header_format)
            .map_err(xlsx_err)?;
    }

    let mut highlighted = 0usize;
    for (idx, (row, changes)) in output.iter().enumerate() {
        // Past the sheet limit the writer reports the error itself.
        let sheet_row = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        for (col, column) in OutputColumn::ALL.iter().enumerate() {
            let text = row.value(*column);
            if changes.get(*column) {
                worksheet
                    .write_string_with_format(sheet_row, col as u16, text, &highlight)
                    .map_err(xlsx_err)?;
                highlighted += 1;
            } else {
                worksheet
                    .write_string(sheet_row, col as u16, text)
                    .map_err(xlsx_err)?;
            }
        }
    }
    worksheet.autofit();

    workbook.save(path).map_err(xlsx_err)?;
    debug!(
        path = %path.display(),
        rows = output.len(),
        highlighted,
        "wrote workbook output"
    );
    Ok(())
}
