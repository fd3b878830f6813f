use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use recon_model::{OutputColumn, ReconciliationOutput};

use crate::error::Result;

/// Cleaned table as a frame of string columns, in output column order.
pub fn cleaned_frame(output: &ReconciliationOutput) -> Result<DataFrame> {
    let columns: Vec<Column> = OutputColumn::ALL
        .iter()
        .map(|column| {
            let values: Vec<&str> = output.rows().iter().map(|row| row.value(*column)).collect();
            Series::new(column.as_str().into(), values).into_column()
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// First `rows` rows of [`cleaned_frame`].
pub fn preview_frame(output: &ReconciliationOutput, rows: usize) -> Result<DataFrame> {
    Ok(cleaned_frame(output)?.head(Some(rows)))
}
