use std::collections::HashSet;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::Result;

/// Header plus string rows, as read from a file before typing.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Converts to a frame of nullable string columns.
    ///
    /// Short rows are padded; empty cells become nulls so that a missing
    /// affiliation reads as absent rather than as an empty name. Blank and
    /// repeated headers are renamed by [`column_names`].
    pub fn into_frame(self) -> Result<DataFrame> {
        let RawTable { headers, rows } = self;
        let columns: Vec<Column> = column_names(&headers)
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let values: Vec<Option<String>> = rows
                    .iter()
                    .map(|row| {
                        row.get(idx)
                            .filter(|value| !value.is_empty())
                            .cloned()
                    })
                    .collect();
                Series::new(header.as_str().into(), values).into_column()
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}

/// Frame column names for a header row.
///
/// A blank header becomes `Unnamed: <position>`; a repeated one gets a
/// `.1`, `.2`, ... suffix. Stray formatted columns in exported sheets
/// would otherwise collide and fail the whole load.
pub fn column_names(headers: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(headers.len());
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                header.clone()
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            name
        })
        .collect()
}
