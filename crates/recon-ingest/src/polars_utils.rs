//! Polars AnyValue utility functions.
//!
//! Source cells can arrive typed (spreadsheets, inferred CSV schemas). The
//! reconciliation rules work on text, so every cell is rendered the way a
//! person would read it in the source file.

use polars::prelude::{AnyValue, DataFrame};

/// Converts a Polars AnyValue to its text form.
/// Returns `None` for Null; integral floats render without a fractional part.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    };
    Some(text)
}

/// Text form of a cell, `None` when the cell is null or empty.
///
/// Whitespace-only text is a value, not an absence.
pub fn any_to_text_non_empty(value: AnyValue<'_>) -> Option<String> {
    any_to_text(value).filter(|text| !text.is_empty())
}

/// Formats a float without a trailing `.0` for integral values.
pub fn format_numeric(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Text of the cell at (`name`, `idx`); `None` for null, empty, or absent cells.
pub fn column_text(df: &DataFrame, name: &str, idx: usize) -> Option<String> {
    let column = df.column(name).ok()?;
    any_to_text_non_empty(column.get(idx).unwrap_or(AnyValue::Null))
}

/// Like [`column_text`], but missing cells become an empty string.
pub fn column_text_or_empty(df: &DataFrame, name: &str, idx: usize) -> String {
    column_text(df, name, idx).unwrap_or_default()
}
