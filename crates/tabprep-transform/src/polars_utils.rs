//! Polars AnyValue and column-lookup helpers.

use polars::prelude::{AnyValue, DataFrame};

use crate::error::{Result, TransformError};

/// Converts an AnyValue to f64, returning None for non-numeric or null values.
///
/// Strings are parsed after trimming; booleans map to 1.0 / 0.0.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Returns the column names of a DataFrame as owned strings, in table order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Fails with [`TransformError::MissingColumn`] on the first name not in `df`.
pub fn require_columns<S: AsRef<str>>(df: &DataFrame, names: &[S]) -> Result<()> {
    for name in names {
        let name = name.as_ref();
        if df.get_column_index(name).is_none() {
            return Err(TransformError::missing(name));
        }
    }
    Ok(())
}
