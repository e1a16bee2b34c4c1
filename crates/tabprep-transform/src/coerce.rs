//! Float coercion for columns that take part in arithmetic.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::polars_utils::{parse_f64, require_columns};

/// Convert the named columns of `df` to `Float64`, in place.
///
/// Integer, float and boolean columns are cast. String columns are parsed
/// value by value; nulls stay null and any other value that does not parse
/// fails with [`TransformError::TypeCoercion`]. Every column is converted
/// before any is written back, so a failure leaves `df` untouched.
pub fn coerce_columns_to_float<S: AsRef<str>>(df: &mut DataFrame, columns: &[S]) -> Result<()> {
    require_columns(df, columns)?;

    let mut converted: Vec<Column> = Vec::with_capacity(columns.len());
    for name in columns {
        let column = df.column(name.as_ref())?;
        if matches!(column.dtype(), DataType::Float64) {
            continue;
        }
        debug!(column = name.as_ref(), dtype = %column.dtype(), "coercing column to float");
        converted.push(column_to_float(column)?);
    }

    for column in converted {
        df.with_column(column)?;
    }
    Ok(())
}

/// Convert a single column to `Float64` without touching its frame.
pub fn column_to_float(column: &Column) -> Result<Column> {
    match column.dtype() {
        DataType::Float64 => Ok(column.clone()),
        DataType::Boolean
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Null => Ok(column.cast(&DataType::Float64)?),
        DataType::String => parse_string_column(column),
        other => Err(TransformError::UnsupportedType {
            column: column.name().to_string(),
            dtype: other.to_string(),
        }),
    }
}

fn parse_string_column(column: &Column) -> Result<Column> {
    let ca = column.str()?;
    let mut values: Vec<Option<f64>> = Vec::with_capacity(ca.len());
    for (row, value) in ca.into_iter().enumerate() {
        let Some(raw) = value else {
            values.push(None);
            continue;
        };
        let Some(parsed) = parse_f64(raw) else {
            return Err(TransformError::TypeCoercion {
                column: column.name().to_string(),
                row,
                value: raw.to_string(),
            });
        };
        values.push(Some(parsed));
    }
    Ok(Series::new(column.name().clone(), values).into_column())
}
