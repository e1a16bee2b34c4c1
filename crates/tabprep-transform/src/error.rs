//! Error types for table transforms.

use thiserror::Error;

/// Errors that can occur while standardizing or obfuscating a table.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// A referenced column is not present in the table (or key table).
    #[error("column '{column}' not found in table")]
    MissingColumn { column: String },

    /// A value could not be converted to a 64-bit float.
    #[error("cannot convert value '{value}' in column '{column}' (row {row}) to float")]
    TypeCoercion {
        column: String,
        row: usize,
        value: String,
    },

    /// The column's data type has no floating-point representation.
    #[error("column '{column}' has type {dtype} which cannot be converted to float")]
    UnsupportedType { column: String, dtype: String },

    /// The obfuscation key table has no rows.
    #[error("obfuscation key has no rows")]
    EmptyKey,

    /// A column list that must name at least one column was empty.
    #[error("no {role} columns were given")]
    EmptyColumnList { role: &'static str },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    DataFrame(#[from] polars::error::PolarsError),
}

impl TransformError {
    pub(crate) fn missing(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
