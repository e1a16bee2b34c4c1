//! Tabular data preparation transforms.
//!
//! This crate provides transforms over Polars DataFrames:
//!
//! - **coerce**: conversion of named columns to `Float64`
//! - **summary**: per-group mean and sample standard deviation
//! - **standardize**: z-score columns, globally or within groups
//! - **obfuscate**: opaque column renaming and key-based value rescaling
//! - **labels**: the lazy `a, b, ..., aa, ab, ...` label sequence

pub mod coerce;
pub mod error;
pub mod labels;
pub mod obfuscate;
pub mod polars_utils;
pub mod standardize;
pub mod summary;

// Re-export common functions for external use
pub use coerce::{coerce_columns_to_float, column_to_float};
pub use error::{Result, TransformError};
pub use labels::{ColumnLabels, column_label};
pub use obfuscate::{obfuscate_column_names, obfuscate_numeric_values};
pub use standardize::{
    STANDARDIZED_SUFFIX, StandardizeOptions, standardize, standardize_by_group,
    standardize_columns, standardize_columns_by_group, standardized_column,
};
pub use summary::{mean_column, std_column, summarize_by_group};
