//! Z-score standardization, globally or within groups.
//!
//! Both entry points follow the same shape:
//!
//! 1. coerce the standardize columns of the caller's table to `Float64`
//!    (in place),
//! 2. derive `<col>_standardized = (value - mean) / std` for every
//!    standardize column, using the sample standard deviation (n - 1),
//! 3. drop the requested columns and, unless `keep` is set, the original
//!    standardize columns.
//!
//! Zero or undefined standard deviations are not errors: they surface as
//! NaN / infinite / null values in the output exactly as float division
//! produces them.

use std::collections::HashSet;

use polars::prelude::{DataFrame, Expr, IntoLazy, JoinArgs, JoinType, SortMultipleOptions, col};
use serde::Deserialize;
use tracing::info;

use crate::coerce::coerce_columns_to_float;
use crate::error::{Result, TransformError};
use crate::polars_utils::{column_names, require_columns};
use crate::summary::{mean_column, sample_std, std_column, summarize_by_group};

/// Suffix appended to the name of every derived z-score column.
pub const STANDARDIZED_SUFFIX: &str = "_standardized";

/// Prefix for helper columns that exist only while a join is in flight.
const HELPER_PREFIX: &str = "__tabprep_";
const ROW_INDEX: &str = "__tabprep_row";

/// Name of the z-score column derived from `column`.
pub fn standardized_column(column: &str) -> String {
    format!("{column}{STANDARDIZED_SUFFIX}")
}

/// Column roles for a standardization run.
///
/// Can be built in code or deserialized from a JSON plan:
///
/// ```
/// use tabprep_transform::StandardizeOptions;
///
/// let options = StandardizeOptions::new(["b", "c"])
///     .with_group_columns(["a"])
///     .with_keep(true);
/// assert_eq!(options.standardize_columns, vec!["b", "c"]);
/// assert!(options.is_grouped());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StandardizeOptions {
    /// Columns whose value tuple identifies a group. Empty means one
    /// implicit group spanning the whole table.
    pub group_columns: Vec<String>,
    /// Columns removed from the output.
    pub drop_columns: Vec<String>,
    /// Columns to convert into z-scores.
    pub standardize_columns: Vec<String>,
    /// Keep the original standardize columns next to their z-scores.
    pub keep: bool,
}

impl StandardizeOptions {
    pub fn new<I, S>(standardize_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            standardize_columns: standardize_columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_group_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_drop_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    /// True when z-scores are computed within groups.
    pub fn is_grouped(&self) -> bool {
        !self.group_columns.is_empty()
    }

    /// Copy with repeated names dropped from every list, first occurrence kept.
    #[must_use]
    pub fn deduplicated(&self) -> Self {
        Self {
            group_columns: unique_names(&self.group_columns),
            drop_columns: unique_names(&self.drop_columns),
            standardize_columns: unique_names(&self.standardize_columns),
            keep: self.keep,
        }
    }

    /// Names of the output columns for `input_columns` under these options.
    pub fn output_columns(&self, input_columns: &[String]) -> Vec<String> {
        let mut removed: HashSet<&str> = self.drop_columns.iter().map(String::as_str).collect();
        if !self.keep {
            removed.extend(self.standardize_columns.iter().map(String::as_str));
        }
        let derived: Vec<String> = self
            .standardize_columns
            .iter()
            .map(|name| standardized_column(name))
            .collect();

        let mut output: Vec<String> = input_columns
            .iter()
            .filter(|name| !removed.contains(name.as_str()) && !derived.contains(name))
            .cloned()
            .collect();
        for name in derived {
            if !removed.contains(name.as_str()) {
                output.push(name);
            }
        }
        output
    }
}

/// Standardize using one implicit group spanning all rows.
///
/// `options.group_columns` is ignored. The standardize columns of `df` are
/// converted to `Float64` in place; the returned table is new. Drop columns
/// may name input columns or derived `<col>_standardized` columns.
pub fn standardize(df: &mut DataFrame, options: &StandardizeOptions) -> Result<DataFrame> {
    let options = &options.deduplicated();
    require_drop_columns(df, options)?;
    coerce_columns_to_float(df, &options.standardize_columns)?;

    let derived: Vec<Expr> = options
        .standardize_columns
        .iter()
        .map(|name| {
            let value = col(name.as_str());
            ((value.clone() - value.mean()) / sample_std(name))
                .alias(standardized_column(name))
        })
        .collect();

    let standardized = df.clone().lazy().with_columns(derived).collect()?;
    let output = standardized.select(options.output_columns(&column_names(df)))?;

    info!(
        rows = output.height(),
        columns = output.width(),
        standardized = options.standardize_columns.len(),
        "standardized table"
    );
    Ok(output)
}

/// Standardize within groups of rows sharing the same group-column values.
///
/// Per-group means and standard deviations come from
/// [`summarize_by_group`] and are left-joined back onto the rows; row count
/// and row order of `df` are preserved. Rows with a null group key belong to
/// no group and get a null z-score. With no group columns this is the same
/// as [`standardize`].
pub fn standardize_by_group(df: &mut DataFrame, options: &StandardizeOptions) -> Result<DataFrame> {
    if !options.is_grouped() {
        return standardize(df, options);
    }
    let options = &options.deduplicated();
    require_columns(df, &options.group_columns)?;
    require_drop_columns(df, options)?;
    coerce_columns_to_float(df, &options.standardize_columns)?;

    let summary = summarize_by_group(df, &options.group_columns, &options.standardize_columns)?;
    let summary = rename_summary_helpers(summary, &options.standardize_columns)?;

    let keys: Vec<Expr> = options
        .group_columns
        .iter()
        .map(|name| col(name.as_str()))
        .collect();
    let derived: Vec<Expr> = options
        .standardize_columns
        .iter()
        .map(|name| {
            ((col(name.as_str()) - col(helper_name(&mean_column(name))))
                / col(helper_name(&std_column(name))))
            .alias(standardized_column(name))
        })
        .collect();

    let joined = df
        .clone()
        .lazy()
        .with_row_index(ROW_INDEX, None)
        .join(
            summary.lazy(),
            keys.clone(),
            keys,
            JoinArgs::new(JoinType::Left),
        )
        .sort_by_exprs([col(ROW_INDEX)], SortMultipleOptions::default())
        .with_columns(derived)
        .collect()?;

    let output = joined.select(options.output_columns(&column_names(df)))?;

    info!(
        rows = output.height(),
        columns = output.width(),
        group_columns = options.group_columns.len(),
        standardized = options.standardize_columns.len(),
        "standardized table by group"
    );
    Ok(output)
}

/// Positional form of [`standardize`].
pub fn standardize_columns<D, S>(
    df: &mut DataFrame,
    drop_columns: &[D],
    standardize_columns: &[S],
    keep: bool,
) -> Result<DataFrame>
where
    D: AsRef<str>,
    S: AsRef<str>,
{
    let options = StandardizeOptions::new(owned_names(standardize_columns))
        .with_drop_columns(owned_names(drop_columns))
        .with_keep(keep);
    standardize(df, &options)
}

/// Positional form of [`standardize_by_group`].
pub fn standardize_columns_by_group<G, D, S>(
    df: &mut DataFrame,
    group_columns: &[G],
    drop_columns: &[D],
    standardize_columns: &[S],
    keep: bool,
) -> Result<DataFrame>
where
    G: AsRef<str>,
    D: AsRef<str>,
    S: AsRef<str>,
{
    let options = StandardizeOptions::new(owned_names(standardize_columns))
        .with_group_columns(owned_names(group_columns))
        .with_drop_columns(owned_names(drop_columns))
        .with_keep(keep);
    standardize_by_group(df, &options)
}

/// Every drop column must be an input column or a derived z-score column.
fn require_drop_columns(df: &DataFrame, options: &StandardizeOptions) -> Result<()> {
    for name in &options.drop_columns {
        let derived = options
            .standardize_columns
            .iter()
            .any(|column| standardized_column(column) == *name);
        if !derived && df.get_column_index(name).is_none() {
            return Err(TransformError::missing(name.as_str()));
        }
    }
    Ok(())
}

fn unique_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

fn owned_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names.iter().map(|name| name.as_ref().to_string()).collect()
}

fn helper_name(name: &str) -> String {
    format!("{HELPER_PREFIX}{name}")
}

/// Move summary statistics out of the way of same-named input columns.
fn rename_summary_helpers(mut summary: DataFrame, columns: &[String]) -> Result<DataFrame> {
    for name in columns {
        for stat in [mean_column(name), std_column(name)] {
            summary.rename(&stat, helper_name(&stat).into())?;
        }
    }
    Ok(summary)
}
