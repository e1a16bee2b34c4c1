//! Per-group mean and sample standard deviation.

use polars::prelude::{DataFrame, Expr, IntoLazy, SortMultipleOptions, col, lit, when};
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::polars_utils::require_columns;

/// Suffix of the per-group mean column produced for each summary column.
pub const MEAN_SUFFIX: &str = "_mean";
/// Suffix of the per-group standard deviation column.
pub const STD_SUFFIX: &str = "_std";

/// Name of the mean column for `column` in a summary table.
pub fn mean_column(column: &str) -> String {
    format!("{column}{MEAN_SUFFIX}")
}

/// Name of the standard deviation column for `column` in a summary table.
pub fn std_column(column: &str) -> String {
    format!("{column}{STD_SUFFIX}")
}

/// Sample standard deviation (n - 1) of `column`, NaN when fewer than two
/// non-null values exist.
pub(crate) fn sample_std(column: &str) -> Expr {
    when(col(column).count().lt(lit(2)))
        .then(lit(f64::NAN))
        .otherwise(col(column).std(1))
}

/// Compute mean and sample standard deviation (n - 1) of each summary
/// column within every group of rows sharing the same group-column values.
///
/// The result has one row per distinct group key, with the group columns
/// followed by `<col>_mean` and `<col>_std` for each summary column in the
/// order given. Rows are sorted ascending by group key. Rows with a null in
/// any group column belong to no group and are left out. A group with a
/// single value has a NaN standard deviation.
pub fn summarize_by_group<G, S>(
    df: &DataFrame,
    group_columns: &[G],
    summary_columns: &[S],
) -> Result<DataFrame>
where
    G: AsRef<str>,
    S: AsRef<str>,
{
    if group_columns.is_empty() {
        return Err(TransformError::EmptyColumnList { role: "group-by" });
    }
    if summary_columns.is_empty() {
        return Err(TransformError::EmptyColumnList { role: "summary" });
    }
    require_columns(df, group_columns)?;
    require_columns(df, summary_columns)?;

    let keys: Vec<Expr> = group_columns.iter().map(|name| col(name.as_ref())).collect();
    let aggregations: Vec<Expr> = summary_columns
        .iter()
        .flat_map(|name| {
            let name = name.as_ref();
            [
                col(name).mean().alias(mean_column(name)),
                sample_std(name).alias(std_column(name)),
            ]
        })
        .collect();

    let mut lf = df.clone().lazy();
    if let Some(has_key) = keys
        .iter()
        .map(|key| key.clone().is_not_null())
        .reduce(|acc, expr| acc.and(expr))
    {
        lf = lf.filter(has_key);
    }
    let summary = lf
        .group_by_stable(keys.clone())
        .agg(aggregations)
        .sort_by_exprs(keys, SortMultipleOptions::default().with_maintain_order(true))
        .collect()?;

    debug!(
        groups = summary.height(),
        rows = df.height(),
        "computed group summaries"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("a".into(), vec!["B", "A", "B", "A", "C"]).into(),
            Series::new("b".into(), vec![6.0, 4.0, 7.0, 5.0, 1.0]).into(),
            Series::new("c".into(), vec![9.0, 7.0, 10.0, 8.0, 2.0]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_columns_and_order() {
        let summary = summarize_by_group(&frame(), &["a"], &["b", "c"]).unwrap();
        let names: Vec<&str> = summary
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b_mean", "b_std", "c_mean", "c_std"]);

        let keys = summary.column("a").unwrap().str().unwrap();
        assert_eq!(keys.get(0), Some("A"));
        assert_eq!(keys.get(1), Some("B"));
        assert_eq!(keys.get(2), Some("C"));
    }

    #[test]
    fn test_summary_uses_sample_std() {
        let summary = summarize_by_group(&frame(), &["a"], &["b"]).unwrap();
        let mean = summary.column("b_mean").unwrap().f64().unwrap();
        let std = summary.column("b_std").unwrap().f64().unwrap();
        assert_eq!(mean.get(0), Some(4.5));
        assert!((std.get(0).unwrap() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        // Single-member group: undefined, not zero
        assert!(std.get(2).unwrap().is_nan());
    }

    #[test]
    fn test_summary_multi_key_groups() {
        let df = DataFrame::new(vec![
            Series::new("g1".into(), vec!["x", "x", "y", "x"]).into(),
            Series::new("g2".into(), vec![1i64, 2, 1, 1]).into(),
            Series::new("v".into(), vec![1.0, 2.0, 3.0, 5.0]).into(),
        ])
        .unwrap();
        let summary = summarize_by_group(&df, &["g1", "g2"], &["v"]).unwrap();
        assert_eq!(summary.height(), 3);
        let mean = summary.column("v_mean").unwrap().f64().unwrap();
        // (x,1), (x,2), (y,1)
        assert_eq!(mean.get(0), Some(3.0));
        assert_eq!(mean.get(1), Some(2.0));
        assert_eq!(mean.get(2), Some(3.0));
    }

    #[test]
    fn test_summary_errors() {
        let df = frame();
        let none: [&str; 0] = [];
        assert!(matches!(
            summarize_by_group(&df, &none, &["b"]),
            Err(TransformError::EmptyColumnList { role: "group-by" })
        ));
        assert!(matches!(
            summarize_by_group(&df, &["a"], &none),
            Err(TransformError::EmptyColumnList { role: "summary" })
        ));
        assert!(matches!(
            summarize_by_group(&df, &["zz"], &["b"]),
            Err(TransformError::MissingColumn { .. })
        ));
        assert!(matches!(
            summarize_by_group(&df, &["a"], &["zz"]),
            Err(TransformError::MissingColumn { .. })
        ));
    }
}
