//! Column-name and value obfuscation.

use polars::prelude::{DataFrame, Expr, IntoLazy, col, lit};
use tracing::{info, warn};

use crate::coerce::coerce_columns_to_float;
use crate::error::{Result, TransformError};
use crate::labels::ColumnLabels;
use crate::polars_utils::{any_to_f64, column_names, require_columns};

/// Rename every column of `df` to `a, b, ..., z, aa, ab, ...` in table order.
pub fn obfuscate_column_names(df: &mut DataFrame) -> Result<()> {
    let width = df.width();
    df.set_column_names(ColumnLabels::new().take(width))?;
    info!(columns = width, "obfuscated column names");
    Ok(())
}

/// Divide every column named in `key` by the key's first-row value for it.
///
/// `key` is a one-row table whose columns name the columns of `df` to
/// rescale. Target columns are converted to `Float64` first. Fails before
/// touching `df` if the key has no rows, names a column `df` lacks, or holds
/// a non-numeric divisor.
pub fn obfuscate_numeric_values(df: &mut DataFrame, key: &DataFrame) -> Result<()> {
    if key.height() == 0 {
        return Err(TransformError::EmptyKey);
    }
    let key_columns = column_names(key);
    require_columns(df, &key_columns)?;

    let mut divisions: Vec<Expr> = Vec::with_capacity(key_columns.len());
    for name in &key_columns {
        let raw = key.column(name)?.get(0)?;
        let Some(divisor) = any_to_f64(raw.clone()) else {
            return Err(TransformError::TypeCoercion {
                column: name.clone(),
                row: 0,
                value: raw.to_string(),
            });
        };
        if divisor == 0.0 {
            warn!(column = %name, "obfuscation key divisor is zero");
        }
        divisions.push((col(name.as_str()) / lit(divisor)).alias(name.as_str()));
    }

    coerce_columns_to_float(df, &key_columns)?;
    *df = df.clone().lazy().with_columns(divisions).collect()?;

    info!(
        columns = key_columns.len(),
        rows = df.height(),
        "obfuscated numeric values"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn animals() -> DataFrame {
        DataFrame::new(vec![
            Series::new("cat".into(), vec![1i64, 3, 0]).into(),
            Series::new("dog".into(), vec![1i64, 0, 1]).into(),
            Series::new("bird".into(), vec![0i64, 0, 2]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_rename_three_columns() {
        let mut df = animals();
        obfuscate_column_names(&mut df).unwrap();
        assert_eq!(column_names(&df), vec!["a", "b", "c"]);
        // Values are untouched
        let a = df.column("a").unwrap().i64().unwrap();
        assert_eq!(a.get(1), Some(3));
    }

    #[test]
    fn test_rename_is_idempotent() {
        let mut df = animals();
        obfuscate_column_names(&mut df).unwrap();
        obfuscate_column_names(&mut df).unwrap();
        assert_eq!(column_names(&df), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_key_with_non_numeric_divisor() {
        let mut df = animals();
        let key = DataFrame::new(vec![Series::new("cat".into(), vec!["three"]).into()]).unwrap();
        assert!(matches!(
            obfuscate_numeric_values(&mut df, &key),
            Err(TransformError::TypeCoercion { row: 0, .. })
        ));
        assert_eq!(
            df.column("cat").unwrap().dtype(),
            &polars::prelude::DataType::Int64
        );
    }

    #[test]
    fn test_zero_divisor_follows_float_semantics() {
        let mut df = animals();
        let key = DataFrame::new(vec![Series::new("bird".into(), vec![0i64]).into()]).unwrap();
        obfuscate_numeric_values(&mut df, &key).unwrap();
        let bird = df.column("bird").unwrap().f64().unwrap();
        assert!(bird.get(0).unwrap().is_nan());
        assert!(bird.get(2).unwrap().is_infinite());
    }
}
