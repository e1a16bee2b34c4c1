//! Property tests for standardization and labels.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, NamedFrom, Series};
use proptest::prelude::*;

use tabprep_transform::{StandardizeOptions, column_label, standardize, standardize_by_group};

fn grouped_frame(rows: &[(u8, f64)]) -> DataFrame {
    let groups: Vec<String> = rows.iter().map(|(g, _)| format!("g{g}")).collect();
    let values: Vec<f64> = rows.iter().map(|(_, v)| *v).collect();
    DataFrame::new(vec![
        Series::new("group".into(), groups).into(),
        Series::new("value".into(), values).into(),
    ])
    .unwrap()
}

fn mean_and_sample_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

/// Inverse of `column_label`.
fn label_index(label: &str) -> usize {
    label
        .bytes()
        .fold(0usize, |acc, b| acc * 26 + usize::from(b - b'a') + 1)
        - 1
}

proptest! {
    #[test]
    fn grouped_output_keeps_rows_and_normalizes_each_group(
        rows in prop::collection::vec((0u8..4, -1000.0f64..1000.0), 1..40)
    ) {
        let mut df = grouped_frame(&rows);
        let options = StandardizeOptions::new(["value"])
            .with_group_columns(["group"])
            .with_keep(true);
        let out = standardize_by_group(&mut df, &options).unwrap();

        prop_assert_eq!(out.height(), rows.len());
        let groups = out.column("group").unwrap().str().unwrap();
        let values = out.column("value").unwrap().f64().unwrap();
        let z = out.column("value_standardized").unwrap().f64().unwrap();

        let mut by_group: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for (idx, (g, v)) in rows.iter().enumerate() {
            let expected = format!("g{g}");
            prop_assert_eq!(groups.get(idx), Some(expected.as_str()));
            prop_assert_eq!(values.get(idx), Some(*v));
            let entry = by_group.entry(expected).or_default();
            entry.0.push(*v);
            if let Some(score) = z.get(idx) {
                entry.1.push(score);
            }
        }

        for (raw, scores) in by_group.values() {
            if raw.len() < 2 || mean_and_sample_std(raw).1 < 1e-3 {
                continue;
            }
            prop_assert_eq!(scores.len(), raw.len());
            let (mean, std) = mean_and_sample_std(scores);
            prop_assert!(mean.abs() < 1e-6, "group mean {}", mean);
            prop_assert!((std - 1.0).abs() < 1e-6, "group std {}", std);
        }
    }

    #[test]
    fn keep_and_drop_policy_controls_columns(keep in any::<bool>(), drop_group in any::<bool>()) {
        let mut df = grouped_frame(&[(0, 1.0), (0, 2.0), (1, 3.0), (1, 5.0)]);
        let mut options = StandardizeOptions::new(["value"])
            .with_group_columns(["group"])
            .with_keep(keep);
        if drop_group {
            options = options.with_drop_columns(["group"]);
        }
        let out = standardize_by_group(&mut df, &options).unwrap();

        prop_assert_eq!(out.column("value").is_ok(), keep);
        prop_assert_eq!(out.column("group").is_ok(), !drop_group);
        prop_assert!(out.column("value_standardized").is_ok());
    }

    #[test]
    fn single_group_matches_global(values in prop::collection::vec(-100.0f64..100.0, 2..30)) {
        let rows: Vec<(u8, f64)> = values.iter().map(|v| (0u8, *v)).collect();
        let options = StandardizeOptions::new(["value"]).with_drop_columns(["group"]);

        let mut grouped_input = grouped_frame(&rows);
        let grouped = standardize_by_group(
            &mut grouped_input,
            &options.clone().with_group_columns(["group"]),
        )
        .unwrap();
        let mut global_input = grouped_frame(&rows);
        let global = standardize(&mut global_input, &options).unwrap();

        let a = grouped.column("value_standardized").unwrap().f64().unwrap();
        let b = global.column("value_standardized").unwrap().f64().unwrap();
        for (x, y) in a.into_iter().zip(b.into_iter()) {
            match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                    prop_assert!((x - y).abs() < 1e-9);
                }
                (x, y) => prop_assert_eq!(
                    x.is_none_or(|v| !v.is_finite()),
                    y.is_none_or(|v| !v.is_finite())
                ),
            }
        }
    }

    #[test]
    fn labels_are_a_bijection(index in 0usize..20_000) {
        let label = column_label(index);
        prop_assert!(label.bytes().all(|b| b.is_ascii_lowercase()));
        prop_assert_eq!(label_index(&label), index);

        let next = column_label(index + 1);
        prop_assert!((label.len(), &label) < (next.len(), &next));
    }
}
