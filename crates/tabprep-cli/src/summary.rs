//! Human-readable summaries of a transformed table.

use std::path::PathBuf;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{ChunkAgg, ChunkVar, DataFrame, DataType};

/// Per-column statistics of an output table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub nulls: usize,
    /// Mean of a `Float64` column, ignoring nulls.
    pub mean: Option<f64>,
    /// Sample standard deviation of a `Float64` column, ignoring nulls.
    pub std: Option<f64>,
}

/// Outcome of one CLI command, shown after the run.
#[derive(Debug)]
pub struct RunSummary {
    pub command: &'static str,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl RunSummary {
    pub fn new(command: &'static str, input: PathBuf, output: Option<PathBuf>, df: &DataFrame) -> Self {
        Self {
            command,
            input,
            output,
            rows: df.height(),
            columns: summarize_columns(df),
        }
    }
}

/// Collect [`ColumnSummary`] rows for every column of `df`, in table order.
pub fn summarize_columns(df: &DataFrame) -> Vec<ColumnSummary> {
    df.get_columns()
        .iter()
        .map(|column| {
            let (mean, std) = match column.f64() {
                Ok(ca) if matches!(column.dtype(), DataType::Float64) => (ca.mean(), ca.std(1)),
                _ => (None, None),
            };
            ColumnSummary {
                name: column.name().to_string(),
                dtype: column.dtype().to_string(),
                nulls: column.null_count(),
                mean,
                std,
            }
        })
        .collect()
}

/// Plain-text rows (`name | type | nulls | mean | std`) used by the table.
pub fn summary_rows(columns: &[ColumnSummary]) -> Vec<[String; 5]> {
    columns
        .iter()
        .map(|column| {
            [
                column.name.clone(),
                column.dtype.clone(),
                column.nulls.to_string(),
                format_stat(column.mean),
                format_stat(column.std),
            ]
        })
        .collect()
}

pub fn print_summary(summary: &RunSummary) {
    eprintln!("Command: {}", summary.command);
    eprintln!("Input: {}", summary.input.display());
    match &summary.output {
        Some(path) => eprintln!("Output: {}", path.display()),
        None => eprintln!("Output: <stdout>"),
    }
    eprintln!("Rows: {}", summary.rows);
    eprintln!("{}", build_table(&summary.columns));
}

pub fn build_table(columns: &[ColumnSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
        header_cell("Mean"),
        header_cell("Std"),
    ]);
    apply_table_style(&mut table);
    for idx in 2..5 {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    for (summary, row) in columns.iter().zip(summary_rows(columns)) {
        let [name, dtype, nulls, mean, std] = row;
        let nulls_cell = if summary.nulls > 0 {
            Cell::new(nulls).fg(Color::Yellow).add_attribute(Attribute::Bold)
        } else {
            dim_cell(nulls)
        };
        table.add_row(vec![
            Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold),
            dim_cell(dtype),
            nulls_cell,
            Cell::new(mean),
            Cell::new(std),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_nan() => "NaN".to_string(),
        Some(v) => format!("{v:.4}"),
        None => "-".to_string(),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
