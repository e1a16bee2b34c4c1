use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use tabprep_ingest::{load_plan, read_table, read_table_as_text, write_table, write_table_to};
use tabprep_transform::{
    StandardizeOptions, obfuscate_column_names, obfuscate_numeric_values, standardize_by_group,
};

use crate::cli::{ObfuscateArgs, StandardizeArgs};
use crate::logging::redact_value;
use crate::summary::RunSummary;

pub fn run_standardize(args: &StandardizeArgs) -> Result<RunSummary> {
    let span = info_span!("standardize", input = %args.input.display());
    let _guard = span.enter();

    let options = standardize_options(args)?;
    if options.standardize_columns.is_empty() {
        bail!("no columns to standardize: pass --column or a plan with standardize_columns");
    }

    let mut df = if args.as_text {
        read_table_as_text(&args.input)
    } else {
        read_table(&args.input)
    }
    .with_context(|| format!("read {}", args.input.display()))?;
    info!(rows = df.height(), columns = df.width(), "loaded input");

    let mut output = standardize_by_group(&mut df, &options).context("standardize table")?;
    emit(&mut output, args.output.as_deref())?;

    Ok(RunSummary::new(
        "standardize",
        args.input.clone(),
        args.output.clone(),
        &output,
    ))
}

pub fn run_obfuscate(args: &ObfuscateArgs) -> Result<RunSummary> {
    let span = info_span!("obfuscate", input = %args.input.display());
    let _guard = span.enter();

    if args.key.is_none() && args.no_rename {
        bail!("nothing to do: pass --key or drop --no-rename");
    }

    let mut df = read_table(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;

    if let Some(key_path) = &args.key {
        let key = read_table(key_path)
            .with_context(|| format!("read key {}", key_path.display()))?;
        log_key(&key);
        obfuscate_numeric_values(&mut df, &key).context("rescale values by key")?;
    }
    if !args.no_rename {
        obfuscate_column_names(&mut df).context("rename columns")?;
    }

    emit(&mut df, args.output.as_deref())?;
    Ok(RunSummary::new(
        "obfuscate",
        args.input.clone(),
        args.output.clone(),
        &df,
    ))
}

/// Merge a JSON plan with command-line flags; non-empty flags replace plan fields.
pub fn standardize_options(args: &StandardizeArgs) -> Result<StandardizeOptions> {
    let mut options = match &args.plan {
        Some(path) => load_plan(path).with_context(|| format!("load plan {}", path.display()))?,
        None => StandardizeOptions::default(),
    };
    if !args.group_by.is_empty() {
        options.group_columns = args.group_by.clone();
    }
    if !args.columns.is_empty() {
        options.standardize_columns = args.columns.clone();
    }
    if !args.drop.is_empty() {
        options.drop_columns = args.drop.clone();
    }
    options.keep |= args.keep;
    Ok(options)
}

fn emit(df: &mut DataFrame, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_table(df, path).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), rows = df.height(), "wrote output");
        }
        None => write_table_to(df, io::stdout().lock()).context("write stdout")?,
    }
    Ok(())
}

fn log_key(key: &DataFrame) {
    for column in key.get_columns() {
        let value = column
            .get(0)
            .map(|value| value.to_string())
            .unwrap_or_default();
        debug!(column = %column.name(), divisor = %redact_value(&value), "key divisor");
    }
}
