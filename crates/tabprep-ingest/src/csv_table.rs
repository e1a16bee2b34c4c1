//! Reading and writing tables as CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Rows sampled by Polars when inferring column types.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 100;

/// Reads a CSV file with a single header row, inferring column types.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    read_table_with_schema_length(path, Some(DEFAULT_INFER_SCHEMA_LENGTH))
}

/// Reads a CSV file keeping every column as text.
///
/// Useful when numeric conversion should be left to the transforms so that
/// unparseable values are reported instead of silently becoming nulls.
pub fn read_table_as_text(path: &Path) -> Result<DataFrame> {
    read_table_with_schema_length(path, Some(0))
}

fn read_table_with_schema_length(
    path: &Path,
    infer_schema_length: Option<usize>,
) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read table"
    );
    Ok(df)
}

/// Writes `df` as CSV with a header row to `path`, replacing any existing file.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_table_to(df, file)?;
    debug!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}

/// Writes `df` as CSV with a header row to any writer.
pub fn write_table_to<W: Write>(df: &mut DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .finish(df)
        .map_err(|e| IngestError::CsvWrite {
            message: e.to_string(),
        })
}
