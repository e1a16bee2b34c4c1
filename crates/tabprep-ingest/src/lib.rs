//! Table input/output for tabprep: CSV files in and out, JSON plans in.

pub mod csv_table;
pub mod error;
pub mod plan;

pub use csv_table::{
    DEFAULT_INFER_SCHEMA_LENGTH, read_table, read_table_as_text, write_table, write_table_to,
};
pub use error::{IngestError, Result};
pub use plan::load_plan;
