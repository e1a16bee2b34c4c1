//! Standardization plans stored as JSON.
//!
//! A plan file holds the column roles for a standardization run:
//!
//! ```json
//! {
//!   "group_columns": ["site"],
//!   "drop_columns": ["comment"],
//!   "standardize_columns": ["weight", "height"],
//!   "keep": true
//! }
//! ```
//!
//! Every field is optional and defaults to empty / `false`.

use std::fs;
use std::path::Path;

use tabprep_transform::StandardizeOptions;

use crate::error::{IngestError, Result};

/// Load a [`StandardizeOptions`] plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<StandardizeOptions> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| IngestError::PlanParse {
        path: path.to_path_buf(),
        source,
    })
}
