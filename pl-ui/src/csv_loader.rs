//! CSV loader for forecast percentage parameters.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive and must match exactly.
//!
//! | Column     | Type    | Notes                                              |
//! |------------|---------|----------------------------------------------------|
//! | `category` | string  | `revenue-index`, `cost-ratio` or `sga-ratio`       |
//! | `index`    | integer | Zero-based window position, `0` to `9`             |
//! | `value`    | decimal | Percentage in `0` to `999.9`, one decimal kept     |
//!
//! Slots not mentioned keep their defaults. A later row for the same slot
//! overwrites an earlier one.
//!
//! ### Example
//!
//! ```csv
//! category,index,value
//! revenue-index,5,105.0
//! cost-ratio,5,68.5
//! sga-ratio,9,18.0
//! ```
use std::path::Path;

use pl_core::{ParameterCategory, ParameterError, PercentageParameterSet};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    category: String,
    index: usize,
    value: Decimal,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading parameter CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read parameter file: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `category` cell is not one of the recognised keys. `row` is
    /// 1-based (header = row 0).
    #[error("unrecognised category '{category}' on row {row}")]
    InvalidCategory { category: String, row: usize },

    /// The value or index was rejected by the parameter set.
    #[error("row {row}: {source}")]
    InvalidParameter {
        row: usize,
        #[source]
        source: ParameterError,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn apply_row(
    params: &mut PercentageParameterSet,
    row: CsvRow,
    row_number: usize,
) -> Result<(), CsvLoadError> {
    let category = row
        .category
        .parse::<ParameterCategory>()
        .map_err(|_| CsvLoadError::InvalidCategory {
            category: row.category.clone(),
            row: row_number,
        })?;

    params
        .set(category, row.index, row.value)
        .map_err(|source| CsvLoadError::InvalidParameter {
            row: row_number,
            source,
        })
}

/// Parse CSV text and apply every row on top of the default parameters.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid.
/// * [CsvLoadError::InvalidCategory] – if a row names an unknown category.
/// * [CsvLoadError::InvalidParameter] – if a row's index or value is
///   rejected.
pub fn load_from_str(input: &str) -> Result<PercentageParameterSet, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    let mut params = PercentageParameterSet::default();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        apply_row(&mut params, row, idx + 1)?;
    }
    Ok(params)
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<PercentageParameterSet, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    let params = load_from_str(&contents)?;
    debug!(path = %path.display(), "parameters loaded");
    Ok(params)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
