//! Errors raised at the ingestion boundary
//!
//! Everything past ingestion is total: zero denominators fall back to 0,
//! unknown exercises fall back to `Category::Other`, and empty subsets give
//! zero-filled results.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    #[error("{source_id}: missing required column '{column}'")]
    MissingRequiredColumn { source_id: String, column: String },

    #[error("{source_id} row {row}: malformed timestamp in '{column}': {value:?}")]
    MalformedTimestamp {
        source_id: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("{source_id} row {row}: malformed number in '{column}': {value:?}")]
    MalformedNumber {
        source_id: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("period boundary month must be within 1..=12, got {0}")]
    InvalidPeriodBoundary(u32),
}
