//! Error types for scheduling, parsing and file import/export.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Failures of the review operation and of scheduler construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Card is not due for review until {due}.")]
    NotDue { due: NaiveDateTime },

    #[error("box_intervals must contain at least one box")]
    EmptyIntervals,

    #[error("box interval at position {index} must be at least one day")]
    ZeroInterval { index: usize },

    #[error("card box {box_number} is outside 1..={boxes}")]
    BoxOutOfRange { box_number: usize, boxes: usize },

    #[error("due date falls outside the representable date range")]
    DateOutOfRange,
}

/// Malformed persisted data: missing keys, uncoercible values, unknown enum values.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed input: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
