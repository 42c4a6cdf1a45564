//! Error types for lc-types.

use thiserror::Error;

/// Errors that can occur when working with types.
#[derive(Debug, Error)]
pub enum TypeError {
    /// Unrecognized perf type key.
    #[error("unknown perf type: {0}")]
    UnknownPerfType(String),

    /// A rating-history point that does not name a real calendar day.
    #[error("invalid date: year {year}, month0 {month0}, day {day}")]
    InvalidDate { year: i32, month0: u32, day: u32 },

    /// A daily series built with the wrong number of days.
    #[error("series must have {expected} days, got {actual}")]
    SeriesLength { expected: usize, actual: usize },
}
