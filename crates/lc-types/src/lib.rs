//! lc-types: Shared data structures for the Lichess rating report
//!
//! This crate defines the types passed between the workspace crates:
//! - [`PerfType`] - Lichess speeds and variants, with API key and history name
//! - [`Leaderboard`] / [`LeaderboardEntry`] - ranked players for one perf type
//! - [`RatingHistory`] / [`RatingHistoryRecord`] - raw per-variant rating points
//! - [`DailySeries`] - a dense 30-day rating series with its two output shapes
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lc_types::{DailySeries, DateFormat};
//!
//! let end = NaiveDate::from_ymd_opt(2024, 10, 31).unwrap();
//! let series = DailySeries::new(end, vec![2400; 30]).unwrap();
//!
//! let mapping = series.as_mapping(DateFormat::Complete);
//! assert_eq!(mapping.get("2024-10-31"), Some(2400));
//!
//! let row = series.as_table_row("alice");
//! assert_eq!(row.cells.len(), 30);
//! ```

mod error;
mod history;
mod leaderboard;
mod perf;
mod series;

pub use error::TypeError;
pub use history::{RatingHistory, RatingHistoryEntry, RatingHistoryRecord};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use perf::PerfType;
pub use series::{
    window_axis, DailyPoint, DailySeries, DateFormat, SeriesMapping, TableRow, MISSING_CELL,
    WINDOW_DAYS,
};
