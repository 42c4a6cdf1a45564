//! Rating-history types.
//!
//! The rating-history endpoint returns one entry per perf type, each with a
//! list of points encoded as `[year, month, day, rating]`. The month is
//! zero-based (January is `0`), and there is at most one point per day.
//!
//! ```json
//! [
//!   {"name": "Bullet", "points": [[2011, 0, 8, 1472], [2011, 0, 9, 1332]]},
//!   {"name": "Classical", "points": [[2024, 9, 2, 2410]]}
//! ]
//! ```

use crate::TypeError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One rating observation as sent by the API.
///
/// Serialized as the wire tuple `[year, month0, day, rating]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, u32, u32, i32)", into = "(i32, u32, u32, i32)")]
pub struct RatingHistoryRecord {
    pub year: i32,

    /// Zero-based month (January = 0).
    pub month0: u32,

    pub day: u32,

    pub rating: i32,
}

impl RatingHistoryRecord {
    /// Build a record from a calendar date.
    pub fn on(date: NaiveDate, rating: i32) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
            day: date.day(),
            rating,
        }
    }

    /// The calendar date of this record, or `None` if the fields do not
    /// name a real day.
    pub fn date(&self) -> Option<NaiveDate> {
        self.month0
            .checked_add(1)
            .and_then(|month| NaiveDate::from_ymd_opt(self.year, month, self.day))
    }

    /// Like [`date`](Self::date), but reports the bad fields.
    pub fn try_date(&self) -> Result<NaiveDate, TypeError> {
        self.date().ok_or(TypeError::InvalidDate {
            year: self.year,
            month0: self.month0,
            day: self.day,
        })
    }
}

impl From<(i32, u32, u32, i32)> for RatingHistoryRecord {
    fn from((year, month0, day, rating): (i32, u32, u32, i32)) -> Self {
        Self {
            year,
            month0,
            day,
            rating,
        }
    }
}

impl From<RatingHistoryRecord> for (i32, u32, u32, i32) {
    fn from(r: RatingHistoryRecord) -> Self {
        (r.year, r.month0, r.day, r.rating)
    }
}

/// The history of a single perf type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistoryEntry {
    /// Display name of the perf type (e.g. "Classical").
    pub name: String,

    /// Points in the order the API sent them (chronological).
    pub points: Vec<RatingHistoryRecord>,
}

/// Full rating history of one user, across all perf types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingHistory(pub Vec<RatingHistoryEntry>);

impl RatingHistory {
    pub fn new(entries: Vec<RatingHistoryEntry>) -> Self {
        Self(entries)
    }

    /// Find the entry with exactly this name (case-sensitive).
    pub fn variant(&self, name: &str) -> Option<&RatingHistoryEntry> {
        self.0.iter().find(|entry| entry.name == name)
    }

    /// Names of all variants present, in payload order.
    pub fn variant_names(&self) -> Vec<&str> {
        self.0.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[RatingHistoryEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
