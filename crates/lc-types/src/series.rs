//! Dense daily rating series.
//!
//! A [`DailySeries`] holds exactly [`WINDOW_DAYS`] consecutive days ending at
//! a reference date, one rating per day, oldest first. It has two fixed
//! output shapes:
//!
//! - [`DailySeries::as_mapping`]: rendered date -> rating, for printing as JSON.
//! - [`DailySeries::as_table_row`]: a username plus one cell per day, for the
//!   wide CSV export.

use crate::TypeError;
use chrono::{Duration, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Number of days in a series.
pub const WINDOW_DAYS: usize = 30;

/// The `WINDOW_DAYS` consecutive dates ending at `end`, oldest first.
pub fn window_axis(end: NaiveDate) -> Vec<NaiveDate> {
    let start = end - Duration::days(WINDOW_DAYS as i64 - 1);
    (0..WINDOW_DAYS as i64)
        .map(|offset| start + Duration::days(offset))
        .collect()
}

/// How dates are rendered as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// ISO `YYYY-MM-DD`.
    #[default]
    Complete,
    /// Month abbreviation and zero-padded day, e.g. `Oct 07`.
    Abbreviated,
}

impl DateFormat {
    /// The strftime pattern for this format.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Complete => "%Y-%m-%d",
            DateFormat::Abbreviated => "%b %d",
        }
    }

    pub fn render(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

/// One day of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub rating: i32,
}

/// Exactly [`WINDOW_DAYS`] ratings for the days ending at `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySeries {
    end: NaiveDate,
    points: Vec<DailyPoint>,
}

impl DailySeries {
    /// Pair `ratings` (oldest first) with the window ending at `end`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::SeriesLength`] unless exactly [`WINDOW_DAYS`]
    /// ratings are given.
    pub fn new(end: NaiveDate, ratings: Vec<i32>) -> Result<Self, TypeError> {
        if ratings.len() != WINDOW_DAYS {
            return Err(TypeError::SeriesLength {
                expected: WINDOW_DAYS,
                actual: ratings.len(),
            });
        }

        let points = window_axis(end)
            .into_iter()
            .zip(ratings)
            .map(|(date, rating)| DailyPoint { date, rating })
            .collect();

        Ok(Self { end, points })
    }

    /// Last (most recent) day of the window.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// First (oldest) day of the window.
    pub fn start(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn points(&self) -> &[DailyPoint] {
        &self.points
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn ratings(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.rating).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rating on a given day, if it is inside the window.
    pub fn rating_on(&self, date: NaiveDate) -> Option<i32> {
        self.points
            .iter()
            .find(|p| p.date == date)
            .map(|p| p.rating)
    }

    /// Rendered date -> rating, oldest first.
    pub fn as_mapping(&self, format: DateFormat) -> SeriesMapping {
        SeriesMapping(
            self.points
                .iter()
                .map(|p| (format.render(p.date), p.rating))
                .collect(),
        )
    }

    /// One export-table row for `username`.
    pub fn as_table_row(&self, username: impl Into<String>) -> TableRow {
        TableRow {
            username: username.into(),
            columns: self.dates(),
            cells: self.points.iter().map(|p| Some(p.rating)).collect(),
        }
    }
}

/// Ordered date -> rating pairs.
///
/// Serializes as a JSON object whose keys keep date order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesMapping(Vec<(String, i32)>);

impl SeriesMapping {
    pub fn get(&self, date: &str) -> Option<i32> {
        self.0
            .iter()
            .find(|(d, _)| d == date)
            .map(|(_, rating)| *rating)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(d, r)| (d.as_str(), *r))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|(d, _)| d.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SeriesMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (date, rating) in &self.0 {
            map.serialize_entry(date, rating)?;
        }
        map.end()
    }
}

/// Placeholder written for cells without a rating.
pub const MISSING_CELL: &str = "N/A";

/// A username and one optional rating per column date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub username: String,

    /// Column dates, oldest first.
    pub columns: Vec<NaiveDate>,

    /// One cell per column; `None` renders as [`MISSING_CELL`].
    pub cells: Vec<Option<i32>>,
}

impl TableRow {
    /// A row with every cell missing, on the window ending at `end`.
    pub fn unavailable(username: impl Into<String>, end: NaiveDate) -> Self {
        Self {
            username: username.into(),
            columns: window_axis(end),
            cells: vec![None; WINDOW_DAYS],
        }
    }

    /// Cells rendered as strings (integer or [`MISSING_CELL`]).
    pub fn rendered_cells(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| match cell {
                Some(rating) => rating.to_string(),
                None => MISSING_CELL.to_string(),
            })
            .collect()
    }

    /// True when every cell is missing.
    pub fn is_unavailable(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)?;
        for cell in self.rendered_cells() {
            write!(f, ",{}", cell)?;
        }
        Ok(())
    }
}
