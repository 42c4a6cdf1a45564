//! Daily series builder.
//!
//! Turns one user's sparse rating history into a dense [`DailySeries`]:
//!
//! 1. Pick the entry for the configured perf type (exact name match).
//! 2. Keep points dated within `[reference - 30 days, reference]`.
//! 3. Lay out the 30 days ending at `reference`.
//! 4. Use the observed rating where there is one, otherwise carry the
//!    previous known rating forward; days before the first known rating
//!    take that first rating.
//!
//! An observation on `reference - 30` is inside the window but not on the
//! axis. It still counts as the rating in effect when the axis begins.

use crate::error::ReportError;
use chrono::{Duration, NaiveDate};
use lc_types::{window_axis, DailySeries, PerfType, RatingHistory, RatingHistoryRecord};
use std::collections::BTreeMap;

/// How far back (in days) a point may be and still count.
pub const LOOKBACK_DAYS: i64 = 30;

/// How history points are scanned for the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryScan {
    /// Check every point. No assumption about ordering.
    #[default]
    Full,

    /// Walk newest to oldest and stop at the first point older than the
    /// window. Only correct when the points are chronological, which the
    /// API does not promise.
    StopAtFirstStale,
}

/// Builder settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesOptions {
    pub perf_type: PerfType,
    pub scan: HistoryScan,
}

impl SeriesOptions {
    pub fn new(perf_type: PerfType) -> Self {
        Self {
            perf_type,
            scan: HistoryScan::default(),
        }
    }

    pub fn with_scan(mut self, scan: HistoryScan) -> Self {
        self.scan = scan;
        self
    }
}

/// Build the dense series for the 30 days ending at `reference_date`.
///
/// # Errors
///
/// Returns [`ReportError::EmptyHistory`] when the perf type is absent from
/// `history` or has no points inside the window.
pub fn build_daily_series(
    history: &RatingHistory,
    reference_date: NaiveDate,
    options: &SeriesOptions,
) -> Result<DailySeries, ReportError> {
    let variant = options.perf_type.history_name();
    let empty = || ReportError::EmptyHistory {
        variant: variant.to_string(),
    };

    let entry = history.variant(variant).ok_or_else(empty)?;
    let observed = collect_window(&entry.points, reference_date, options.scan);

    tracing::debug!(
        "{} of {} {} points fall in the window ending {}",
        observed.len(),
        entry.points.len(),
        variant,
        reference_date
    );

    let ratings = fill_window(&observed, reference_date).ok_or_else(empty)?;
    Ok(DailySeries::new(reference_date, ratings)?)
}

/// In-window observations keyed by date. For duplicate dates the point
/// that comes later in the payload wins.
pub(crate) fn collect_window(
    points: &[RatingHistoryRecord],
    reference_date: NaiveDate,
    scan: HistoryScan,
) -> BTreeMap<NaiveDate, i32> {
    let earliest = reference_date - Duration::days(LOOKBACK_DAYS);
    let mut observed = BTreeMap::new();

    match scan {
        HistoryScan::Full => {
            for point in points {
                let Some(date) = valid_date(point) else {
                    continue;
                };
                if earliest <= date && date <= reference_date {
                    observed.insert(date, point.rating);
                }
            }
        }
        HistoryScan::StopAtFirstStale => {
            for point in points.iter().rev() {
                let Some(date) = valid_date(point) else {
                    continue;
                };
                if date < earliest {
                    break;
                }
                if date <= reference_date {
                    observed.entry(date).or_insert(point.rating);
                }
            }
        }
    }

    observed
}

fn valid_date(point: &RatingHistoryRecord) -> Option<NaiveDate> {
    let date = point.date();
    if date.is_none() {
        tracing::warn!("Skipping rating point with invalid date: {:?}", point);
    }
    date
}

/// Lay observations onto the axis ending at `reference_date` and fill the
/// gaps. `None` when there is nothing to fill from.
pub(crate) fn fill_window(
    observed: &BTreeMap<NaiveDate, i32>,
    reference_date: NaiveDate,
) -> Option<Vec<i32>> {
    let axis = window_axis(reference_date);
    let seed = observed
        .range(..axis[0])
        .next_back()
        .map(|(_, rating)| *rating);

    let mut cells: Vec<Option<i32>> = axis.iter().map(|date| observed.get(date).copied()).collect();
    fill_gaps(&mut cells, seed);

    cells.into_iter().collect()
}

/// Forward-fill `cells` (starting from `seed`), then back-fill any leading
/// gap from the first known value.
pub fn fill_gaps(cells: &mut [Option<i32>], seed: Option<i32>) {
    let mut carry = seed;
    for cell in cells.iter_mut() {
        if cell.is_some() {
            carry = *cell;
        } else {
            *cell = carry;
        }
    }

    let Some(first) = cells.iter().flatten().next().copied() else {
        return;
    };
    for cell in cells.iter_mut() {
        if cell.is_some() {
            break;
        }
        *cell = Some(first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_types::{RatingHistoryEntry, WINDOW_DAYS};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reference() -> NaiveDate {
        date(2024, 10, 31)
    }

    fn history(name: &str, points: Vec<RatingHistoryRecord>) -> RatingHistory {
        RatingHistory::new(vec![RatingHistoryEntry {
            name: name.to_string(),
            points,
        }])
    }

    fn classical(points: Vec<RatingHistoryRecord>) -> RatingHistory {
        history("Classical", points)
    }

    fn days_before(n: i64) -> NaiveDate {
        reference() - Duration::days(n)
    }

    #[test]
    fn test_uniform_daily_observations() {
        // One point per day for 60 days, 2000 on the reference date and one less per day back
        let points = (0..60)
            .rev()
            .map(|n| RatingHistoryRecord::on(days_before(n), 2000 - n as i32))
            .collect();

        let series = build_daily_series(&classical(points), reference(), &SeriesOptions::default()).unwrap();

        assert_eq!(series.len(), WINDOW_DAYS);
        assert_eq!(series.end(), reference());
        assert_eq!(series.start(), days_before(29));
        let dates = series.dates();
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        let expected: Vec<i32> = (0..30).rev().map(|n| 2000 - n).collect();
        assert_eq!(series.ratings(), expected);
    }

    #[test]
    fn test_single_point_on_reference_fills_everything() {
        let points = vec![RatingHistoryRecord::on(reference(), 1500)];
        let series = build_daily_series(&classical(points), reference(), &SeriesOptions::default()).unwrap();
        assert_eq!(series.ratings(), vec![1500; 30]);
    }

    #[test]
    fn test_first_and_last_day_only() {
        let points = vec![
            RatingHistoryRecord::on(days_before(29), 1800),
            RatingHistoryRecord::on(reference(), 1900),
        ];
        let series = build_daily_series(&classical(points), reference(), &SeriesOptions::default()).unwrap();
        let ratings = series.ratings();

        assert_eq!(ratings[0], 1800);
        assert!(ratings[1..29].iter().all(|r| *r == 1800));
        assert_eq!(ratings[29], 1900);
    }

    #[test]
    fn test_leading_gap_back_filled() {
        let points = vec![
            RatingHistoryRecord::on(days_before(10), 2100),
            RatingHistoryRecord::on(days_before(3), 2120),
        ];
        let series = build_daily_series(&classical(points), reference(), &SeriesOptions::default()).unwrap();
        let ratings = series.ratings();

        // Days 29..=11 before reference precede the first observation
        assert!(ratings[..19].iter().all(|r| *r == 2100));
        assert_eq!(ratings[19], 2100);
        assert!(ratings[20..26].iter().all(|r| *r == 2100));
        assert!(ratings[26..].iter().all(|r| *r == 2120));
    }

    #[test]
    fn test_point_just_before_axis_seeds_forward_fill() {
        let points = vec![
            RatingHistoryRecord::on(days_before(30), 1700),
            RatingHistoryRecord::on(days_before(5), 1750),
        ];
        let series = build_daily_series(&classical(points), reference(), &SeriesOptions::default()).unwrap();
        let ratings = series.ratings();

        assert_eq!(ratings[0], 1700);
        assert_eq!(ratings[24], 1750);
        assert_eq!(ratings[29], 1750);
    }

    #[test]
    fn test_points_outside_window_ignored() {
        let points = vec![
            RatingHistoryRecord::on(days_before(31), 1000),
            RatingHistoryRecord::on(days_before(2), 2000),
            RatingHistoryRecord::on(reference() + Duration::days(1), 3000),
        ];
        let series = build_daily_series(&classical(points), reference(), &SeriesOptions::default()).unwrap();
        assert_eq!(series.ratings(), vec![2000; 30]);
    }

    #[test]
    fn test_missing_variant_is_empty_history() {
        let points = vec![RatingHistoryRecord::on(reference(), 2500)];
        let err = build_daily_series(&history("Blitz", points), reference(), &SeriesOptions::default())
            .unwrap_err();
        assert!(matches!(err, ReportError::EmptyHistory { ref variant } if variant == "Classical"));
    }

    #[test]
    fn test_variant_match_is_case_sensitive() {
        let points = vec![RatingHistoryRecord::on(reference(), 2500)];
        let err = build_daily_series(&history("classical", points), reference(), &SeriesOptions::default())
            .unwrap_err();
        assert!(err.is_empty_history());
    }

    #[test]
    fn test_no_points_in_window_is_empty_history() {
        let points = vec![RatingHistoryRecord::on(days_before(45), 2200)];
        let err = build_daily_series(&classical(points), reference(), &SeriesOptions::default()).unwrap_err();
        assert!(err.is_empty_history());

        let err = build_daily_series(&classical(vec![]), reference(), &SeriesOptions::default()).unwrap_err();
        assert!(err.is_empty_history());
    }

    #[test]
    fn test_other_perf_type() {
        let history = RatingHistory::new(vec![
            RatingHistoryEntry {
                name: "Classical".into(),
                points: vec![RatingHistoryRecord::on(reference(), 1500)],
            },
            RatingHistoryEntry {
                name: "Three-check".into(),
                points: vec![RatingHistoryRecord::on(reference(), 1650)],
            },
        ]);
        let options = SeriesOptions::new(PerfType::ThreeCheck);
        let series = build_daily_series(&history, reference(), &options).unwrap();
        assert_eq!(series.ratings(), vec![1650; 30]);
    }

    #[test]
    fn test_invalid_dates_skipped() {
        let points = vec![
            RatingHistoryRecord::from((2024, 1, 30, 9999)), // February 30th
            RatingHistoryRecord::from((2024, u32::MAX, 1, 1500)),
            RatingHistoryRecord::on(days_before(1), 2050),
        ];
        let series = build_daily_series(&classical(points), reference(), &SeriesOptions::default()).unwrap();
        assert_eq!(series.ratings(), vec![2050; 30]);
    }

    #[test]
    fn test_out_of_range_month_in_payload_skipped() {
        let history: RatingHistory = serde_json::from_str(
            r#"[{"name":"Classical","points":[[2024,4294967295,1,1500],[2024,9,30,1600]]}]"#,
        )
        .unwrap();
        let series = build_daily_series(&history, reference(), &SeriesOptions::default()).unwrap();
        assert_eq!(series.ratings(), vec![1600; 30]);
    }

    #[test]
    fn test_duplicate_date_later_point_wins() {
        let points = vec![
            RatingHistoryRecord::on(reference(), 1500),
            RatingHistoryRecord::on(reference(), 1510),
        ];
        for scan in [HistoryScan::Full, HistoryScan::StopAtFirstStale] {
            let options = SeriesOptions::default().with_scan(scan);
            let series = build_daily_series(&classical(points.clone()), reference(), &options).unwrap();
            assert_eq!(series.rating_on(reference()), Some(1510), "{:?}", scan);
        }
    }

    #[test]
    fn test_scans_agree_on_chronological_input() {
        let points: Vec<_> = [50, 35, 20, 12, 4, 0]
            .into_iter()
            .map(|n| RatingHistoryRecord::on(days_before(n), 2000 + n as i32))
            .collect();

        let full = build_daily_series(&classical(points.clone()), reference(), &SeriesOptions::default()).unwrap();
        let early = build_daily_series(
            &classical(points),
            reference(),
            &SeriesOptions::default().with_scan(HistoryScan::StopAtFirstStale),
        )
        .unwrap();
        assert_eq!(full, early);
    }

    #[test]
    fn test_early_exit_drops_points_after_stale_one() {
        // Out of order: a stale point sits between two in-window points
        let points = vec![
            RatingHistoryRecord::on(days_before(20), 1900),
            RatingHistoryRecord::on(days_before(40), 1800),
            RatingHistoryRecord::on(days_before(1), 1950),
        ];

        let full = collect_window(&points, reference(), HistoryScan::Full);
        assert_eq!(full.len(), 2);

        let early = collect_window(&points, reference(), HistoryScan::StopAtFirstStale);
        assert_eq!(early.len(), 1);
        assert_eq!(early.get(&days_before(1)), Some(&1950));
    }

    #[test]
    fn test_fill_gaps_is_identity_when_complete() {
        let original: Vec<Option<i32>> = (0..30).map(|i| Some(1500 + i)).collect();
        let mut cells = original.clone();
        fill_gaps(&mut cells, Some(42));
        assert_eq!(cells, original);
    }

    #[test]
    fn test_fill_gaps_forward_then_backward() {
        let mut cells = vec![None, None, Some(10), None, Some(20), None];
        fill_gaps(&mut cells, None);
        assert_eq!(
            cells,
            vec![Some(10), Some(10), Some(10), Some(10), Some(20), Some(20)]
        );
    }

    #[test]
    fn test_fill_gaps_all_missing_stays_missing() {
        let mut cells: Vec<Option<i32>> = vec![None; 5];
        fill_gaps(&mut cells, None);
        assert!(cells.iter().all(Option::is_none));

        fill_gaps(&mut cells, Some(7));
        assert!(cells.iter().all(|c| *c == Some(7)));
    }
}
