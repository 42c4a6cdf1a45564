//! Multi-player reporter.
//!
//! The `Reporter` struct ties a [`DataSource`] to the series builder and the
//! export table: leaderboard, per-player series, and the wide CSV export.

use crate::error::ReportError;
use crate::series::{build_daily_series, HistoryScan, SeriesOptions};
use crate::table::{export_file_name, ExportTable};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt, TryStreamExt};
use lc_ingestion::{DataSource, LichessSource};
use lc_types::{DailySeries, DateFormat, Leaderboard, PerfType, SeriesMapping, TableRow};
use std::path::PathBuf;

/// What to do with a player that has no history for the perf type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyHistoryPolicy {
    /// Write a row of `N/A` cells and log a warning.
    #[default]
    MarkUnavailable,

    /// Abort the export.
    Fail,
}

/// Configuration for the reporter.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Perf type used for both the leaderboard and the history variant.
    pub perf_type: PerfType,

    /// Directory the CSV export is written to.
    pub output_dir: PathBuf,

    /// History fetches polled at once. The source's rate limiter still
    /// bounds the requests actually in flight.
    pub max_concurrent_fetches: usize,

    pub empty_history: EmptyHistoryPolicy,

    pub scan: HistoryScan,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            perf_type: PerfType::default(),
            output_dir: PathBuf::from("."),
            max_concurrent_fetches: 1,
            empty_history: EmptyHistoryPolicy::default(),
            scan: HistoryScan::default(),
        }
    }
}

impl ReporterConfig {
    pub fn with_perf_type(mut self, perf_type: PerfType) -> Self {
        self.perf_type = perf_type;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the fetch fan-out (values below 1 are treated as 1).
    pub fn with_max_concurrent_fetches(mut self, n: usize) -> Self {
        self.max_concurrent_fetches = n.max(1);
        self
    }

    pub fn with_empty_history(mut self, policy: EmptyHistoryPolicy) -> Self {
        self.empty_history = policy;
        self
    }

    pub fn with_scan(mut self, scan: HistoryScan) -> Self {
        self.scan = scan;
        self
    }

    fn series_options(&self) -> SeriesOptions {
        SeriesOptions::new(self.perf_type).with_scan(self.scan)
    }
}

/// Builds rating reports from a data source.
///
/// # Example
///
/// ```rust,no_run
/// use chrono::Local;
/// use lc_report::Reporter;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let reporter = Reporter::lichess();
///     let today = Local::now().date_naive();
///
///     let path = reporter.export_rating_history_csv(50, today).await?;
///     println!("CSV file written: {}", path.display());
///     Ok(())
/// }
/// ```
pub struct Reporter<S: DataSource> {
    source: S,
    config: ReporterConfig,
}

impl Reporter<LichessSource> {
    /// Reporter over the public Lichess API with default settings.
    pub fn lichess() -> Self {
        Self::new(LichessSource::lichess(), ReporterConfig::default())
    }
}

impl<S: DataSource> Reporter<S> {
    pub fn new(source: S, config: ReporterConfig) -> Self {
        Self { source, config }
    }

    /// Get the underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the configuration.
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Fetch the top `count` players for the configured perf type.
    pub async fn leaderboard(&self, count: usize) -> Result<Leaderboard, ReportError> {
        let board = self
            .source
            .get_leaderboard(count, self.config.perf_type)
            .await?;

        tracing::info!(
            "Leaderboard for {}: {} players",
            self.config.perf_type,
            board.len()
        );
        Ok(board)
    }

    /// Usernames of the top `count` players, in rank order.
    pub async fn top_usernames(&self, count: usize) -> Result<Vec<String>, ReportError> {
        Ok(self.leaderboard(count).await?.usernames())
    }

    /// Dense series for one player over the 30 days ending at
    /// `reference_date`.
    ///
    /// # Errors
    ///
    /// Fetch failures and missing history come back wrapped in
    /// [`ReportError::Player`] with the username attached.
    pub async fn player_series(
        &self,
        username: &str,
        reference_date: NaiveDate,
    ) -> Result<DailySeries, ReportError> {
        let history = self
            .source
            .get_rating_history(username)
            .await
            .map_err(|e| ReportError::player(username, e))?;

        let series = build_daily_series(&history, reference_date, &self.config.series_options())
            .map_err(|e| ReportError::player(username, e))?;

        tracing::debug!("Built {}-day series for {}", series.len(), username);
        Ok(series)
    }

    /// Date-keyed mapping for one player.
    pub async fn player_mapping(
        &self,
        username: &str,
        reference_date: NaiveDate,
        format: DateFormat,
    ) -> Result<SeriesMapping, ReportError> {
        let series = self.player_series(username, reference_date).await?;
        Ok(series.as_mapping(format))
    }

    /// Table row for one player, with missing history handled according to
    /// the configured [`EmptyHistoryPolicy`].
    pub async fn player_row(
        &self,
        username: &str,
        reference_date: NaiveDate,
    ) -> Result<TableRow, ReportError> {
        match self.player_series(username, reference_date).await {
            Ok(series) => Ok(series.as_table_row(username)),
            Err(e)
                if e.is_empty_history()
                    && self.config.empty_history == EmptyHistoryPolicy::MarkUnavailable =>
            {
                tracing::warn!("{}; writing N/A row", e);
                Ok(TableRow::unavailable(username, reference_date))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch the leaderboard and one row per player, in rank order.
    ///
    /// Stops at the first player that fails.
    pub async fn build_export_table(
        &self,
        player_count: usize,
        reference_date: NaiveDate,
    ) -> Result<ExportTable, ReportError> {
        let usernames = self.top_usernames(player_count).await?;

        let rows: Vec<TableRow> = stream::iter(usernames.iter())
            .map(|username| self.player_row(username, reference_date))
            .buffered(self.config.max_concurrent_fetches.max(1))
            .try_collect()
            .await?;

        let mut table = ExportTable::new(reference_date);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Path the export for `player_count` players is written to.
    pub fn export_path(&self, player_count: usize) -> PathBuf {
        self.config.output_dir.join(export_file_name(player_count))
    }

    /// Write a finished table to the configured output directory.
    pub fn write_table(
        &self,
        table: &ExportTable,
        player_count: usize,
    ) -> Result<PathBuf, ReportError> {
        table.write_csv(&self.export_path(player_count))
    }

    /// Build the table for the top `player_count` players and write it as
    /// `rating_history_{player_count}_players_30_days.csv`.
    ///
    /// Nothing is written if any player fails.
    pub async fn export_rating_history_csv(
        &self,
        player_count: usize,
        reference_date: NaiveDate,
    ) -> Result<PathBuf, ReportError> {
        let table = self.build_export_table(player_count, reference_date).await?;
        let path = self.write_table(&table, player_count)?;

        tracing::info!(
            "Exported {} players ({} unavailable) to {}",
            table.len(),
            table.rows().iter().filter(|row| row.is_unavailable()).count(),
            path.display()
        );
        Ok(path)
    }
}
