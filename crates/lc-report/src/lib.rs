//! lc-report: Daily rating series and multi-player CSV export.
//!
//! This crate provides the [`Reporter`] struct which is the main entry point
//! for turning Lichess leaderboards and rating histories into reports.
//!
//! # Overview
//!
//! The reporter:
//! - Fetches the leaderboard and rating histories via `lc-ingestion`
//! - Builds a dense 30-day series per player ([`build_daily_series`])
//! - Lays the series out as a wide table, one row per player
//! - Writes `rating_history_{N}_players_30_days.csv`
//!
//! Every series in one run ends on the same caller-supplied reference date,
//! so all rows share the same columns.
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use lc_ingestion::LichessSource;
//! use lc_report::{Reporter, ReporterConfig};
//! use lc_types::DateFormat;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReporterConfig::default().with_output_dir("reports");
//!     let reporter = Reporter::new(LichessSource::lichess(), config);
//!     let day = NaiveDate::from_ymd_opt(2024, 10, 31).unwrap();
//!
//!     let names = reporter.top_usernames(50).await?;
//!     let mapping = reporter
//!         .player_mapping(&names[0], day, DateFormat::Complete)
//!         .await?;
//!     println!("- {}, {}", names[0], serde_json::to_string(&mapping)?);
//!
//!     let path = reporter.export_rating_history_csv(50, day).await?;
//!     println!("CSV file written: {}", path.display());
//!     Ok(())
//! }
//! ```

mod error;
mod files;
mod reporter;
mod series;
mod table;

pub use error::ReportError;
pub use files::{timestamp_string, to_pretty_json, FileStore};
pub use reporter::{EmptyHistoryPolicy, Reporter, ReporterConfig};
pub use series::{build_daily_series, fill_gaps, HistoryScan, SeriesOptions, LOOKBACK_DAYS};
pub use table::{export_file_name, ExportTable, USERNAME_COLUMN};
