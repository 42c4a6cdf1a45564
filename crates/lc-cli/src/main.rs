//! lc-cli: Lichess leaderboard and rating history report.
//!
//! Prints the current leaderboard, a sample 30-day series for the top
//! player, and writes the wide CSV export for the top `PLAYER_COUNT`
//! players.
//!
//! Configuration comes from the environment (a `.env` file is loaded first):
//!
//! | Variable                  | Default     |
//! |---------------------------|-------------|
//! | `PLAYER_COUNT`            | 50          |
//! | `LEADERBOARD_SIZE`        | 50          |
//! | `PERF_TYPE`               | classical   |
//! | `REFERENCE_DATE`          | local today |
//! | `OUTPUT_DIR`              | `.`         |
//! | `SNAPSHOT_DIR`            | unset       |
//! | `LICHESS_URL`             | https://lichess.org |
//! | `MAX_CONCURRENT_REQUESTS` | 1           |
//! | `REQUEST_INTERVAL_SECS`   | 5           |

use anyhow::Context;
use chrono::{Local, NaiveDate};
use lc_ingestion::{ApiConfig, DataSource, LichessSource};
use lc_report::{timestamp_string, to_pretty_json, FileStore, Reporter, ReporterConfig};
use lc_types::{DateFormat, PerfType, SeriesMapping};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default number of players in the CSV export.
const DEFAULT_PLAYER_COUNT: usize = 50;

/// Default number of usernames printed.
const DEFAULT_LEADERBOARD_SIZE: usize = 50;

/// Rows shown from the finished table.
const PREVIEW_ROWS: usize = 5;

/// Run settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    player_count: usize,
    leaderboard_size: usize,
    perf_type: PerfType,
    reference_date: NaiveDate,
    output_dir: PathBuf,
    snapshot_dir: Option<PathBuf>,
}

impl Settings {
    fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), Local::now().date_naive())
    }

    fn from_lookup<F>(lookup: F, today: NaiveDate) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let count = |key: &str, default: usize| -> anyhow::Result<usize> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a positive integer, got {:?}", key, raw)),
                None => Ok(default),
            }
        };

        let perf_type = match lookup("PERF_TYPE") {
            Some(raw) => raw.parse::<PerfType>().context("PERF_TYPE")?,
            None => PerfType::default(),
        };
        if !perf_type.has_leaderboard() {
            anyhow::bail!("PERF_TYPE {} has no leaderboard", perf_type);
        }

        let reference_date = match lookup("REFERENCE_DATE") {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("REFERENCE_DATE must be YYYY-MM-DD, got {:?}", raw))?,
            None => today,
        };

        Ok(Self {
            player_count: count("PLAYER_COUNT", DEFAULT_PLAYER_COUNT)?,
            leaderboard_size: count("LEADERBOARD_SIZE", DEFAULT_LEADERBOARD_SIZE)?,
            perf_type,
            reference_date,
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            snapshot_dir: lookup("SNAPSHOT_DIR").map(PathBuf::from),
        })
    }
}

/// `- {username}, {mapping}` with the mapping as indented JSON.
fn sample_line(username: &str, mapping: &SeriesMapping) -> anyhow::Result<String> {
    Ok(format!("- {}, {}", username, to_pretty_json(mapping)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lc_cli=info,lc_report=info,lc_ingestion=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    let api = ApiConfig::from_env().context("invalid API configuration")?;

    tracing::info!(
        "Starting lc-cli against {} (perf: {}, reference date: {}, throttle: {:?})",
        api.base_url,
        settings.perf_type,
        settings.reference_date,
        api.throttle
    );

    let config = ReporterConfig::default()
        .with_perf_type(settings.perf_type)
        .with_output_dir(&settings.output_dir);
    let reporter = Reporter::new(LichessSource::new(api), config);
    let snapshots = settings.snapshot_dir.as_ref().map(FileStore::new);

    // Leaderboard
    let board = reporter
        .leaderboard(settings.leaderboard_size)
        .await
        .context("failed to fetch leaderboard")?;
    println!("Top {} {} players:", board.len(), settings.perf_type);
    for username in board.usernames() {
        println!("{}", username);
    }

    if let Some(store) = &snapshots {
        let path = store.write_json(format!("leaderboard_{}.json", timestamp_string()), &board)?;
        tracing::info!("Leaderboard snapshot written to {}", path.display());
    }

    // Sample series for the top player
    if let Some(top) = board.users.first() {
        let username = top.username.as_str();

        if let Some(store) = &snapshots {
            let history = reporter
                .source()
                .get_rating_history(username)
                .await
                .with_context(|| format!("failed to fetch rating history for {}", username))?;
            store.write_json(
                format!("rating_history_{}_{}.json", username, timestamp_string()),
                &history,
            )?;
        }

        match reporter
            .player_mapping(username, settings.reference_date, DateFormat::Abbreviated)
            .await
        {
            Ok(mapping) => println!("{}", sample_line(username, &mapping)?),
            Err(e) if e.is_empty_history() => tracing::warn!("No sample series: {}", e),
            Err(e) => return Err(e.into()),
        }
    }

    // CSV export
    let table = reporter
        .build_export_table(settings.player_count, settings.reference_date)
        .await
        .context("export aborted")?;
    for line in table.preview(PREVIEW_ROWS) {
        println!("{}", line);
    }

    let path = reporter.write_table(&table, settings.player_count)?;
    println!("CSV file written: {}", path.display());

    Ok(())
}
