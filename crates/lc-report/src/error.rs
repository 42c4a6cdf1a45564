//! Error types for report building.

use lc_ingestion::IngestionError;
use lc_types::TypeError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error from the ingestion layer.
    #[error("ingestion error: {0}")]
    Ingestion(#[from] IngestionError),

    /// A failure tied to one player, wrapping the underlying cause.
    #[error("player {username}: {source}")]
    Player {
        username: String,
        source: Box<ReportError>,
    },

    /// The requested variant is missing or has no points in the window.
    #[error("no {variant} rating history in the 30-day window")]
    EmptyHistory { variant: String },

    /// A row whose dates differ from the table columns.
    #[error("date axis of {username} does not match the table columns")]
    AxisMismatch { username: String },

    /// Invalid series data.
    #[error("series error: {0}")]
    Series(#[from] TypeError),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The finished temp file could not be moved into place.
    #[error("failed to replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ReportError {
    /// Attach a username to an error.
    pub fn player(username: &str, source: impl Into<ReportError>) -> Self {
        ReportError::Player {
            username: username.to_string(),
            source: Box::new(source.into()),
        }
    }

    /// True if this is (or wraps) an [`ReportError::EmptyHistory`].
    pub fn is_empty_history(&self) -> bool {
        match self {
            ReportError::EmptyHistory { .. } => true,
            ReportError::Player { source, .. } => source.is_empty_history(),
            _ => false,
        }
    }

    /// The username this error is attached to, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            ReportError::Player { username, .. } | ReportError::AxisMismatch { username } => {
                Some(username)
            }
            _ => None,
        }
    }
}
