//! Mock data source for testing.
//!
//! `MockSource` implements `DataSource` with configurable responses,
//! allowing tests to run without network calls.
//!
//! # Usage
//!
//! ```rust
//! use lc_ingestion::{DataSource, MockSource};
//! use lc_types::{Leaderboard, LeaderboardEntry, PerfType, RatingHistory};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockSource::new()
//!     .with_leaderboard(Leaderboard::new(vec![LeaderboardEntry::new("alice")]))
//!     .with_history("alice", RatingHistory::default());
//!
//! let board = mock.get_leaderboard(1, PerfType::Classical).await.unwrap();
//! assert_eq!(board.usernames(), vec!["alice"]);
//! # }
//! ```

use crate::{error::IngestionError, DataSource};
use lc_types::{Leaderboard, PerfType, RatingHistory};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock data source for testing.
///
/// Uses builder pattern for convenient setup. Histories are keyed by
/// username; a username with a configured failure returns that failure
/// instead.
#[derive(Default, Clone)]
pub struct MockSource {
    /// Leaderboard to return, truncated to the requested count.
    pub leaderboard: Leaderboard,

    /// Histories to return from `get_rating_history`.
    pub histories: HashMap<String, RatingHistory>,

    /// Usernames whose history fetch fails with HTTP status.
    pub failures: HashMap<String, u16>,

    /// Count of history requests served (shared across clones).
    history_calls: Arc<AtomicUsize>,
}

impl MockSource {
    /// Create a new empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leaderboard to return (builder pattern).
    pub fn with_leaderboard(mut self, leaderboard: Leaderboard) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    /// Set the history for one user (builder pattern).
    pub fn with_history(mut self, username: &str, history: RatingHistory) -> Self {
        self.histories.insert(username.to_string(), history);
        self
    }

    /// Make the history fetch for `username` fail with an HTTP status.
    pub fn with_failure(mut self, username: &str, status: u16) -> Self {
        self.failures.insert(username.to_string(), status);
        self
    }

    /// Number of `get_rating_history` calls made so far.
    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

impl DataSource for MockSource {
    async fn get_leaderboard(
        &self,
        count: usize,
        perf_type: PerfType,
    ) -> Result<Leaderboard, IngestionError> {
        if count == 0 {
            return Err(IngestionError::InvalidInput(
                "leaderboard size must be positive".into(),
            ));
        }
        if !perf_type.has_leaderboard() {
            return Err(IngestionError::InvalidInput(format!(
                "no leaderboard for {}",
                perf_type
            )));
        }

        let users = self.leaderboard.users.iter().take(count).cloned().collect();
        Ok(Leaderboard::new(users))
    }

    async fn get_rating_history(&self, username: &str) -> Result<RatingHistory, IngestionError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.failures.get(username) {
            return Err(IngestionError::Remote {
                status: *status,
                url: format!("mock://api/user/{}/rating-history", username),
            });
        }

        self.histories
            .get(username)
            .cloned()
            .ok_or_else(|| IngestionError::NoData(format!("mock history for {} not configured", username)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_types::LeaderboardEntry;

    #[tokio::test]
    async fn test_empty_mock() {
        let mock = MockSource::new();
        let board = mock.get_leaderboard(5, PerfType::Classical).await.unwrap();
        assert!(board.is_empty());
    }

    #[tokio::test]
    async fn test_leaderboard_truncated_to_count() {
        let mock = MockSource::new().with_leaderboard(Leaderboard::new(vec![
            LeaderboardEntry::new("a"),
            LeaderboardEntry::new("b"),
            LeaderboardEntry::new("c"),
        ]));
        let board = mock.get_leaderboard(2, PerfType::Classical).await.unwrap();
        assert_eq!(board.usernames(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_history_not_configured() {
        let mock = MockSource::new();
        let result = mock.get_rating_history("nobody").await;
        assert!(matches!(result, Err(IngestionError::NoData(_))));
        assert_eq!(mock.history_calls(), 1);
    }

    #[tokio::test]
    async fn test_configured_failure() {
        let mock = MockSource::new()
            .with_history("bob", RatingHistory::default())
            .with_failure("bob", 429);
        let err = mock.get_rating_history("bob").await.unwrap_err();
        assert!(err.is_rate_limited());
    }
}
