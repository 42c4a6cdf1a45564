//! # lc-ingestion
//!
//! Data ingestion layer for the Lichess REST API.
//!
//! This crate provides a [`DataSource`] trait with two read operations,
//! a production implementation over `reqwest`, and a mock for tests.
//!
//! ## Design Principles
//!
//! - **Native async traits**: `impl Future` return types (Rust 1.75+), no
//!   `async_trait` boxing.
//!
//! - **Thin wrapper**: one GET per operation, JSON decoded directly into
//!   `lc-types`. No caching, no retry.
//!
//! - **Polite by default**: [`LichessSource`] installs a [`RateLimiter`]
//!   that allows one request at a time with a five second gap after each
//!   response. Lichess answers bursts with HTTP 429.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lc_ingestion::{DataSource, LichessSource};
//! use lc_types::PerfType;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = LichessSource::lichess();
//!
//!     let board = source.get_leaderboard(5, PerfType::Classical).await?;
//!     for user in &board.users {
//!         let history = source.get_rating_history(&user.username).await?;
//!         println!("{}: {} variants", user.username, history.entries().len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Testing with MockSource
//!
//! ```rust
//! use lc_ingestion::{DataSource, MockSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockSource::new();
//!     let result = mock.get_rating_history("alice").await;
//!     assert!(result.is_err()); // No history configured
//! }
//! ```

pub mod config;
pub mod error;
mod lichess;
mod mock;
mod throttle;

pub use config::{ApiConfig, ThrottleConfig};
pub use error::IngestionError;
pub use lichess::{LichessSource, MAX_LEADERBOARD_SIZE};
pub use mock::MockSource;
pub use throttle::{RateLimiter, RatePermit};

use lc_types::{Leaderboard, PerfType, RatingHistory};

/// Data source abstraction for Lichess data.
///
/// ## Implementors
///
/// - [`LichessSource`]: Production implementation over HTTP
/// - [`MockSource`]: Test implementation with configurable responses
///
/// ## Why `Send + Sync`?
///
/// Sources are shared by the reporter's fetch stream and may be stored in
/// an `Arc` across tasks.
pub trait DataSource: Send + Sync {
    /// Fetch the top `count` players for a perf type, in rank order.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::InvalidInput`] if `count` is zero or above
    /// the API maximum.
    /// Returns [`IngestionError::Remote`] on a non-2xx status and
    /// [`IngestionError::Network`] on transport failure.
    fn get_leaderboard(
        &self,
        count: usize,
        perf_type: PerfType,
    ) -> impl std::future::Future<Output = Result<Leaderboard, IngestionError>> + Send;

    /// Fetch the full rating history of a user, across all perf types.
    ///
    /// Points inside each entry come back in chronological order, at most
    /// one per day.
    fn get_rating_history(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<RatingHistory, IngestionError>> + Send;
}
