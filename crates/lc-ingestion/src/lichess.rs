//! Lichess data source over HTTP.
//!
//! A thin `reqwest` client: one GET per operation, JSON decoded straight
//! into the `lc-types` model. Requests pass through the optional
//! [`RateLimiter`] so sequential callers are spaced out automatically.
//!
//! # Status Handling
//!
//! Any non-2xx answer becomes [`IngestionError::Remote`] carrying the
//! status and URL. There is no retry; a 429 is reported to the caller like
//! any other remote failure.

use crate::config::ApiConfig;
use crate::error::IngestionError;
use crate::throttle::RateLimiter;
use crate::DataSource;
use lc_types::{Leaderboard, PerfType, RatingHistory};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use url::Url;

/// Largest `nb` the leaderboard endpoint accepts.
pub const MAX_LEADERBOARD_SIZE: usize = 200;

/// Production data source for the Lichess REST API.
///
/// # Example
///
/// ```rust,no_run
/// use lc_ingestion::{DataSource, LichessSource};
/// use lc_types::PerfType;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = LichessSource::lichess();
///     let board = source.get_leaderboard(10, PerfType::Classical).await?;
///     println!("Top player: {}", board.users[0].username);
///     Ok(())
/// }
/// ```
pub struct LichessSource {
    http_client: reqwest::Client,
    base_url: Url,
    limiter: Option<RateLimiter>,
}

impl LichessSource {
    /// Create a source from explicit configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            limiter: RateLimiter::from_config(&config.throttle),
            base_url: config.base_url,
        }
    }

    /// Source for lichess.org with the default throttle.
    #[inline]
    pub fn lichess() -> Self {
        Self::new(ApiConfig::default())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The installed limiter, if throttling is enabled.
    pub fn limiter(&self) -> Option<&RateLimiter> {
        self.limiter.as_ref()
    }

    /// `{base}/api/player/top/{count}/{perfKey}`
    pub(crate) fn leaderboard_url(
        &self,
        count: usize,
        perf_type: PerfType,
    ) -> Result<Url, IngestionError> {
        if count == 0 || count > MAX_LEADERBOARD_SIZE {
            return Err(IngestionError::InvalidInput(format!(
                "leaderboard size must be between 1 and {}, got {}",
                MAX_LEADERBOARD_SIZE, count
            )));
        }
        if !perf_type.has_leaderboard() {
            return Err(IngestionError::InvalidInput(format!(
                "no leaderboard for {}",
                perf_type
            )));
        }
        self.endpoint(&["api", "player", "top", &count.to_string(), perf_type.api_key()])
    }

    /// `{base}/api/user/{username}/rating-history`
    pub(crate) fn rating_history_url(&self, username: &str) -> Result<Url, IngestionError> {
        if username.trim().is_empty() {
            return Err(IngestionError::InvalidInput("username is empty".into()));
        }
        self.endpoint(&["api", "user", username, "rating-history"])
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, IngestionError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                IngestionError::Config(format!("base URL cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a URL and decode its JSON body, holding a limiter slot for the
    /// duration of the request.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, IngestionError> {
        let _permit = match &self.limiter {
            Some(limiter) => Some(limiter.acquire().await?),
            None => None,
        };

        tracing::debug!("GET {}", url);

        let response = self
            .http_client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GET {} returned {}", url, status);
            return Err(IngestionError::Remote {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

impl DataSource for LichessSource {
    async fn get_leaderboard(
        &self,
        count: usize,
        perf_type: PerfType,
    ) -> Result<Leaderboard, IngestionError> {
        let url = self.leaderboard_url(count, perf_type)?;
        let board: Leaderboard = self.get_json(url).await?;

        tracing::info!(
            "Fetched {} {} leaderboard entries (requested {})",
            board.len(),
            perf_type,
            count
        );

        Ok(board)
    }

    async fn get_rating_history(&self, username: &str) -> Result<RatingHistory, IngestionError> {
        let url = self.rating_history_url(username)?;
        let history: RatingHistory = self.get_json(url).await?;

        tracing::debug!(
            "Fetched rating history for {} ({} variants)",
            username,
            history.entries().len()
        );

        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThrottleConfig;

    fn source(base: &str) -> LichessSource {
        let config = ApiConfig::default()
            .with_base_url(base)
            .unwrap()
            .with_throttle(ThrottleConfig::disabled());
        LichessSource::new(config)
    }

    #[test]
    fn test_leaderboard_url() {
        let url = LichessSource::lichess()
            .leaderboard_url(50, PerfType::Classical)
            .unwrap();
        assert_eq!(url.as_str(), "https://lichess.org/api/player/top/50/classical");

        let url = LichessSource::lichess()
            .leaderboard_url(3, PerfType::KingOfTheHill)
            .unwrap();
        assert_eq!(url.as_str(), "https://lichess.org/api/player/top/3/kingOfTheHill");
    }

    #[test]
    fn test_leaderboard_size_bounds() {
        let lichess = LichessSource::lichess();
        assert!(matches!(
            lichess.leaderboard_url(0, PerfType::Classical),
            Err(IngestionError::InvalidInput(_))
        ));
        assert!(matches!(
            lichess.leaderboard_url(201, PerfType::Classical),
            Err(IngestionError::InvalidInput(_))
        ));
        assert!(lichess.leaderboard_url(200, PerfType::Classical).is_ok());
    }

    #[test]
    fn test_correspondence_leaderboard_rejected() {
        assert!(matches!(
            LichessSource::lichess().leaderboard_url(10, PerfType::Correspondence),
            Err(IngestionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rating_history_url_escapes_username() {
        let lichess = LichessSource::lichess();
        let url = lichess.rating_history_url("koalanaattor").unwrap();
        assert_eq!(
            url.as_str(),
            "https://lichess.org/api/user/koalanaattor/rating-history"
        );

        let url = lichess.rating_history_url("a/b c").unwrap();
        assert_eq!(
            url.as_str(),
            "https://lichess.org/api/user/a%2Fb%20c/rating-history"
        );
    }

    #[test]
    fn test_rating_history_url_rejects_empty() {
        assert!(matches!(
            LichessSource::lichess().rating_history_url("  "),
            Err(IngestionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let mirror = source("http://localhost:8080/mirror/");
        let url = mirror.leaderboard_url(1, PerfType::Blitz).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/mirror/api/player/top/1/blitz");
    }

    #[test]
    fn test_limiter_installed_by_default() {
        assert!(LichessSource::lichess().limiter().is_some());
        assert!(source("http://localhost:8080").limiter().is_none());
    }
}
