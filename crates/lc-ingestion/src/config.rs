//! Configuration for the ingestion layer.
//!
//! # Environment Variables
//!
//! - `LICHESS_URL`: API base URL (default: `https://lichess.org`)
//! - `MAX_CONCURRENT_REQUESTS`: requests allowed in flight (default: 1)
//! - `REQUEST_INTERVAL_SECS`: delay after each response before the next
//!   request may start (default: 5; `0` disables throttling)

use crate::error::IngestionError;
use std::env;
use std::time::Duration;
use url::Url;

/// Lichess production base URL.
pub const DEFAULT_BASE_URL: &str = "https://lichess.org";

/// Default number of requests allowed in flight.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 1;

/// Default delay between a response and the next request.
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_secs(5);

/// Cooperative throttle settings.
///
/// Lichess answers bursts with HTTP 429, so the default is strictly
/// sequential requests with a five second gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Requests allowed in flight at once. Zero is treated as one.
    pub max_concurrent_requests: usize,

    /// Minimum gap between a response and the next request start.
    pub request_interval: Duration,

    /// When false no limiter is installed.
    pub enabled: bool,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            request_interval: DEFAULT_REQUEST_INTERVAL,
            enabled: true,
        }
    }
}

impl ThrottleConfig {
    /// No throttling at all. Used by tests and local mirrors.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max;
        self
    }

    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }
}

/// Where and how to reach the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub throttle: ThrottleConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            throttle: ThrottleConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Config pointing at a different host, e.g. a local mirror.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, IngestionError> {
        self.base_url = Url::parse(base_url)
            .map_err(|e| IngestionError::Config(format!("LICHESS_URL {:?}: {}", base_url, e)))?;
        Ok(self)
    }

    pub fn with_throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = throttle;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// Unset variables fall back to defaults; set-but-malformed values are
    /// an error rather than silently ignored.
    pub fn from_env() -> Result<Self, IngestionError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IngestionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("LICHESS_URL") {
            config = config.with_base_url(url.trim())?;
        }

        if let Some(max) = lookup("MAX_CONCURRENT_REQUESTS") {
            let max: usize = parse_var("MAX_CONCURRENT_REQUESTS", &max)?;
            config.throttle.max_concurrent_requests = max;
        }

        if let Some(secs) = lookup("REQUEST_INTERVAL_SECS") {
            let secs: f64 = parse_var("REQUEST_INTERVAL_SECS", &secs)?;
            if !secs.is_finite() || secs < 0.0 {
                return Err(IngestionError::Config(format!(
                    "REQUEST_INTERVAL_SECS must be a non-negative number, got {}",
                    secs
                )));
            }
            if secs == 0.0 {
                config.throttle.enabled = false;
            } else {
                config.throttle.request_interval =
                    Duration::try_from_secs_f64(secs).map_err(|e| {
                        IngestionError::Config(format!("REQUEST_INTERVAL_SECS {}: {}", secs, e))
                    })?;
            }
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, IngestionError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| IngestionError::Config(format!("{} {:?}: {}", key, value, e)))
}
