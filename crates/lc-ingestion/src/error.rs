//! Error types for the ingestion layer.
//!
//! A simple enum with `thiserror`. External errors are converted into owned
//! strings at the boundary so the type stays free of generics and boxing.

use thiserror::Error;

/// Errors that can occur while talking to the Lichess API.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Transport failure: DNS, connection refused, timeout, TLS.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status (including 429).
    #[error("remote error: HTTP {status} from {url}")]
    Remote { status: u16, url: String },

    /// The body did not match the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid input (e.g., bad parameters).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No data available (e.g., mock not configured).
    #[error("no data: {0}")]
    NoData(String),

    /// Configuration errors (e.g., malformed env vars).
    #[error("config error: {0}")]
    Config(String),
}

impl IngestionError {
    /// True for HTTP 429 Too Many Requests.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, IngestionError::Remote { status: 429, .. })
    }
}

// Decode failures surface from `Response::json`; everything else reqwest
// reports here is transport-level.
impl From<reqwest::Error> for IngestionError {
    #[inline]
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            IngestionError::Decode(err.to_string())
        } else {
            IngestionError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for IngestionError {
    #[inline]
    fn from(err: serde_json::Error) -> Self {
        IngestionError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited() {
        let err = IngestionError::Remote {
            status: 429,
            url: "https://lichess.org/api/player/top/50/classical".into(),
        };
        assert!(err.is_rate_limited());
        assert!(err.to_string().contains("HTTP 429"));

        let err = IngestionError::Remote {
            status: 404,
            url: "x".into(),
        };
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_from_serde_json_is_decode() {
        let err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        assert!(matches!(IngestionError::from(err), IngestionError::Decode(_)));
    }
}
