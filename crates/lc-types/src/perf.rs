//! Performance categories (speeds and variants) on Lichess.
//!
//! Lichess names the same category two ways: the leaderboard endpoint takes
//! a camelCase API key (`classical`, `kingOfTheHill`), while the
//! rating-history payload labels each series with a display name
//! (`Classical`, `King of the Hill`). [`PerfType`] carries both.
//!
//! # Example
//!
//! ```rust
//! use lc_types::PerfType;
//!
//! let perf = PerfType::from_key("Classical").unwrap();
//! assert_eq!(perf, PerfType::Classical);
//! assert_eq!(perf.api_key(), "classical");
//! assert_eq!(perf.history_name(), "Classical");
//! ```

use crate::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Lichess speed or variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PerfType {
    // Speeds
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    #[default]
    Classical,
    Correspondence,

    // Variants
    Chess960,
    Crazyhouse,
    Antichess,
    Atomic,
    Horde,
    KingOfTheHill,
    RacingKings,
    ThreeCheck,
}

impl PerfType {
    /// Every category, in the order Lichess lists them.
    pub const ALL: [PerfType; 14] = [
        PerfType::UltraBullet,
        PerfType::Bullet,
        PerfType::Blitz,
        PerfType::Rapid,
        PerfType::Classical,
        PerfType::Correspondence,
        PerfType::Chess960,
        PerfType::Crazyhouse,
        PerfType::Antichess,
        PerfType::Atomic,
        PerfType::Horde,
        PerfType::KingOfTheHill,
        PerfType::RacingKings,
        PerfType::ThreeCheck,
    ];

    /// Parse from the API key. Matching is case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|perf| perf.api_key().to_lowercase() == key)
    }

    /// Key used in `/api/player/top/{n}/{perfType}`.
    pub fn api_key(&self) -> &'static str {
        match self {
            PerfType::UltraBullet => "ultraBullet",
            PerfType::Bullet => "bullet",
            PerfType::Blitz => "blitz",
            PerfType::Rapid => "rapid",
            PerfType::Classical => "classical",
            PerfType::Correspondence => "correspondence",
            PerfType::Chess960 => "chess960",
            PerfType::Crazyhouse => "crazyhouse",
            PerfType::Antichess => "antichess",
            PerfType::Atomic => "atomic",
            PerfType::Horde => "horde",
            PerfType::KingOfTheHill => "kingOfTheHill",
            PerfType::RacingKings => "racingKings",
            PerfType::ThreeCheck => "threeCheck",
        }
    }

    /// Whether `/api/player/top` serves this category. Correspondence only
    /// shows up in rating histories.
    pub fn has_leaderboard(&self) -> bool {
        !matches!(self, PerfType::Correspondence)
    }

    /// Series name used in the rating-history payload.
    ///
    /// Matching against the payload is exact and case-sensitive.
    pub fn history_name(&self) -> &'static str {
        match self {
            PerfType::UltraBullet => "UltraBullet",
            PerfType::Bullet => "Bullet",
            PerfType::Blitz => "Blitz",
            PerfType::Rapid => "Rapid",
            PerfType::Classical => "Classical",
            PerfType::Correspondence => "Correspondence",
            PerfType::Chess960 => "Chess960",
            PerfType::Crazyhouse => "Crazyhouse",
            PerfType::Antichess => "Antichess",
            PerfType::Atomic => "Atomic",
            PerfType::Horde => "Horde",
            PerfType::KingOfTheHill => "King of the Hill",
            PerfType::RacingKings => "Racing Kings",
            PerfType::ThreeCheck => "Three-check",
        }
    }
}

impl fmt::Display for PerfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_key())
    }
}

impl FromStr for PerfType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PerfType::from_key(s).ok_or_else(|| TypeError::UnknownPerfType(s.to_string()))
    }
}

impl TryFrom<String> for PerfType {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PerfType> for String {
    fn from(perf: PerfType) -> Self {
        perf.api_key().to_string()
    }
}
