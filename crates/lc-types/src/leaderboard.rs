//! Leaderboard types.

use serde::{Deserialize, Serialize};

/// One ranked player on a leaderboard.
///
/// Only the fields this workspace uses are kept; the API sends more
/// (online status, per-perf ratings) and serde drops them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Display username.
    pub username: String,

    /// Lowercase user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// FIDE-style title (GM, IM, ...), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl LeaderboardEntry {
    /// Entry with only a username set.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            id: None,
            title: None,
        }
    }
}

/// Top players for a single perf type, in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub users: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Build a leaderboard from entries already in rank order.
    pub fn new(users: Vec<LeaderboardEntry>) -> Self {
        Self { users }
    }

    /// Usernames in rank order.
    pub fn usernames(&self) -> Vec<String> {
        self.users.iter().map(|u| u.username.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "users": [
            {
                "id": "alireza2003",
                "username": "alireza2003",
                "perfs": {"classical": {"rating": 2521, "progress": 12}},
                "title": "GM",
                "online": true
            },
            {
                "id": "chesstheory64",
                "username": "ChessTheory64",
                "perfs": {"classical": {"rating": 2498, "progress": -3}}
            }
        ]
    }"#;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let board: Leaderboard = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board.users[0].title.as_deref(), Some("GM"));
        assert_eq!(board.users[1].title, None);
        assert_eq!(board.users[1].id.as_deref(), Some("chesstheory64"));
    }

    #[test]
    fn test_usernames_keep_rank_order() {
        let board: Leaderboard = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(board.usernames(), vec!["alireza2003", "ChessTheory64"]);
    }

    #[test]
    fn test_username_only_entry() {
        let board: Leaderboard = serde_json::from_str(r#"{"users":[{"username":"alice"}]}"#).unwrap();
        assert_eq!(board.users[0], LeaderboardEntry::new("alice"));
    }
}
