//! Text and JSON files under a base directory.
//!
//! Used for snapshots of raw API responses next to the export.

use crate::error::ReportError;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative-path file access rooted at `base_dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Store rooted at the directory containing `file`.
    pub fn for_file(file: &Path) -> Self {
        let dir = file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute (or base-relative) path of `relative`.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(relative)
    }

    pub fn read_text(&self, relative: impl AsRef<Path>) -> Result<String, ReportError> {
        Ok(fs::read_to_string(self.path(relative))?)
    }

    /// Write `contents`, creating parent directories as needed.
    pub fn write_text(
        &self,
        relative: impl AsRef<Path>,
        contents: &str,
    ) -> Result<PathBuf, ReportError> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(path)
    }

    pub fn read_json<T: DeserializeOwned>(
        &self,
        relative: impl AsRef<Path>,
    ) -> Result<T, ReportError> {
        let text = self.read_text(relative)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write `value` as JSON indented with four spaces.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        relative: impl AsRef<Path>,
        value: &T,
    ) -> Result<PathBuf, ReportError> {
        let text = to_pretty_json(value)?;
        self.write_text(relative, &text)
    }
}

/// JSON indented with four spaces.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Current UTC time for file names, e.g. `2024-10-31_142501123456_UTC`.
pub fn timestamp_string() -> String {
    Utc::now().format("%Y-%m-%d_%H%M%S%6f_UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_types::{Leaderboard, LeaderboardEntry};

    #[test]
    fn test_text_round_trip_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let path = store.write_text("nested/deeper/notes.txt", "hello").unwrap();
        assert!(path.starts_with(dir.path()));
        assert_eq!(store.read_text("nested/deeper/notes.txt").unwrap(), "hello");
    }

    #[test]
    fn test_json_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let board = Leaderboard::new(vec![LeaderboardEntry::new("alice")]);

        store.write_json("board.json", &board).unwrap();
        let text = store.read_text("board.json").unwrap();
        assert!(text.contains("\n    \"users\""));

        let back: Leaderboard = store.read_json("board.json").unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let err = store.read_text("absent.txt").unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write_text("bad.json", "{not json").unwrap();
        let err = store.read_json::<Leaderboard>("bad.json").unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
    }

    #[test]
    fn test_for_file_uses_parent() {
        let store = FileStore::for_file(Path::new("/data/out/report.csv"));
        assert_eq!(store.base_dir(), Path::new("/data/out"));
        assert_eq!(store.path("x.json"), PathBuf::from("/data/out/x.json"));
    }

    #[test]
    fn test_timestamp_shape() {
        let stamp = timestamp_string();
        assert!(stamp.ends_with("_UTC"));
        // YYYY-MM-DD _ HHMMSS + 6 fraction digits _UTC
        assert_eq!(stamp.len(), 10 + 1 + 12 + 4);
    }
}
