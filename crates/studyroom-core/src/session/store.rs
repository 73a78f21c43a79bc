//! Persistence of today's completed-session counter.
//!
//! A single `{"date": "YYYY-MM-DD", "count": n}` record is overwritten on
//! every completed Work phase. Loading never fails: a missing, unreadable,
//! malformed or stale record simply means no sessions were completed today.
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the record, so a reader never observes a half-written file. There is
//! no locking; concurrent instances are last-writer-wins.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::storage::data_dir;

const SESSION_FILE: &str = "session_count.json";

/// Load/save access to the persisted daily counter.
pub trait SessionStore: Send + Sync {
    /// Count stored for `date_key`, or 0 when there is no usable record for that day.
    fn load(&self, date_key: &str) -> u32;

    /// Replace the stored record with `{date_key, count}`.
    fn save(&self, date_key: &str, count: u32) -> Result<(), ConfigError>;
}

/// The persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub date: String,
    pub count: u32,
}

/// [`SessionStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    /// Open the store at `<data_dir>/session_count.json`.
    pub fn open() -> Result<Self, ConfigError> {
        Ok(Self {
            path: data_dir()?.join(SESSION_FILE),
        })
    }

    /// Use an explicit record path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> Result<PersistedSession, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: self.path.clone(),
            message,
        };
        let content = std::fs::read_to_string(&self.path).map_err(|e| load_failed(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| load_failed(e.to_string()))
    }

    fn write_record(&self, record: &PersistedSession) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let json = serde_json::to_string(record)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self, date_key: &str) -> u32 {
        match self.read_record() {
            Ok(record) if record.date == date_key => record.count,
            Ok(record) => {
                debug!(stored = %record.date, today = %date_key, "session record is from another day");
                0
            }
            Err(e) => {
                if self.path.exists() {
                    warn!("ignoring unreadable session record: {e}");
                }
                0
            }
        }
    }

    fn save(&self, date_key: &str, count: u32) -> Result<(), ConfigError> {
        let record = PersistedSession {
            date: date_key.to_string(),
            count,
        };
        self.write_record(&record).map_err(|e| ConfigError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> JsonSessionStore {
        JsonSessionStore::with_path(temp_dir.path().join(SESSION_FILE))
    }

    #[test]
    fn load_without_record_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(store_in(&temp_dir).load("2025-06-12"), 0);
    }

    #[test]
    fn load_matching_date() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        std::fs::write(store.path(), r#"{"date": "2025-06-12", "count": 3}"#).unwrap();

        assert_eq!(store.load("2025-06-12"), 3);
    }

    #[test]
    fn load_mismatched_date_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        std::fs::write(store.path(), r#"{"date": "2099-01-01", "count": 3}"#).unwrap();

        assert_eq!(store.load("2100-01-01"), 0);
    }

    #[test]
    fn load_unparseable_content_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        for content in ["not json", "", r#"{"date": "2025-06-12"}"#, r#"{"date": 5, "count": -1}"#] {
            std::fs::write(store.path(), content).unwrap();
            assert_eq!(store.load("2025-06-12"), 0, "content: {content:?}");
        }
    }

    #[test]
    fn save_writes_exact_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.save("2025-06-12", 2).unwrap();

        let written = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(written, r#"{"date":"2025-06-12","count":2}"#);
    }

    #[test]
    fn save_replaces_prior_record_and_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.save("2025-06-12", 1).unwrap();
        store.save("2025-06-13", 4).unwrap();

        assert_eq!(store.load("2025-06-12"), 0);
        assert_eq!(store.load("2025-06-13"), 4);
        let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn save_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonSessionStore::with_path(temp_dir.path().join("nested/dir").join(SESSION_FILE));
        store.save("2025-06-12", 5).unwrap();

        assert_eq!(store.load("2025-06-12"), 5);
    }
}
