//! Persistent key-value store
//!
//! Every "backend" operation in trellis is a synchronous read or write
//! against a fixed set of named keys, each holding one JSON payload
//! under `.trellis/store/<key>.json`. Writes overwrite the whole value;
//! the last write wins. A missing key means "first run". A corrupt
//! payload is logged and treated as missing so callers fall back to a
//! freshly-initialized default instead of failing.

use console::style;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::workspace::Workspace;

/// The fixed set of persisted keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    IcAssessments,
    ManagerAssessments,
    WeeklyDraft,
    WeeklyHistory,
    QuarterlyDraft,
    QuarterlyHistory,
    ChatCurrent,
    ChatCurrentId,
    ChatHistories,
    Preferences,
    Progress,
}

impl StoreKey {
    /// File stem used under the store directory
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::IcAssessments => "ic_assessments",
            StoreKey::ManagerAssessments => "manager_assessments",
            StoreKey::WeeklyDraft => "weekly_draft",
            StoreKey::WeeklyHistory => "weekly_history",
            StoreKey::QuarterlyDraft => "quarterly_draft",
            StoreKey::QuarterlyHistory => "quarterly_history",
            StoreKey::ChatCurrent => "chat_current",
            StoreKey::ChatCurrentId => "chat_current_id",
            StoreKey::ChatHistories => "chat_histories",
            StoreKey::Preferences => "preferences",
            StoreKey::Progress => "progress",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while reading or writing the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on key '{key}': {source}")]
    Io {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize key '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle to the per-workspace store directory
#[derive(Debug)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open the store for a workspace, creating the directory if needed
    pub fn open(workspace: &Workspace) -> Result<Self, StoreError> {
        let dir = workspace.store_dir();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            key: "store",
            source: e,
        })?;
        Ok(Self { dir })
    }

    fn path(&self, key: StoreKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    /// Whether a value has ever been written under the key
    pub fn exists(&self, key: StoreKey) -> bool {
        self.path(key).is_file()
    }

    /// Load the value under `key`. Missing and corrupt payloads both
    /// yield `None`; corruption is logged to stderr for diagnostics.
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let path = self.path(key);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                eprintln!(
                    "{} stored data under '{}' could not be parsed ({}); starting fresh",
                    style("!").yellow(),
                    key,
                    e
                );
                None
            }
        }
    }

    /// Serialize `value` and overwrite the key
    pub fn save<T: Serialize>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialize {
            key: key.as_str(),
            source: e,
        })?;
        fs::write(self.path(key), json).map_err(|e| StoreError::Io {
            key: key.as_str(),
            source: e,
        })
    }

    /// Remove the key entirely; missing keys are not an error
    pub fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io {
                key: key.as_str(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn test_store() -> (tempfile::TempDir, Store) {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let store = Store::open(&ws).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_missing_key_is_first_run() {
        let (_tmp, store) = test_store();
        let loaded: Option<Sample> = store.load(StoreKey::Preferences);
        assert!(loaded.is_none());
        assert!(!store.exists(StoreKey::Preferences));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_tmp, store) = test_store();
        let value = Sample {
            name: "weekly".into(),
            count: 3,
        };
        store.save(StoreKey::Progress, &value).unwrap();
        let loaded: Sample = store.load(StoreKey::Progress).unwrap();
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_corrupt_payload_falls_back_to_none() {
        let (_tmp, store) = test_store();
        fs::write(store.path(StoreKey::Progress), "{not json").unwrap();
        let loaded: Option<Sample> = store.load(StoreKey::Progress);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_overwrites_whole_value() {
        let (_tmp, store) = test_store();
        store
            .save(
                StoreKey::Progress,
                &Sample {
                    name: "a".into(),
                    count: 1,
                },
            )
            .unwrap();
        store
            .save(
                StoreKey::Progress,
                &Sample {
                    name: "b".into(),
                    count: 2,
                },
            )
            .unwrap();
        let loaded: Sample = store.load(StoreKey::Progress).unwrap();
        assert_eq!(loaded.name, "b");
        assert_eq!(loaded.count, 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_tmp, store) = test_store();
        store
            .save(
                StoreKey::ChatCurrent,
                &Sample {
                    name: "x".into(),
                    count: 0,
                },
            )
            .unwrap();
        store.remove(StoreKey::ChatCurrent).unwrap();
        store.remove(StoreKey::ChatCurrent).unwrap();
        assert!(!store.exists(StoreKey::ChatCurrent));
    }
}
