//! Best-effort persistence for crash recovery.
//!
//! The session manager periodically snapshots its state through a
//! `BackupStore` so that a crashed or killed process can pick up a running
//! session on the next launch. Persistence is strictly best-effort: a store
//! failure is logged and swallowed, it never interrupts tracking.

use std::collections::HashMap;
use std::fs;

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::libs::data_storage::DataStorage;
use crate::libs::time_entry::TimeEntry;

/// Backup key for the in-progress session snapshot.
pub const KEY_CURRENT_SESSION: &str = "current_session";
/// Backup key for the completed-entries history.
pub const KEY_TIME_ENTRIES: &str = "time_entries";
/// Backup key for the activity catalog.
pub const KEY_ACTIVITIES: &str = "activities";

/// Keyed JSON value store used for crash recovery.
///
/// Implementations must be safe to call from the ticker task and the
/// foreground thread concurrently.
pub trait BackupStore: Send + Sync {
    /// Persists `value` under `key`, replacing any previous value.
    fn backup(&self, key: &str, value: &Value) -> Result<()>;

    /// Loads the value stored under `key`, or `None` when absent.
    fn restore(&self, key: &str) -> Result<Option<Value>>;

    /// Removes the value stored under `key`. Clearing a missing key is not
    /// an error.
    fn clear(&self, key: &str) -> Result<()>;
}

/// Snapshot of an in-progress session, written on every state change and
/// periodically from the ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub entry: TimeEntry,
    pub is_paused: bool,
    pub pause_start: Option<DateTime<Utc>>,
    /// Accumulated completed pause time, in milliseconds.
    pub total_paused_ms: i64,
}

/// File-backed store keeping one JSON file per key in the application data
/// directory.
#[derive(Clone, Default)]
pub struct JsonFileStore {
    storage: DataStorage,
}

impl JsonFileStore {
    pub fn new() -> Self {
        Self { storage: DataStorage::new() }
    }

    fn file_path(&self, key: &str) -> Result<std::path::PathBuf> {
        self.storage
            .get_path(&format!("{}.json", key))
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

impl BackupStore for JsonFileStore {
    fn backup(&self, key: &str, value: &Value) -> Result<()> {
        let path = self.file_path(key)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn restore(&self, key: &str) -> Result<Option<Value>> {
        let path = self.file_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        let value = serde_json::from_str(&contents)?;
        Ok(Some(value))
    }

    fn clear(&self, key: &str) -> Result<()> {
        let path = self.file_path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl BackupStore for MemoryStore {
    fn backup(&self, key: &str, value: &Value) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn restore(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}
