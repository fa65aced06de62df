use super::files::{atomic_write, read_file};
use crate::domain::{Activity, StreakSink, Task};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const TASKS_KEY: &str = "tasks";
pub const ACTIVITIES_KEY: &str = "activities";
pub const STREAK_KEY: &str = "streak";

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// One file per key (`<key>.json`) inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        read_file(self.key_path(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        atomic_write(self.key_path(key), value)
    }
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Key under which a value that could not be fully loaded is kept before
/// its key is overwritten
pub fn backup_key(key: &str) -> String {
    format!("{}.rejected", key)
}

/// Typed access to the persisted tasks, activities and streak.
///
/// Loading never fails. Lists are read record by record: a record that does
/// not parse is skipped and logged, the rest are kept. Whenever something was
/// dropped on load, the raw stored value is copied to [`backup_key`] before
/// the first write to that key, and the write is refused if the copy fails.
#[derive(Debug, Clone)]
pub struct Storage<S: KeyValueStore> {
    store: S,
    /// Raw values that lost records on load, by key
    rejected: HashMap<&'static str, String>,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            rejected: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_tasks(&mut self) -> Vec<Task> {
        self.load_records(TASKS_KEY)
    }

    pub fn load_activities(&mut self) -> Vec<Activity> {
        self.load_records(ACTIVITIES_KEY)
    }

    pub fn load_streak(&mut self) -> u32 {
        let Some(raw) = self.load_raw(STREAK_KEY) else {
            return 0;
        };
        match raw.trim().parse() {
            Ok(streak) => streak,
            Err(_) => {
                warn!(value = %raw.trim(), "ignoring malformed streak value");
                self.rejected.insert(STREAK_KEY, raw);
                0
            }
        }
    }

    pub fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks).context("Failed to serialize tasks")?;
        self.write(TASKS_KEY, &json)
    }

    pub fn save_activities(&mut self, activities: &[Activity]) -> Result<()> {
        let json = serde_json::to_string(activities).context("Failed to serialize activities")?;
        self.write(ACTIVITIES_KEY, &json)
    }

    pub fn save_streak(&mut self, streak: u32) -> Result<()> {
        self.write(STREAK_KEY, &streak.to_string())
    }

    /// Persist the end of a day: the emptied task list first, then the new
    /// streak. If the task list cannot be written the streak is left alone,
    /// so the same day is never counted twice.
    pub fn close_day(&mut self, streak: u32) -> Result<()> {
        self.save_tasks(&[])?;
        self.save_streak(streak)
    }

    fn write(&mut self, key: &'static str, value: &str) -> Result<()> {
        if let Some(raw) = self.rejected.get(key) {
            let backup = backup_key(key);
            self.store
                .set(&backup, raw)
                .with_context(|| format!("Failed to back up unreadable {} data", key))?;
            self.rejected.remove(key);
            info!(key, backup = %backup, "kept a copy of the stored value before overwriting");
        }
        self.store.set(key, value)
    }

    fn load_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value");
                None
            }
        }
    }

    fn load_records<T: DeserializeOwned>(&mut self, key: &'static str) -> Vec<T> {
        let Some(raw) = self.load_raw(key) else {
            debug!(key, "no stored value, starting empty");
            return Vec::new();
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }

        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!(key, error = %e, "ignoring malformed stored value");
                self.rejected.insert(key, raw);
                return Vec::new();
            }
        };

        let total = values.len();
        let records: Vec<T> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(key, index, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect();

        if records.len() < total {
            self.rejected.insert(key, raw);
        }
        records
    }
}

impl<S: KeyValueStore> StreakSink for Storage<S> {
    fn persist_streak(&mut self, streak: u32) -> Result<()> {
        self.close_day(streak)
    }
}
