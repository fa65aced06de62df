use super::files::atomic_write;
use crate::domain::{Activity, Task};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default file name of an exported snapshot
pub const SNAPSHOT_FILE_NAME: &str = "settings.json";

/// Full persisted state, as exported for backup
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub tasks: &'a [Task],
    pub activities: &'a [Activity],
    pub streak: u32,
}

impl Snapshot<'_> {
    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize snapshot")
    }
}

/// Write the snapshot to `output`, or `settings.json` in the current
/// directory when no path is given. Returns the written path.
pub fn export_snapshot(snapshot: &Snapshot<'_>, output: Option<&Path>) -> Result<PathBuf> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(SNAPSHOT_FILE_NAME));

    let json = snapshot.to_json()?;
    atomic_write(&path, &json)
        .with_context(|| format!("Failed to export snapshot to {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;

    #[test]
    fn test_snapshot_has_exactly_three_fields() {
        let tasks = vec![Task::new("Run".to_string(), Category::Health)];
        let snapshot = Snapshot {
            tasks: &tasks,
            activities: &[],
            streak: 3,
        };

        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort();

        assert_eq!(keys, vec!["activities", "streak", "tasks"]);
        assert_eq!(value["streak"], 3);
        assert_eq!(value["tasks"][0]["name"], "Run");
        assert!(value["activities"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_is_pretty_printed() {
        let snapshot = Snapshot {
            tasks: &[],
            activities: &[],
            streak: 0,
        };
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\n  \"streak\": 0"));
    }

    #[test]
    fn test_export_to_explicit_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join(SNAPSHOT_FILE_NAME);

        let mut task = Task::new("Read".to_string(), Category::Study);
        task.complete(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let tasks = vec![task];
        let activities = vec![Activity::completed_on(
            NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            Category::Work,
        )];

        let written = export_snapshot(
            &Snapshot {
                tasks: &tasks,
                activities: &activities,
                streak: 2,
            },
            Some(&output),
        )
        .unwrap();

        assert_eq!(written, output);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["tasks"][0]["completionDate"], "2024-01-10");
        assert_eq!(value["activities"][0]["tag"], "work");
        assert_eq!(value["streak"], 2);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("missing").join(SNAPSHOT_FILE_NAME);
        let snapshot = Snapshot {
            tasks: &[],
            activities: &[],
            streak: 0,
        };

        assert!(export_snapshot(&snapshot, Some(&output)).is_err());
    }
}
