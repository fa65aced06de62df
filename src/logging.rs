use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "daystreak.log";

/// Install the global subscriber, appending to `<data_dir>/daystreak.log`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout/stderr.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging(data_dir: &Path) -> Result<PathBuf> {
    let path = data_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = init_logging(temp_dir.path()).unwrap();

        assert_eq!(path, temp_dir.path().join(LOG_FILE_NAME));
        assert!(path.exists());
    }

    #[test]
    fn test_init_logging_missing_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(init_logging(&temp_dir.path().join("missing")).is_err());
    }
}
