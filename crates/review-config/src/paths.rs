//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/review-thread/`, `~/.cache/review-thread/`
//! - macOS: `~/Library/Application Support/review-thread/`, `~/Library/Caches/review-thread/`
//! - Windows: `%APPDATA%\review-thread\`, `%LOCALAPPDATA%\review-thread\`

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::PathBuf;

const APP_NAME: &str = "review-thread";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Path of the log file for a run started at `started`
pub fn log_file_path(started: DateTime<Local>) -> Result<PathBuf> {
    Ok(cache_dir()?.join(log_file_name(started)))
}

fn log_file_name(started: DateTime<Local>) -> String {
    format!("{}-{}.log", APP_NAME, started.format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_config_dir_exists() {
        let dir = config_dir().unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_cache_dir_exists() {
        let dir = cache_dir().unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_log_file_name() {
        let started = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(log_file_name(started), "review-thread-20240301-090507.log");
    }

    #[test]
    fn test_log_file_in_cache_dir() {
        let path = log_file_path(Local::now()).unwrap();
        assert!(path.starts_with(cache_dir().unwrap()));
    }
}
