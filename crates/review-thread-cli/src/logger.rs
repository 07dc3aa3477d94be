//! File-based logging using simplelog
//!
//! Everything at the configured level goes to a timestamped file in the cache
//! directory; warnings and errors are echoed on stderr.

use anyhow::{Context, Result};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::path::PathBuf;

/// Map a level name to a filter, `None` for unknown names
fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// RUST_LOG wins over the configured level; unknown names fall back to Info
fn resolve_level(env_level: Option<&str>, configured: &str) -> LevelFilter {
    env_level
        .and_then(parse_level)
        .or_else(|| parse_level(configured))
        .unwrap_or(LevelFilter::Info)
}

/// Initialize logging
///
/// Returns the path to the log file.
pub fn init(configured_level: &str) -> Result<PathBuf> {
    let log_file = review_config::paths::log_file_path(chrono::Local::now())?;

    let env_level = std::env::var("RUST_LOG").ok();
    let level = resolve_level(env_level.as_deref(), configured_level);

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    CombinedLogger::init(vec![
        WriteLogger::new(level, config.clone(), file),
        TermLogger::new(
            LevelFilter::Warn,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    ])
    .context("Failed to initialize logger")?;

    Ok(log_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level(Some("debug"), "info"), LevelFilter::Debug);
        assert_eq!(resolve_level(None, "WARN"), LevelFilter::Warn);
        assert_eq!(resolve_level(Some("chatty"), "error"), LevelFilter::Error);
        assert_eq!(resolve_level(None, "chatty"), LevelFilter::Info);
    }
}
