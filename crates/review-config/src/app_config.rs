//! Application configuration
//!
//! Configuration loaded from .review-thread.toml.

use serde::{Deserialize, Serialize};

/// Application configuration loaded from .review-thread.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Signed-in user's id; unset means read-only browsing
    #[serde(default)]
    pub viewer_id: Option<u64>,

    /// Signed-in user's display name
    #[serde(default)]
    pub viewer_handle: Option<String>,

    /// Directory holding rating-<id>.json fixtures
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: String,

    /// Apply upvotes and edits before the server answers
    #[serde(default = "default_optimistic_updates")]
    pub optimistic_updates: bool,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_fixtures_dir() -> String {
    "fixtures".to_string()
}

fn default_optimistic_updates() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewer_id: None,
            viewer_handle: None,
            fixtures_dir: default_fixtures_dir(),
            optimistic_updates: default_optimistic_updates(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Display name for the viewer, falling back to `user-<id>`
    pub fn viewer_name(&self) -> Option<String> {
        let id = self.viewer_id?;
        Some(
            self.viewer_handle
                .clone()
                .unwrap_or_else(|| format!("user-{}", id)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.viewer_id, None);
        assert_eq!(config.fixtures_dir, "fixtures");
        assert!(config.optimistic_updates);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            viewer_id = 2
            viewer_handle = "bo"
            optimistic_updates = false
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.viewer_id, Some(2));
        assert_eq!(config.viewer_name().as_deref(), Some("bo"));
        assert!(!config.optimistic_updates);
        // fixtures_dir should use default
        assert_eq!(config.fixtures_dir, "fixtures");
    }

    #[test]
    fn test_viewer_name_fallback() {
        let config = AppConfig::parse("viewer_id = 9").unwrap();
        assert_eq!(config.viewer_name().as_deref(), Some("user-9"));

        assert_eq!(AppConfig::default().viewer_name(), None);
    }

    #[test]
    fn test_config_rejects_wrong_types() {
        assert!(AppConfig::parse("optimistic_updates = \"yes\"").is_err());
    }
}
