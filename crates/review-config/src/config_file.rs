//! Locating `.review-thread.toml`
//!
//! Lookup order, first readable file wins:
//! 1. `./.review-thread.toml` in the current working directory
//! 2. `~/.review-thread.toml` (when `HOME` is set)

use std::path::{Path, PathBuf};

pub(crate) const CONFIG_FILE: &str = ".review-thread.toml";

/// Candidate config paths in lookup order
pub fn config_candidates(home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    candidates.extend(home.map(|home| home.join(CONFIG_FILE)));
    candidates
}

/// Read the first config file found, with the path it came from
pub fn load_config_file() -> Option<(PathBuf, String)> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    read_first(&config_candidates(home.as_deref()))
}

fn read_first(candidates: &[PathBuf]) -> Option<(PathBuf, String)> {
    candidates.iter().find_map(|path| match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some((path.clone(), content))
        }
        Err(e) => {
            log::trace!("No config at {}: {}", path.display(), e);
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_order() {
        let candidates = config_candidates(Some(Path::new("/home/ana")));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from(".review-thread.toml"),
                PathBuf::from("/home/ana/.review-thread.toml"),
            ]
        );

        assert_eq!(config_candidates(None).len(), 1);
    }

    #[test]
    fn test_read_first_skips_missing() {
        let dir = std::env::temp_dir().join(format!("review-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let present = dir.join(CONFIG_FILE);
        std::fs::write(&present, "viewer_id = 3").unwrap();

        let found = read_first(&[dir.join("missing.toml"), present.clone()]).unwrap();
        assert_eq!(found, (present, "viewer_id = 3".to_string()));
        assert!(read_first(&[dir.join("missing.toml")]).is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
