//! Viewer configuration.
//!
//! Loaded from `<config dir>/glimpse/config.toml`. Every section uses
//! `#[serde(default)]`, so a partial file (or none at all) is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Live-reload settings
    pub watch: WatchConfig,

    /// File tree settings
    pub tree: TreeConfig,

    /// Output settings
    pub view: ViewConfig,
}

impl Config {
    /// Loads config from the default location.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring config: {}", err);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("glimpse").join("config.toml"))
    }
}

/// Live-reload configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Reload open tabs when their file changes on disk
    pub enabled: bool,

    /// Modification-time polling interval (ms)
    pub poll_interval_ms: u64,
}

impl WatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: 300,
        }
    }
}

/// File tree configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Entry names never shown in the tree
    pub exclude: Vec<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["node_modules".to_string(), "__pycache__".to_string()],
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Where the rendered page is written
    pub output: PathBuf,

    /// Page title
    pub title: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            output: std::env::temp_dir().join("glimpse.html"),
            title: "Glimpse".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.watch.enabled);
        assert_eq!(config.watch.poll_interval(), Duration::from_millis(300));
        assert_eq!(config.tree.exclude, vec!["node_modules", "__pycache__"]);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[watch]\npoll_interval_ms = 50\n").unwrap();
        assert_eq!(config.watch.poll_interval_ms, 50);
        assert!(config.watch.enabled);
        assert_eq!(config.view.title, "Glimpse");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tree]\nexclude = [\"target\"]\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tree.exclude, vec!["target"]);
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[watch\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
