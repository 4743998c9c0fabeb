use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/systembot/config.toml and CLI flags.
/// Tick rates and gauge thresholds are fixed and live in `constants`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Theme name (built-in or custom)
    pub theme: String,
    /// Mount point reported in the dashboard's disk panel
    pub disk_mount: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            disk_mount: PathBuf::from("/"),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional; missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    theme: Option<String>,
    disk_mount: Option<PathBuf>,
}

impl Config {
    /// Load config from `path`, falling back to defaults for any missing
    /// fields. A missing file is pure defaults; an unreadable or malformed one
    /// is logged and ignored.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{}. Using defaults.", e);
                Config::default()
            }
        }
    }

    /// Strictly read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file_config: FileConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::default().merged(file_config))
    }

    /// Merge file values over defaults.
    fn merged(mut self, file_config: FileConfig) -> Self {
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                self.theme = v;
            }
        }
        if let Some(v) = file_config.disk_mount {
            if !v.as_os_str().is_empty() {
                self.disk_mount = v;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let (_dir, path) = write_config("theme = \"nord\"\ndisk_mount = \"/home\"\n");
        let config = Config::load(&path);
        assert_eq!(config.theme, "nord");
        assert_eq!(config.disk_mount, PathBuf::from("/home"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let (_dir, path) = write_config("theme = \"gruvbox\"\n");
        let config = Config::load(&path);
        assert_eq!(config.theme, "gruvbox");
        assert_eq!(config.disk_mount, PathBuf::from("/"));
    }

    #[test]
    fn empty_strings_are_ignored() {
        let (_dir, path) = write_config("theme = \"\"\ndisk_mount = \"\"\n");
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let (_dir, path) = write_config("theme = [not toml");
        assert_eq!(Config::load(&path), Config::default());
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn unreadable_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but can't be read as a file
        assert!(matches!(
            Config::from_file(dir.path()),
            Err(ConfigError::Read { .. })
        ));
    }
}
