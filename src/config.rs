//! Application Configuration
//! Optional JSON file overriding the dashboard defaults.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "green_board.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{0}' must be at least 1")]
    OutOfRange(&'static str),
}

/// Dashboard settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    pub title: String,
    pub max_selection: usize,
    pub default_selection: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("dados-atualizados.csv"),
            title: "Melhores ligas - 11/2021".to_string(),
            max_selection: 10,
            default_selection: 6,
            window_width: 1400.0,
            window_height: 800.0,
        }
    }
}

impl AppConfig {
    /// Load [`CONFIG_FILE`] from the working directory, or the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_selection == 0 {
            return Err(ConfigError::OutOfRange("max_selection"));
        }
        if self.default_selection == 0 {
            return Err(ConfigError::OutOfRange("default_selection"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_selection, 10);
        assert_eq!(config.default_selection, 6);
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{ "csv_path": "ligas.csv", "default_selection": 3 }"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.csv_path, PathBuf::from("ligas.csv"));
        assert_eq!(config.default_selection, 3);
        assert_eq!(config.title, "Melhores ligas - 11/2021");
        assert_eq!(config.max_selection, 10);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn zero_bounds_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "max_selection": 0 }"#).unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::OutOfRange("max_selection"))
        ));
    }
}
