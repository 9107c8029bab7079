//! Configuration file handling for the expense tracker.
//!
//! The configuration file is optional. It is read from `--config` (or `$EXPENSES_CONFIG`) when
//! given, otherwise from `expenses/config.json` under the platform's config directory if such a
//! file exists. Without a file, defaults apply.

use crate::render::Format;
use crate::store::{SortConfig, SortToggle, Store};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app: how sorting behaves, how the
/// expense list starts out sorted and how views are written.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The file the configuration was loaded from, if any.
    path: Option<PathBuf>,
    config_file: ConfigFile,
}

impl Config {
    /// Writes a configuration file with default settings to `path`, creating its parent
    /// directory if needed.
    ///
    /// # Errors
    /// - Returns an error if a file already exists at `path`.
    /// - Returns an error if any file operations fail.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            bail!("A file already exists at '{}'", path.display());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            utils::make_dir(parent)
                .await
                .context("Unable to create the config directory")?;
        }
        let config_file = ConfigFile::default();
        config_file.save(&path).await?;
        Ok(Self {
            path: Some(path),
            config_file,
        })
    }

    /// Loads the configuration.
    ///
    /// - If `path` is given, the file must exist.
    /// - Otherwise the default location is tried, and defaults are used when nothing is there.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => {
                if !p.is_file() {
                    bail!("The config file is missing '{}'", p.display())
                }
                p.to_path_buf()
            }
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(p) => p,
                None => {
                    debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        debug!("Loading config from {}", path.display());
        let config_file = ConfigFile::load(&path).await?;
        Ok(Self {
            path: Some(path),
            config_file,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn sort_toggle(&self) -> SortToggle {
        self.config_file.sort_toggle
    }

    pub fn initial_sort(&self) -> SortConfig {
        self.config_file.initial_sort
    }

    pub fn format(&self) -> Format {
        self.config_file.format
    }

    /// Creates an empty store set up according to this configuration.
    pub fn store(&self) -> Store {
        Store::with_options(self.sort_toggle(), self.initial_sort())
    }
}

/// The default location of the config file, e.g. `~/.config/expenses/config.json` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_JSON))
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "sort_toggle": "reset",
///   "initial_sort": { "key": "date", "direction": "asc" },
///   "format": "table"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// What a click on a different column does to the sort direction
    #[serde(default)]
    sort_toggle: SortToggle,

    /// The sort applied before any column is clicked
    #[serde(default)]
    initial_sort: SortConfig,

    /// The default output format
    #[serde(default)]
    format: Format,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            sort_toggle: SortToggle::default(),
            initial_sort: SortConfig::default(),
            format: Format::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app or
    /// a newer version.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Unsupported config_version {} in config file, the newest known version is {}",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Direction, SortKey};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_JSON);

        let created = Config::create(&path).await.unwrap();
        assert_eq!(created.path(), Some(path.as_path()));
        assert!(path.is_file());

        let loaded = Config::load(Some(path.as_path())).await.unwrap();
        assert_eq!(loaded.sort_toggle(), SortToggle::Reset);
        assert_eq!(loaded.initial_sort(), SortConfig::default());
        assert_eq!(loaded.format(), Format::Table);
    }

    #[tokio::test]
    async fn test_config_create_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, "{}").await.unwrap();
        let err = Config::create(&path).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let err = Config::load(Some(path.as_path())).await.unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        let json = r#"{
            "app_name": "expenses",
            "config_version": 1,
            "sort_toggle": "inherit",
            "initial_sort": { "key": "amount", "direction": "desc" }
        }"#;
        utils::write(&path, json).await.unwrap();

        let config = Config::load(Some(path.as_path())).await.unwrap();
        assert_eq!(config.sort_toggle(), SortToggle::Inherit);
        assert_eq!(
            config.initial_sort(),
            SortConfig::new(SortKey::Amount, Direction::Descending)
        );
        assert_eq!(config.format(), Format::Table);

        let store = config.store();
        assert_eq!(store.sort_toggle(), SortToggle::Inherit);
        assert_eq!(store.state().sort.key, SortKey::Amount);
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{"app_name": "budget", "config_version": 1}"#)
            .await
            .unwrap();

        let result = ConfigFile::load(&path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_load_newer_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{"app_name": "expenses", "config_version": 9}"#)
            .await
            .unwrap();

        let result = ConfigFile::load(&path).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unsupported config_version"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        let original = ConfigFile {
            format: Format::Csv,
            ..ConfigFile::default()
        };
        original.save(&path).await.unwrap();
        let loaded = ConfigFile::load(&path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("expenses/config.json"));
        }
    }
}
