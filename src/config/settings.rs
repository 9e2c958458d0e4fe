//! Configuration file handling
//!
//! Provides configuration stored in ~/.proofstore/config.toml

use crate::core::error::{ProofstoreError, Result};
use crate::proofs::TreeFormat;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `store.data_dir`
pub const ENV_DATA_DIR: &str = "PROOFSTORE_DATA_DIR";
/// Environment variable overriding `client.roots_dir`
pub const ENV_ROOTS_DIR: &str = "PROOFSTORE_ROOTS_DIR";
/// Environment variable overriding `client.downloads_dir`
pub const ENV_DOWNLOADS_DIR: &str = "PROOFSTORE_DOWNLOADS_DIR";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store-side settings
    pub store: StoreConfig,
    /// Client-side settings
    pub client: ClientConfig,
}

/// Where and how uploaded sets are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one subdirectory per store key
    pub data_dir: PathBuf,
    /// Encoding of the persisted merkle tree
    pub tree_format: TreeFormat,
}

/// Client-side paths and behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Directory holding the locally recorded merkle roots
    pub roots_dir: PathBuf,
    /// Directory verified downloads are written to
    pub downloads_dir: PathBuf,
    /// Remove the source directory after a successful upload
    pub remove_after_upload: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: base_dir().join("files"),
            tree_format: TreeFormat::Json,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            roots_dir: base_dir().join("merkle_roots"),
            downloads_dir: PathBuf::from("downloads"),
            remove_after_upload: false,
        }
    }
}

/// ~/.proofstore, or ./.proofstore when no home directory can be found
fn base_dir() -> PathBuf {
    UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".proofstore"))
        .unwrap_or_else(|| PathBuf::from(".proofstore"))
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults. Environment overrides are applied
    /// on top in both cases.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| {
                ProofstoreError::configuration(format!(
                    "Failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            Self::default()
        };

        config.apply_env(|name| std::env::var_os(name).map(PathBuf::from));
        Ok(config)
    }

    /// Apply path overrides looked up through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<PathBuf>) {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.store.data_dir = dir;
        }
        if let Some(dir) = lookup(ENV_ROOTS_DIR) {
            self.client.roots_dir = dir;
        }
        if let Some(dir) = lookup(ENV_DOWNLOADS_DIR) {
            self.client.downloads_dir = dir;
        }
    }

    /// Save configuration to `path`, or to the default location
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ProofstoreError::configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    /// Get the path to the default configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(ProofstoreError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(".proofstore").join("config.toml"))
    }

    /// Render as TOML for display
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ProofstoreError::configuration(format!("Failed to serialize config: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::load(Some(&temp_dir.path().join("none.toml"))).unwrap();
        // Undo whatever the test environment sets.
        let defaults = Config::default();
        config.store.data_dir = defaults.store.data_dir.clone();
        config.client.roots_dir = defaults.client.roots_dir.clone();
        config.client.downloads_dir = defaults.client.downloads_dir.clone();

        assert_eq!(config, defaults);
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[store]\ntree_format = \"binary\"\n\n[client]\nremove_after_upload = true\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.store.tree_format, TreeFormat::Binary);
        assert!(config.client.remove_after_upload);
    }

    #[test]
    fn test_save_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.store.data_dir = PathBuf::from("/srv/proofstore");
        config.store.tree_format = TreeFormat::Binary;
        config.save(Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let reloaded: Config = toml::from_str(&content).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[store]\ntree_format = \"yaml\"\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ProofstoreError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|name| match name {
            ENV_DATA_DIR => Some(PathBuf::from("/data")),
            ENV_DOWNLOADS_DIR => Some(PathBuf::from("/dl")),
            _ => None,
        });

        assert_eq!(config.store.data_dir, PathBuf::from("/data"));
        assert_eq!(config.client.downloads_dir, PathBuf::from("/dl"));
        assert_eq!(config.client.roots_dir, ClientConfig::default().roots_dir);
    }
}
