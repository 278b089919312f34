//! Application configuration.
//!
//! Loaded once at startup from a JSON file; every field has a default so a
//! missing file or a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::errors::ConfigError;

/// Env var naming the JSON config file.
pub const CONFIG_ENV: &str = "LINKMANAGER_CONFIG";
/// Env var naming the directory the database file is placed in.
pub const DATA_DIR_ENV: &str = "LINKMANAGER_DATA_DIR";
pub const DEFAULT_CONFIG_PATH: &str = "config/parameters.json";
pub const DATABASE_FILE: &str = "linkmanager.db";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: String,
    /// Title of the landing page.
    pub app_title: String,
    /// Default tracing filter when neither `LINKMANAGER_LOG` nor `RUST_LOG` is set.
    pub log_level: String,
    pub assets: AssetConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: DATABASE_FILE.to_string(),
            app_title: "Bookmark Manager".to_string(),
            log_level: "info".to_string(),
            assets: AssetConfig::default(),
        }
    }
}

/// Static assets declared on every page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    pub bootstrap_version: String,
    pub icons_stylesheet: String,
    pub app_script: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            bootstrap_version: "5.3.8".to_string(),
            icons_stylesheet: "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.css"
                .to_string(),
            app_script: "assets/app.js".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a JSON file.
    ///
    /// If the file does not exist, returns the defaults.
    /// If the file exists but is malformed, returns a parse error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the config file from `LINKMANAGER_CONFIG`, then applies the
    /// `LINKMANAGER_DATA_DIR` override for the database location.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let config = Self::load(path)?;
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) => Ok(config.with_data_dir(dir)),
            Err(_) => Ok(config),
        }
    }

    /// Places the database file inside `dir`.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        let path: PathBuf = dir.as_ref().join(DATABASE_FILE);
        self.database_path = path.to_string_lossy().to_string();
        self
    }

    /// Rejects values the application cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue("database_path cannot be empty".to_string()));
        }
        if self.app_title.trim().is_empty() {
            return Err(ConfigError::InvalidValue("app_title cannot be empty".to_string()));
        }
        Ok(())
    }
}
