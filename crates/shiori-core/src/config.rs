use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// GraphQL endpoint of the anime catalog.
    pub api_url: String,
    /// Page size for search, trending and season queries.
    pub per_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl AppConfig {
    /// Load config: the user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_or_default(&Self::config_path())
    }

    /// Load `path` merged over the defaults, or the defaults alone when it is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, CoreError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Self::parse("")
        }
    }

    /// Load config from an explicit file, merged over the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loading config");
        Self::parse(&content)
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "shiori")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn parse(content: &str) -> Result<Self, CoreError> {
        let mut merged: toml::Table = DEFAULT_CONFIG
            .parse()
            .map_err(|e: toml::de::Error| CoreError::Config(e.to_string()))?;
        let user: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| CoreError::Config(e.to_string()))?;
        merge_tables(&mut merged, user);
        toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| CoreError::Config(e.to_string()))
    }
}

/// Recursively overlay `overlay` onto `base`; scalar and array values replace.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(nested) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, nested),
                _ => {
                    base.insert(key, toml::Value::Table(nested));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
