use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::common::constants::{
    DEFAULT_DETAIL_CONCURRENCY, DEFAULT_TIMEOUT_SECONDS, POKEAPI_BASE_URL, POKEMON_COLLECTION,
    USER_AGENT,
};
use crate::common::error::{CatalogError, Result};

pub const CONFIG_ENV: &str = "DEX_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dex.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub base_url: String,
    pub collection: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub detail_concurrency: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: POKEAPI_BASE_URL.to_string(),
            collection: POKEMON_COLLECTION.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: USER_AGENT.to_string(),
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Daily-rolling JSON log files are written here when set.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "dex_catalog=info".to_string(),
            directory: None,
            file_prefix: "dex.log".to_string(),
        }
    }
}

impl Config {
    /// Resolve configuration: explicit path, then `DEX_CONFIG`, then
    /// `dex.toml` in the working directory, then built-in defaults.
    /// `DEX_BASE_URL` and `DEX_TIMEOUT_SECONDS` override the file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => match std::env::var(CONFIG_ENV) {
                Ok(path) => Some(PathBuf::from(path)),
                Err(_) => {
                    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                    local.exists().then_some(local)
                }
            },
        };

        let mut config = match path {
            Some(path) => Self::load_from(&path)?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `DEX_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = lookup("DEX_BASE_URL") {
            self.catalog.base_url = base_url;
        }
        if let Some(raw) = lookup("DEX_TIMEOUT_SECONDS") {
            self.catalog.timeout_seconds = raw.trim().parse().map_err(|e| {
                CatalogError::Config(format!("DEX_TIMEOUT_SECONDS '{}' is not a number: {}", raw, e))
            })?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_seconds)
    }
}
