//! # Configuration
//!
//! Settings are stored in `config.json` under the OS config directory
//! (resolved via the `directories` crate) and can be overridden per
//! invocation with environment variables:
//!
//! | Key | Env override | Default |
//! |-----|--------------|---------|
//! | `api_url` | `DIRDEX_API_URL` | — (required) |
//! | `api_key` | `DIRDEX_API_KEY` | — (required) |
//! | `cache_dir` | `DIRDEX_CACHE_DIR` | `<config dir>/cache` |
//! | `cache_ttl_hours` | `DIRDEX_CACHE_TTL_HOURS` | `24` |

use crate::error::{DirdexError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirdexConfig {
    #[serde(default)]
    pub api_url: String,

    #[serde(default)]
    pub api_key: String,

    /// Cache directory override; when absent the cache lives next to the
    /// config file.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Snapshot time-to-live in hours. Zero disables the cache.
    #[serde(default = "default_ttl_hours")]
    pub cache_ttl_hours: i64,
}

fn default_ttl_hours() -> i64 {
    DEFAULT_TTL_HOURS
}

impl Default for DirdexConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            cache_dir: None,
            cache_ttl_hours: DEFAULT_TTL_HOURS,
        }
    }
}

impl DirdexConfig {
    /// Load config from the given directory (defaults when missing), then
    /// apply environment overrides.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let mut config = Self::load_file(config_dir.as_ref())?;
        config.apply_env();
        Ok(config)
    }

    fn load_file(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DirdexError::Io)?;
        serde_json::from_str(&content).map_err(DirdexError::Serialization)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("DIRDEX_API_URL") {
            self.api_url = url;
        }
        if let Ok(key) = std::env::var("DIRDEX_API_KEY") {
            self.api_key = key;
        }
        if let Ok(dir) = std::env::var("DIRDEX_CACHE_DIR") {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        if let Ok(hours) = std::env::var("DIRDEX_CACHE_TTL_HOURS") {
            if let Ok(parsed) = hours.parse() {
                self.cache_ttl_hours = parsed;
            }
        }
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DirdexError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(DirdexError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(DirdexError::Io)?;
        Ok(())
    }

    /// Fail unless the remote endpoint is configured.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() || self.api_key.is_empty() {
            return Err(DirdexError::Config(
                "API URL and key are missing. Set them in config.json or with \
                 DIRDEX_API_URL and DIRDEX_API_KEY"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn cache_dir_or<P: AsRef<Path>>(&self, config_dir: P) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| config_dir.as_ref().join("cache"))
    }

    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.cache_ttl_hours.max(0))
    }
}
