//! Application configuration management.
//!
//! Configuration is stored at `~/.config/wardbook/config.json`; the API
//! base URL can be overridden per run with `WARDBOOK_API_URL` (also
//! honored from a `.env` file). The session store lives under the cache
//! directory so wiping it is always safe.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "wardbook";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default backend address (local FastAPI dev server).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend address.
pub const API_URL_ENV: &str = "WARDBOOK_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Backend address: environment beats the config file beats the default.
    pub fn base_url(&self) -> String {
        self.base_url_with(std::env::var(API_URL_ENV).ok())
    }

    fn base_url_with(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// Directory holding the persisted session entries.
    pub fn session_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join("session"))
    }
}
