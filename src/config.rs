//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the remote service URL, its public API key, and the last used email.
//!
//! Configuration is stored at `~/.config/lexicache/config.json`; the
//! `LEXICACHE_SERVICE_URL` and `LEXICACHE_ANON_KEY` environment variables
//! take precedence over the file.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "lexicache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub service_url: Option<String>,
    pub anon_key: Option<String>,
    pub last_email: Option<String>,
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

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Service URL, env var first, then the config file.
    pub fn service_url(&self) -> Result<String> {
        std::env::var("LEXICACHE_SERVICE_URL")
            .ok()
            .or_else(|| self.service_url.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("No service URL configured (set LEXICACHE_SERVICE_URL)")
            })
    }

    /// Public API key, env var first, then the config file.
    pub fn anon_key(&self) -> Result<String> {
        std::env::var("LEXICACHE_ANON_KEY")
            .ok()
            .or_else(|| self.anon_key.clone())
            .ok_or_else(|| anyhow::anyhow!("No API key configured (set LEXICACHE_ANON_KEY)"))
    }
}
