//! Application configuration management.
//!
//! This module handles loading and saving the worker configuration,
//! which includes the origin to serve, the cache version tag, and the
//! seed resources guaranteed to be available offline.
//!
//! Configuration is stored at `~/.config/shellcache/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "shellcache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

fn default_app_name() -> String {
    APP_NAME.to_string()
}

fn default_cache_version() -> u32 {
    1
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_scope() -> String {
    "/".to_string()
}

fn default_seed_paths() -> Vec<String> {
    vec![
        "/".to_string(),
        "/offline.html".to_string(),
        "/manifest.json".to_string(),
    ]
}

fn default_offline_path() -> String {
    "/offline.html".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name embedded in the cache store's version tag.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Bumping this on redeploy invalidates every previously cached entry.
    #[serde(default = "default_cache_version")]
    pub cache_version: u32,

    /// Origin the worker serves, e.g. `https://app.example.com`.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path prefix under the origin that the worker controls.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Site paths cached at install time, before any interception.
    #[serde(default = "default_seed_paths")]
    pub seed_paths: Vec<String>,

    /// Site path served when both network and cache come up empty.
    #[serde(default = "default_offline_path")]
    pub offline_path: String,

    /// Overrides the platform cache directory when set.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            cache_version: default_cache_version(),
            origin: default_origin(),
            scope: default_scope(),
            seed_paths: default_seed_paths(),
            offline_path: default_offline_path(),
            cache_dir: None,
        }
    }
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

    /// Root directory that holds the versioned cache stores.
    pub fn cache_root(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Version tag naming the current store, e.g. `shellcache-v1`.
    pub fn store_name(&self) -> String {
        format!("{}-v{}", self.app_name, self.cache_version)
    }

    /// Resolve a site path against the configured origin.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.origin.trim_end_matches('/'), path)
    }

    pub fn scope_url(&self) -> String {
        self.resolve(&self.scope)
    }

    pub fn seed_urls(&self) -> Vec<String> {
        self.seed_paths.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn offline_url(&self) -> String {
        self.resolve(&self.offline_path)
    }
}
