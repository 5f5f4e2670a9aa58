use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "BRIEF_API_BASE_URL";

/// Default backend address for local development.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Client configuration for the brief-generation backend.
///
/// The base URL is the only environment-dependent setting: `from_env`
/// applies the `BRIEF_API_BASE_URL` override on top of the default local
/// address. A TOML file may supply both fields for embedded hosts that
/// ship a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds. A timeout is reported through the
    /// same reject path as any other transport failure.
    pub timeout_secs: u64,
}

impl Default for BriefConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl BriefConfig {
    /// Build the configuration from defaults plus the environment override.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        config.normalize();
        config
    }

    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: BriefConfig = toml::from_str(&content)?;
        config.normalize();
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    fn normalize(&mut self) {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
    }
}
