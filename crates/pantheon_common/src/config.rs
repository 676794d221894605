//! Client configuration.
//!
//! Config file: `~/.config/pantheon/config.toml`. A missing file or
//! missing fields fall back to defaults; `PANTHEON_BACKEND_URL`
//! overrides the endpoint for local development.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the dashboard backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Opaque session token carried on every request, if present.
    /// Obtaining it is the backend's concern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            session_token: None,
        }
    }
}

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

impl ClientConfig {
    /// Load from the default path, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config ({:#}), using defaults", e);
                Self::default()
            }),
            _ => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Load and parse a specific config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pantheon").join("config.toml"))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("PANTHEON_BACKEND_URL") {
            self.backend.base_url = url;
        }
        self
    }
}
