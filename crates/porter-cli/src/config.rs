//! CLI configuration at `~/.porter/config.toml`.
//!
//! Environment variables and CLI flags always override config file values.

use anyhow::{Context, Result};
use porter_client::GateConfig;
use porter_core::{DEFAULT_API_PORT, DEFAULT_API_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level config file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analytics API settings.
    #[serde(default)]
    pub api: ApiSection,

    /// Inquiry relay settings.
    #[serde(default)]
    pub relay: RelaySection,
}

/// `[api]` section of the config TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// Explicit analytics base URL (empty = derive from port/prefix).
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_api_port")]
    pub port: u16,

    #[serde(default = "default_api_prefix")]
    pub prefix: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            port: default_api_port(),
            prefix: default_api_prefix(),
        }
    }
}

/// `[relay]` section of the config TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelaySection {
    /// Inquiry relay base URL.
    #[serde(default)]
    pub url: String,
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

impl Config {
    /// Load configuration from a TOML file, returning defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("cannot parse config {}", path.display()))
    }

    /// The default config path (`~/.porter/config.toml`).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".porter")
            .join("config.toml")
    }

    /// Fold the file values into a [`GateConfig`], letting environment
    /// variables and then CLI flags win.
    pub fn gate_config(
        &self,
        cli_api_url: Option<&str>,
        cli_relay_url: Option<&str>,
    ) -> GateConfig {
        let mut gate = GateConfig {
            api_url: if self.api.url.trim().is_empty() {
                None
            } else {
                Some(self.api.url.clone())
            },
            api_port: self.api.port,
            api_prefix: self.api.prefix.clone(),
            relay_url: self.relay.url.clone(),
        };
        gate.apply_env();

        if let Some(url) = cli_api_url {
            gate.api_url = Some(url.to_string());
        }
        if let Some(url) = cli_relay_url {
            gate.relay_url = url.to_string();
        }

        gate
    }
}
