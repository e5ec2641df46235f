//! Client-side gate configuration.
//!
//! Mirrors the environment options the site recognizes: an explicit API URL,
//! or a port + prefix to derive one from the page location.

use porter_core::{ApiEndpoint, PageLocation, DEFAULT_API_PORT, DEFAULT_API_PREFIX};
use tracing::debug;

/// Environment variable names recognized by [`GateConfig::from_env`].
pub const ENV_API_URL: &str = "PORTER_API_URL";
pub const ENV_API_PORT: &str = "PORTER_API_PORT";
pub const ENV_API_PREFIX: &str = "PORTER_API_PREFIX";
pub const ENV_RELAY_URL: &str = "PORTER_RELAY_URL";

/// Where the analytics service and the inquiry relay live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Explicit analytics base URL. When unset, the base is derived from the
    /// page location with `api_port`.
    pub api_url: Option<String>,
    pub api_port: u16,
    pub api_prefix: String,
    /// Inquiry relay base URL (empty = no relay configured).
    pub relay_url: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_port: DEFAULT_API_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            relay_url: String::new(),
        }
    }
}

impl GateConfig {
    /// Build a config from `PORTER_API_URL`, `PORTER_API_PORT`,
    /// `PORTER_API_PREFIX`, and `PORTER_RELAY_URL`, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay whichever of the recognized environment variables are set.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_url = Some(url);
            }
        }
        if let Ok(port) = std::env::var(ENV_API_PORT) {
            match port.parse() {
                Ok(port) => self.api_port = port,
                Err(_) => debug!(value = %port, "ignoring unparseable API port"),
            }
        }
        if let Ok(prefix) = std::env::var(ENV_API_PREFIX) {
            if !prefix.trim().is_empty() {
                self.api_prefix = prefix;
            }
        }
        if let Ok(url) = std::env::var(ENV_RELAY_URL) {
            if !url.trim().is_empty() {
                self.relay_url = url;
            }
        }
    }

    /// Resolve the analytics endpoint against the given page location.
    pub fn endpoint(&self, location: &PageLocation) -> ApiEndpoint {
        ApiEndpoint::resolve(
            self.api_url.as_deref(),
            self.api_port,
            &self.api_prefix,
            location,
        )
    }
}
