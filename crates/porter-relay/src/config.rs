//! Relay configuration: TOML file + CLI overrides + environment secrets.

use porter_core::{PorterError, PorterResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variables holding the provider secrets. They override the
/// config file and are never logged.
pub const ENV_API_TOKEN: &str = "PUSHOVER_API_TOKEN";
pub const ENV_USER_KEYS: &str = "PUSHOVER_USER_KEYS";

/// Top-level config file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub notify: NotifySection,
}

/// `[server]` section of the config TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

/// `[notify]` section of the config TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifySection {
    #[serde(default = "default_provider_url")]
    pub provider_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub user_keys: Vec<String>,
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            timeout_secs: default_timeout_secs(),
            api_token: String::new(),
            user_keys: Vec::new(),
        }
    }
}

fn default_port() -> u16 {
    8787
}
fn default_bind() -> String {
    "0.0.0.0".to_string()
}
fn default_provider_url() -> String {
    "https://api.pushover.net/1/messages.json".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

/// Resolved relay configuration (CLI overrides and secrets applied).
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub bind: String,
    pub provider_url: String,
    pub timeout_secs: u64,
    pub api_token: String,
    pub user_keys: Vec<String>,
}

impl RelayConfig {
    /// Load config from a TOML file, then apply CLI overrides and the
    /// `PUSHOVER_API_TOKEN` / `PUSHOVER_USER_KEYS` environment secrets.
    pub fn load(config_path: Option<&Path>, cli_port: Option<u16>) -> PorterResult<Self> {
        let file_config = if let Some(path) = config_path {
            let expanded = expand_tilde(path);
            if expanded.exists() {
                info!(path = %expanded.display(), "loading config file");
                let content = std::fs::read_to_string(&expanded)?;
                toml::from_str::<ConfigFile>(&content)
                    .map_err(|e| PorterError::Config(format!("config parse error: {e}")))?
            } else {
                info!(path = %expanded.display(), "config file not found, using defaults");
                ConfigFile::default()
            }
        } else {
            ConfigFile::default()
        };

        let env_token = std::env::var(ENV_API_TOKEN).ok();
        let env_keys = std::env::var(ENV_USER_KEYS).ok();
        Self::resolve(file_config, cli_port, env_token, env_keys)
    }

    /// Merge file values, CLI overrides, and environment secrets.
    fn resolve(
        file: ConfigFile,
        cli_port: Option<u16>,
        env_token: Option<String>,
        env_keys: Option<String>,
    ) -> PorterResult<Self> {
        let api_token = env_token
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(file.notify.api_token);

        let user_keys = match env_keys.filter(|k| !k.trim().is_empty()) {
            Some(keys) => keys
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
            None => file.notify.user_keys,
        };

        if api_token.trim().is_empty() {
            return Err(PorterError::Config(format!(
                "no provider API token configured (set {ENV_API_TOKEN} or [notify] api_token)"
            )));
        }
        if user_keys.is_empty() {
            return Err(PorterError::Config(format!(
                "no recipient keys configured (set {ENV_USER_KEYS} or [notify] user_keys)"
            )));
        }

        Ok(Self {
            port: cli_port.unwrap_or(file.server.port),
            bind: file.server.bind,
            provider_url: file.notify.provider_url,
            timeout_secs: file.notify.timeout_secs,
            api_token,
            user_keys,
        })
    }
}

/// Expand `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(s.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with_secrets() -> ConfigFile {
        toml::from_str(
            r#"
            [server]
            port = 9000

            [notify]
            api_token = "file-token"
            user_keys = ["u1", "u2"]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            RelayConfig::resolve(file_with_secrets(), None, None, None).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.provider_url, "https://api.pushover.net/1/messages.json");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_cli_port_overrides_file() {
        let config =
            RelayConfig::resolve(file_with_secrets(), Some(4000), None, None).unwrap();
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_env_secrets_override_file() {
        let config = RelayConfig::resolve(
            file_with_secrets(),
            None,
            Some("env-token".to_string()),
            Some("a, b ,c".to_string()),
        )
        .unwrap();
        assert_eq!(config.api_token, "env-token");
        assert_eq!(config.user_keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_token_is_a_startup_error() {
        let err = RelayConfig::resolve(ConfigFile::default(), None, None, None).unwrap_err();
        assert!(err.to_string().contains("API token"));
    }

    #[test]
    fn test_missing_recipients_is_a_startup_error() {
        let err = RelayConfig::resolve(
            ConfigFile::default(),
            None,
            Some("token".to_string()),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("recipient"));
    }

    #[test]
    fn test_empty_file_port_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(file.server.port, 8787);
        assert!(file.notify.user_keys.is_empty());
    }
}
