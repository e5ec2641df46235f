//! Analytics API endpoint resolution.
//!
//! The base URL is either taken from explicit configuration or derived from
//! the page the visitor is on: `{protocol}//{hostname}:{port}{prefix}`.

pub const DEFAULT_API_PORT: u16 = 1111;
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// The ambient location an endpoint can be derived from when no explicit API
/// URL is configured. `protocol` keeps its trailing colon (`"http:"`), the
/// same shape a browser location reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub protocol: String,
    pub hostname: String,
}

impl PageLocation {
    /// Fallback location for non-browser embedders (CLI, tests).
    pub fn localhost() -> Self {
        Self {
            protocol: "http:".to_string(),
            hostname: "localhost".to_string(),
        }
    }
}

/// A resolved analytics API base plus the paths the client calls on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: String,
}

impl ApiEndpoint {
    /// Resolve the API base URL.
    ///
    /// An explicit `api_url` wins (one trailing slash stripped, prefix
    /// appended); otherwise the base is derived from `location` with the
    /// given port. The prefix gains a leading slash if it is missing one.
    pub fn resolve(api_url: Option<&str>, port: u16, prefix: &str, location: &PageLocation) -> Self {
        let prefix = normalize_prefix(prefix);
        let base = match api_url {
            Some(url) if !url.trim().is_empty() => {
                let url = url.strip_suffix('/').unwrap_or(url);
                format!("{url}{prefix}")
            }
            _ => format!(
                "{}//{}:{}{}",
                location.protocol, location.hostname, port, prefix
            ),
        };
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn block_check_url(&self) -> String {
        format!("{}/analytics/block/check", self.base)
    }

    pub fn track_url(&self) -> String {
        format!("{}/analytics/track", self.base)
    }

    pub fn event_url(&self) -> String {
        format!("{}/analytics/event", self.base)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    if prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{prefix}")
    }
}
