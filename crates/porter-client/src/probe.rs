//! Block-status probe: asks the analytics service whether this visitor's IP
//! is currently denied access.

use async_trait::async_trait;
use porter_core::{ApiEndpoint, BlockCheckResult};
use std::time::Duration;
use tracing::debug;

/// Hard timeout on every block check. A hung check counts as "not blocked".
pub const BLOCK_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Answers "is this visitor blocked right now?".
///
/// Implementations collapse every failure mode — timeout, connect error,
/// non-200, undecodable body — to `false`: an indeterminate check must never
/// lock out a legitimate visitor (fail-open).
#[async_trait]
pub trait BlockProbe: Send + Sync {
    async fn check(&self) -> bool;
}

/// HTTP probe against `{base}/analytics/block/check`.
pub struct HttpBlockProbe {
    url: String,
    client: reqwest::Client,
}

impl HttpBlockProbe {
    pub fn new(endpoint: &ApiEndpoint) -> Self {
        Self {
            url: endpoint.block_check_url(),
            client: reqwest::Client::builder()
                .timeout(BLOCK_CHECK_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl BlockProbe for HttpBlockProbe {
    async fn check(&self) -> bool {
        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "block check failed, assuming not blocked");
                return false;
            }
        };

        if !response.status().is_success() {
            debug!(status = %response.status(), "block check non-200, assuming not blocked");
            return false;
        }

        match response.json::<BlockCheckResult>().await {
            Ok(result) => result.is_blocked,
            Err(e) => {
                debug!(error = %e, "block check body undecodable, assuming not blocked");
                false
            }
        }
    }
}
