//! `porter check` — one-shot block-status probe.

use anyhow::Result;
use porter_client::{BlockProbe, HttpBlockProbe};
use porter_core::ApiEndpoint;
use tracing::debug;

/// Run a single block check and report the outcome.
///
/// Exit code 0 = clear, 2 = blocked. A failed check reports clear, the same
/// fail-open reading the site applies.
pub async fn run(endpoint: &ApiEndpoint) -> Result<i32> {
    debug!(url = %endpoint.block_check_url(), "checking block status");

    let probe = HttpBlockProbe::new(endpoint);
    if probe.check().await {
        println!("blocked");
        Ok(2)
    } else {
        println!("clear");
        Ok(0)
    }
}
