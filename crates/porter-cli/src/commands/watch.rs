//! `porter watch` — run the access gate against a printing navigator.
//!
//! Useful for watching a block take effect: every redirect the gate would
//! apply in the browser is printed instead.

use anyhow::Result;
use porter_client::{GateMonitor, GateOptions, HttpBlockProbe, Navigator};
use porter_core::ApiEndpoint;
use std::sync::Arc;
use std::time::Duration;

struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, route: &str) {
        println!("redirect -> {route}");
    }
}

/// Poll until Ctrl-C, printing every redirect the gate applies.
pub async fn run(endpoint: &ApiEndpoint, interval_secs: u64) -> Result<()> {
    let interval_secs = interval_secs.max(1);
    let options = GateOptions {
        poll_interval: Duration::from_secs(interval_secs),
        ..GateOptions::default()
    };
    let probe = Arc::new(HttpBlockProbe::new(endpoint));
    let handle = GateMonitor::new(probe, Arc::new(PrintNavigator), options).spawn();

    println!(
        "watching {} every {interval_secs}s (Ctrl-C to stop)",
        endpoint.block_check_url()
    );
    tokio::signal::ctrl_c().await?;

    let state = handle.shutdown().await;
    println!("final state: {state:?}");
    Ok(())
}
