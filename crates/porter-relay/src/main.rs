//! porter-relay: the inquiry relay.
//!
//! Accepts contact-form submissions over HTTP, validates them, and forwards
//! a push notification to the configured provider.

mod config;
mod handlers;
mod notify;
mod server;

use clap::Parser;
use config::RelayConfig;
use std::path::PathBuf;
use tracing::{error, info};

/// porter-relay — inquiry relay server
#[derive(Parser, Debug)]
#[command(name = "porter-relay", version, about = "Inquiry relay server")]
struct Cli {
    /// Listen port (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Config file path
    #[arg(long, default_value = "~/.porter/relay.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    use tracing_subscriber::EnvFilter;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "starting porter-relay");

    let config_path = PathBuf::from(&cli.config);
    let relay_config = match RelayConfig::load(Some(&config_path), cli.port) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "failed to load config");
            std::process::exit(1);
        }
    };

    // Run until shutdown signal
    tokio::select! {
        result = server::run(relay_config) => {
            if let Err(e) = result {
                error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
        _ = shutdown_signal() => {
            info!("received shutdown signal");
        }
    }

    info!("porter-relay stopped");
}

/// Wait for SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
}
