//! porter — site gate CLI.
//!
//! One-shot block checks, a live gate watch loop, and test inquiry
//! submissions against a running relay.

mod commands;
mod config;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use config::Config;
use porter_core::{InquiryForm, PageLocation};
use std::path::PathBuf;
use tracing::error;

/// porter — site gate CLI
#[derive(Parser)]
#[command(name = "porter", version, about = "Site gate CLI — block checks and inquiry submissions")]
struct Cli {
    /// Analytics API base URL (overrides config/env)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Inquiry relay base URL (overrides config/env)
    #[arg(long, global = true)]
    relay_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check block status once (exit code 2 when blocked)
    Check,

    /// Watch block status, printing every redirect the gate would apply
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },

    /// Submit a test inquiry through the relay
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    use tracing_subscriber::EnvFilter;
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("porter: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let config_path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;
    let gate = config.gate_config(cli.api_url.as_deref(), cli.relay_url.as_deref());
    let endpoint = gate.endpoint(&PageLocation::localhost());

    match cli.command {
        Command::Check => commands::check::run(&endpoint).await,
        Command::Watch { interval } => {
            commands::watch::run(&endpoint, interval).await?;
            Ok(0)
        }
        Command::Send {
            name,
            email,
            phone,
            message,
        } => {
            if gate.relay_url.trim().is_empty() {
                bail!("no relay URL configured (use --relay-url, PORTER_RELAY_URL, or [relay] url)");
            }
            let form = InquiryForm {
                name,
                email,
                phone,
                message,
            };
            commands::send::run(&gate.relay_url, form).await
        }
    }
}
