//! porter-client: client library for the porter site gate.
//!
//! Provides the access-gate monitor (block-status polling plus redirect
//! enforcement), the analytics tracker, and the relay client for submitting
//! contact-form inquiries.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use porter_client::{GateConfig, GateMonitor, GateOptions, HttpBlockProbe, Navigator};
//! use porter_core::PageLocation;
//!
//! struct LogNavigator;
//!
//! impl Navigator for LogNavigator {
//!     fn navigate(&self, route: &str) {
//!         println!("redirect -> {route}");
//!     }
//! }
//!
//! # async fn example() {
//! let config = GateConfig::from_env();
//! let endpoint = config.endpoint(&PageLocation::localhost());
//! let probe = Arc::new(HttpBlockProbe::new(&endpoint));
//! let handle = GateMonitor::new(probe, Arc::new(LogNavigator), GateOptions::default()).spawn();
//!
//! // ... report navigations via handle.navigated(route) ...
//! let final_state = handle.shutdown().await;
//! # let _ = final_state;
//! # }
//! ```

pub mod analytics;
pub mod config;
pub mod gate;
pub mod monitor;
pub mod probe;
pub mod relay;

// Re-export primary public types.
pub use analytics::AnalyticsClient;
pub use config::GateConfig;
pub use gate::{AccessGate, GateAction, GateEvent, GateState};
pub use monitor::{GateHandle, GateMonitor, GateOptions, Navigator, POLL_INTERVAL};
pub use probe::{BlockProbe, HttpBlockProbe, BLOCK_CHECK_TIMEOUT};
pub use relay::RelayClient;

// Re-export porter-core error types for convenience.
pub use porter_core::{PorterError, PorterResult};
