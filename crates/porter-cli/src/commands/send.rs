//! `porter send` — submit a test inquiry through the relay.
//!
//! Renders the relay's per-field errors and detail the same way the site
//! does, including the generic retry message on transport failures.

use anyhow::Result;
use porter_client::RelayClient;
use porter_core::{InquiryForm, PorterError};
use tracing::debug;

/// Submit one inquiry. Exit code 0 = accepted, 1 = rejected or undeliverable.
pub async fn run(relay_url: &str, form: InquiryForm) -> Result<i32> {
    let client = RelayClient::new(relay_url);
    match client.post_inquiry(&form).await {
        Ok(resp) if resp.success => {
            println!("inquiry sent");
            Ok(0)
        }
        Ok(resp) => {
            if let Some(data) = &resp.data {
                for (field, message) in data {
                    println!("{field}: {message}");
                }
            }
            if let Some(detail) = &resp.detail {
                println!("{detail}");
            }
            Ok(1)
        }
        Err(PorterError::Status(status)) => {
            println!("Unable to send message (Error {status}). Please try again.");
            Ok(1)
        }
        Err(e) => {
            debug!(error = %e, "inquiry submission failed");
            println!("Unable to send message. Please try again.");
            Ok(1)
        }
    }
}
