//! Client for the inquiry relay: posts contact-form submissions.

use porter_core::{InquiryForm, InquiryResponse, PorterError, PorterResult};
use std::time::Duration;
use tracing::debug;

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts inquiries to `{relay_url}/inquiry`.
pub struct RelayClient {
    url: String,
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        let url = relay_url.strip_suffix('/').unwrap_or(relay_url);
        Self {
            url: url.to_string(),
            client: reqwest::Client::builder()
                .timeout(SUBMIT_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Submit one inquiry.
    ///
    /// A non-2xx status is a transport-level failure ([`PorterError::Status`]);
    /// validation failures arrive as a 2xx [`InquiryResponse`] with
    /// `success: false`. The caller keeps the form contents on any failure so
    /// the visitor can retry.
    pub async fn post_inquiry(&self, form: &InquiryForm) -> PorterResult<InquiryResponse> {
        let url = format!("{}/inquiry", self.url);
        debug!(url = %url, "submitting inquiry");

        let response = self
            .client
            .post(&url)
            .json(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PorterError::Timeout
                } else {
                    PorterError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(PorterError::Status(response.status().as_u16()));
        }

        response
            .json::<InquiryResponse>()
            .await
            .map_err(|e| PorterError::Decode(e.to_string()))
    }
}
