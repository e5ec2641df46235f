//! Notification delivery: forwards validated inquiries to a push provider.

use async_trait::async_trait;
use porter_core::InquiryForm;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// A single push notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// Render a contact-form submission as one notification.
    pub fn from_inquiry(form: &InquiryForm) -> Self {
        Self {
            title: "New website inquiry".to_string(),
            body: format!(
                "Name: {}\nEmail: {}\nPhone: {}\n\n{}",
                form.name.trim(),
                form.email.trim(),
                form.phone.trim(),
                form.message.trim()
            ),
        }
    }
}

/// Delivery failures. The provider's response body never leaves the server;
/// only an opaque status code may reach the client.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("provider returned status {0}")]
    Provider(u16),

    #[error("provider request failed: {0}")]
    Transport(String),
}

impl NotifyError {
    /// Client-facing summary.
    pub fn detail(&self) -> String {
        match self {
            NotifyError::Provider(status) => {
                format!("Unable to send message (provider status {status}).")
            }
            NotifyError::Transport(_) => "Unable to send message.".to_string(),
        }
    }
}

/// Delivers notifications to the configured provider.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, note: &Notification) -> Result<(), NotifyError>;
}

/// Pushover-style provider: form-encoded POST of token, recipient key,
/// title, and message. Multiple recipients fan out as one call per key.
pub struct PushoverNotifier {
    endpoint: String,
    api_token: String,
    user_keys: Vec<String>,
    client: reqwest::Client,
}

impl PushoverNotifier {
    pub fn new(
        endpoint: impl Into<String>,
        api_token: impl Into<String>,
        user_keys: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            user_keys,
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn deliver(&self, note: &Notification) -> Result<(), NotifyError> {
        for key in &self.user_keys {
            let params = [
                ("token", self.api_token.as_str()),
                ("user", key.as_str()),
                ("title", note.title.as_str()),
                ("message", note.body.as_str()),
            ];
            let response = self
                .client
                .post(&self.endpoint)
                .form(&params)
                .send()
                .await
                .map_err(|e| {
                    warn!(error = %e, "provider request failed");
                    NotifyError::Transport(e.to_string())
                })?;

            if !response.status().is_success() {
                warn!(status = %response.status(), "provider rejected notification");
                return Err(NotifyError::Provider(response.status().as_u16()));
            }
        }
        info!(recipients = self.user_keys.len(), "notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_embeds_all_fields() {
        let form = InquiryForm {
            name: " Jo ".to_string(),
            email: "jo@example.com".to_string(),
            phone: "555-1234".to_string(),
            message: "Build my site.".to_string(),
        };
        let note = Notification::from_inquiry(&form);
        assert_eq!(note.title, "New website inquiry");
        assert_eq!(
            note.body,
            "Name: Jo\nEmail: jo@example.com\nPhone: 555-1234\n\nBuild my site."
        );
    }

    #[test]
    fn test_detail_exposes_status_but_not_transport_cause() {
        assert_eq!(
            NotifyError::Provider(500).detail(),
            "Unable to send message (provider status 500)."
        );
        let transport = NotifyError::Transport("dns error: secret.internal".to_string());
        assert_eq!(transport.detail(), "Unable to send message.");
    }
}
