//! Fire-and-forget analytics tracking.
//!
//! An `AnalyticsClient` is constructed explicitly and passed where needed —
//! there is no process-wide singleton. Tracking failures are logged and
//! swallowed; telemetry must never affect the visitor.

use porter_core::ApiEndpoint;
use rand::Rng;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Requests that take longer than this are abandoned silently.
const TRACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Duplicate page views for the same path inside this window are dropped.
const PAGE_DEDUP_WINDOW: Duration = Duration::from_secs(1);

/// Telemetry client for the analytics service.
pub struct AnalyticsClient {
    endpoint: ApiEndpoint,
    client: reqwest::Client,
    session_id: String,
    enabled: bool,
    recent_pages: Mutex<HashMap<String, Instant>>,
}

impl AnalyticsClient {
    pub fn new(endpoint: ApiEndpoint) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::builder()
                .timeout(TRACK_TIMEOUT)
                .build()
                .unwrap_or_default(),
            session_id: new_session_id(),
            enabled: true,
            recent_pages: Mutex::new(HashMap::new()),
        }
    }

    /// A client with tracking switched off: every call is a silent no-op.
    pub fn disabled(endpoint: ApiEndpoint) -> Self {
        Self {
            enabled: false,
            ..Self::new(endpoint)
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a page view. Repeat views of the same path within one second
    /// are suppressed.
    pub async fn track_page_view(&self, page_path: &str, page_title: &str) {
        if !self.enabled {
            return;
        }
        if !self.should_record_page(page_path, Instant::now()) {
            debug!(path = %page_path, "page view deduplicated");
            return;
        }
        let body = json!({
            "page_path": page_path,
            "page_title": page_title,
            "session_id": self.session_id,
        });
        self.post(self.endpoint.track_url(), body).await;
    }

    /// Record a custom event.
    pub async fn track_event(&self, event_name: &str, event_data: Value, page_path: &str) {
        if !self.enabled {
            return;
        }
        let body = json!({
            "event_name": event_name,
            "event_data": event_data,
            "session_id": self.session_id,
            "page_path": page_path,
        });
        self.post(self.endpoint.event_url(), body).await;
    }

    /// Record a contact-form submission.
    pub async fn track_form_submission(&self, form_name: &str, page_path: &str) {
        self.track_event("form_submission", json!({ "form_name": form_name }), page_path)
            .await;
    }

    fn should_record_page(&self, page_path: &str, now: Instant) -> bool {
        let mut recent = self.recent_pages.lock().unwrap_or_else(|e| e.into_inner());
        match recent.get(page_path) {
            Some(last) if now.duration_since(*last) < PAGE_DEDUP_WINDOW => false,
            _ => {
                recent.insert(page_path.to_string(), now);
                true
            }
        }
    }

    async fn post(&self, url: String, body: Value) {
        match self.client.post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(url = %url, "tracked");
            }
            Ok(response) => {
                warn!(url = %url, status = %response.status(), "analytics request rejected");
            }
            Err(e) => {
                warn!(url = %url, error = %e, "analytics request failed");
            }
        }
    }
}

/// Random v4-style session identifier.
fn new_session_id() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        rng.gen::<u32>(),
        rng.gen::<u16>(),
        rng.gen::<u16>() & 0x0fff,
        (rng.gen::<u16>() & 0x3fff) | 0x8000,
        rng.gen::<u64>() & 0xffff_ffff_ffff,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use porter_core::{PageLocation, DEFAULT_API_PORT, DEFAULT_API_PREFIX};

    fn endpoint() -> ApiEndpoint {
        ApiEndpoint::resolve(
            Some("http://api.test"),
            DEFAULT_API_PORT,
            DEFAULT_API_PREFIX,
            &PageLocation::localhost(),
        )
    }

    #[test]
    fn test_session_id_shape() {
        let id = new_session_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
        assert_eq!(id.as_bytes()[14], b'4');
    }

    #[test]
    fn test_session_ids_differ_per_client() {
        let a = AnalyticsClient::new(endpoint());
        let b = AnalyticsClient::new(endpoint());
        assert_ne!(a.session_id(), b.session_id());
    }

    #[test]
    fn test_page_views_deduplicated_inside_window() {
        let client = AnalyticsClient::new(endpoint());
        let now = Instant::now();
        assert!(client.should_record_page("/", now));
        assert!(!client.should_record_page("/", now + Duration::from_millis(500)));
        assert!(client.should_record_page("/pricing", now));
        assert!(client.should_record_page("/", now + Duration::from_millis(1500)));
    }

    #[test]
    fn test_disabled_client_reports_disabled() {
        let client = AnalyticsClient::disabled(endpoint());
        assert!(!client.is_enabled());
    }
}
