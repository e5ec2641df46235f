//! Inquiry relay HTTP server: router assembly and the serve loop.

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use porter_core::{PorterError, PorterResult};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::RelayConfig;
use crate::handlers;
use crate::notify::{Notifier, PushoverNotifier};

/// Shared request state.
pub struct AppState {
    pub notifier: Arc<dyn Notifier>,
}

/// Assemble the relay router.
///
/// The CORS layer answers preflights and stamps every response, errors
/// included, with the site's headers.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::RANGE]);

    Router::new()
        .route("/inquiry", post(handlers::submit_inquiry))
        .route("/healthz", get(handlers::healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the listener fails or the task is cancelled.
pub async fn run(config: RelayConfig) -> PorterResult<()> {
    let notifier = Arc::new(PushoverNotifier::new(
        config.provider_url.clone(),
        config.api_token.clone(),
        config.user_keys.clone(),
        Duration::from_secs(config.timeout_secs),
    ));
    let state = Arc::new(AppState { notifier });
    let router = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .map_err(|e| PorterError::Config(format!("invalid bind address: {e}")))?;

    info!(addr = %addr, recipients = config.user_keys.len(), "inquiry relay listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Notification, NotifyError};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use porter_core::InquiryResponse;
    use tower::ServiceExt;

    struct OkNotifier;

    #[async_trait]
    impl Notifier for OkNotifier {
        async fn deliver(&self, _note: &Notification) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    fn router() -> Router {
        build_router(Arc::new(AppState {
            notifier: Arc::new(OkNotifier),
        }))
    }

    #[tokio::test]
    async fn test_preflight_carries_cors_headers() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/inquiry")
            .header(header::ORIGIN, "https://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert!(response.status().is_success());

        let headers = response.headers();
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(methods.contains("GET"));
        assert!(methods.contains("POST"));
        assert!(methods.contains("OPTIONS"));
        let allow_headers = headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        assert!(allow_headers.contains("content-type"));
        assert!(allow_headers.contains("range"));
    }

    #[tokio::test]
    async fn test_post_response_carries_cors_origin() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/inquiry")
            .header(header::ORIGIN, "https://example.com")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"name":"Jo","email":"jo@example.com","phone":"555-1234","message":"hi"}"#,
            ))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let resp: InquiryResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(resp.success);
    }

    #[tokio::test]
    async fn test_malformed_body_yields_uniform_failure() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/inquiry")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("this is not json"))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let resp: InquiryResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(!resp.success);
        assert!(resp.detail.is_some());
    }

    #[tokio::test]
    async fn test_healthz() {
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
