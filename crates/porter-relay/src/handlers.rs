//! Request handlers for the inquiry relay.
//!
//! Every outcome — malformed body, validation failure, delivery failure,
//! success — is expressed through the uniform `{success, data, detail}`
//! shape with HTTP 200. Clients branch on the `success` flag only.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use porter_core::{InquiryForm, InquiryResponse};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::notify::Notification;
use crate::server::AppState;

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}

/// `POST /inquiry` — validate a submission and forward it to the provider.
pub async fn submit_inquiry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InquiryForm>, JsonRejection>,
) -> Json<InquiryResponse> {
    let Json(form) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!(error = %rejection, "rejected inquiry body");
            return Json(InquiryResponse::failed(
                "Request body could not be read as an inquiry.",
            ));
        }
    };

    if let Err(errors) = form.validate() {
        debug!(fields = errors.len(), "inquiry failed validation");
        return Json(InquiryResponse::invalid(errors));
    }

    let note = Notification::from_inquiry(&form);
    match state.notifier.deliver(&note).await {
        Ok(()) => {
            info!("inquiry forwarded");
            Json(InquiryResponse::ok())
        }
        Err(e) => {
            error!(error = %e, "inquiry delivery failed");
            Json(InquiryResponse::failed(e.detail()))
        }
    }
}
