//! Paddle webhook receiver.
//!
//! Paddle posts `application/x-www-form-urlencoded` bodies signed with the
//! vendor's webhook key. Every request runs the full verification pipeline
//! before anything is logged about it.
//!
//! # Endpoints
//!
//! - `POST /webhooks/paddle`             – subscription alerts
//! - `POST /webhooks/paddle/fulfillment` – one-off product fulfillment
//!
//! # Status codes
//!
//! - `200` – authentic; accepted or ignored (unrecognized `alert_name`)
//! - `400` – non-UTF-8 body, missing or undecodable `p_signature`
//! - `401` – signature verification failed
//! - `422` – authentic payload with a malformed typed field

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use bytes::Bytes;
use paddle_sdk::{WebhookError, WebhookEvent, WebhookOutcome};
use serde::Serialize;

use crate::state::AppState;

/// Build the webhook router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/webhooks/paddle", post(subscription_webhook))
        .route("/webhooks/paddle/fulfillment", post(fulfillment_webhook))
}

/// Body of a `200` answer. Carries the event kind only.
#[derive(Debug, Serialize)]
struct WebhookAck {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert_name: Option<String>,
}

/// `POST /webhooks/paddle`: verify and decode a subscription alert.
async fn subscription_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookAck>, WebhookRejection> {
    let outcome = paddle_sdk::verify_webhook(&body, &state.public_key).map_err(|e| {
        tracing::warn!(vendor_id = state.vendor_id, error = %e, "Rejected webhook");
        WebhookRejection(e)
    })?;

    let ack = match outcome {
        WebhookOutcome::Event(event) => {
            log_event(&event);
            WebhookAck {
                status: "accepted",
                alert_name: Some(event.alert_name().to_string()),
            }
        }
        WebhookOutcome::Unrecognized { alert_name } => {
            tracing::info!(alert_name = ?alert_name, "Ignoring unrecognized webhook");
            WebhookAck {
                status: "ignored",
                alert_name,
            }
        }
    };
    Ok(Json(ack))
}

/// `POST /webhooks/paddle/fulfillment`: verify and decode a fulfillment
/// webhook.
async fn fulfillment_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookAck>, WebhookRejection> {
    let webhook = paddle_sdk::verify_fulfillment_webhook(&body, &state.public_key).map_err(|e| {
        tracing::warn!(vendor_id = state.vendor_id, error = %e, "Rejected fulfillment webhook");
        WebhookRejection(e)
    })?;

    tracing::info!(
        order_id = %webhook.p_order_id,
        product_id = %webhook.p_product_id,
        quantity = webhook.quantity,
        "Fulfillment webhook accepted"
    );
    Ok(Json(WebhookAck {
        status: "accepted",
        alert_name: None,
    }))
}

/// Identifiers only; customer data stays out of the logs.
fn log_event(event: &WebhookEvent) {
    tracing::info!(
        alert_name = %event.alert_name(),
        alert_id = %event.alert_id(),
        subscription_id = %event.subscription_id(),
        "Webhook accepted"
    );
}

/// A failed webhook pipeline, answered without echoing the payload.
#[derive(Debug)]
pub struct WebhookRejection(pub WebhookError);

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            WebhookError::InvalidFormEncoding(_) => {
                (StatusCode::BAD_REQUEST, "form body is not valid UTF-8")
            }
            WebhookError::MissingSignature => (StatusCode::BAD_REQUEST, "missing p_signature"),
            WebhookError::InvalidSignatureEncoding(_) => {
                (StatusCode::BAD_REQUEST, "invalid p_signature encoding")
            }
            WebhookError::Authentication(_) => {
                (StatusCode::UNAUTHORIZED, "signature verification failed")
            }
            WebhookError::Decode(_) => (StatusCode::UNPROCESSABLE_ENTITY, "malformed webhook field"),
        };
        (status, message).into_response()
    }
}
