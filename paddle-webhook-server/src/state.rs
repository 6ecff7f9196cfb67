//! Application state shared across all request handlers.

use paddle_sdk::WebhookPublicKey;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// Cloneable and cheap to pass around (everything is behind Arc).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Paddle's webhook signing key, loaded once at startup.
    pub public_key: Arc<WebhookPublicKey>,
    /// Vendor the webhooks are expected for. Only used in logs.
    pub vendor_id: u64,
}

impl AppState {
    pub fn new(public_key: WebhookPublicKey, vendor_id: u64) -> Self {
        Self {
            public_key: Arc::new(public_key),
            vendor_id,
        }
    }
}
