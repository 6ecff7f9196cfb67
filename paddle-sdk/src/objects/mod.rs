//! Request and response objects of the Paddle Classic API, and the webhook
//! event records.

pub mod product;
pub mod subscription;
pub mod webhook;

pub use product::{GeneratePayLinkOptions, PayLink};
pub use subscription::{
    Payment, Price, PricedProduct, PricedSubscription, SubscriptionPrices,
    SubscriptionPricesOptions, SubscriptionUpdate, SubscriptionUpdateOptions, SubscriptionUser,
    SubscriptionUsersOptions,
};
pub use webhook::{
    AlertName, FulfillmentWebhook, SubscriptionCancelled, SubscriptionCreated,
    SubscriptionPaymentFailed, SubscriptionPaymentSucceeded, SubscriptionUpdated, WebhookEvent,
};

use serde::{Deserialize, Serialize};

/// Error body of a failed API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub message: String,
}

/// The `{"success": ..., "response" | "error": ...}` wrapper around every
/// API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub response: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}
