//! Paddle Classic SDK.
//!
//! Verifies and decodes the form-encoded webhooks Paddle Classic sends to a
//! vendor, and (with the `client` feature) calls the vendor and checkout
//! APIs.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![forbid(unsafe_code)]

pub mod canonical;
#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod decode;
pub mod fields;
pub mod key;
pub mod objects;
pub mod signature;
pub mod webhook;

#[cfg(test)]
mod test_support;

pub use config::VendorConfig;
pub use decode::{DecodeError, WebhookOutcome};
pub use fields::{FieldSet, InvalidFormEncoding};
pub use key::{KeyError, WebhookPublicKey};
pub use objects::webhook::{AlertName, FulfillmentWebhook, WebhookEvent};
pub use signature::{AuthError, SignatureEncodingError};
pub use webhook::{
    WebhookError, authenticate, verify_fields, verify_fulfillment_fields,
    verify_fulfillment_webhook, verify_webhook,
};

#[cfg(feature = "client")]
pub use client::{ClientError, PaddleClient};
