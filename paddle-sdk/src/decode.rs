//! Mapping verified field sets onto event records.

use serde::de::DeserializeOwned;
use serde::de::value::{Error as ValueError, MapDeserializer};

use crate::fields::FieldSet;
use crate::objects::webhook::{
    AlertName, FulfillmentWebhook, SubscriptionCancelled, SubscriptionCreated,
    SubscriptionPaymentFailed, SubscriptionPaymentSucceeded, SubscriptionUpdated, WebhookEvent,
};

/// Name used in [`DecodeError`] for the fulfillment webhook, which has no
/// `alert_name` of its own.
pub const FULFILLMENT: &str = "fulfillment";

/// Result of decoding a subscription webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The discriminator matched a known schema.
    Event(WebhookEvent),
    /// Authentic, but of a type this crate does not model. Not an error:
    /// Paddle may add event types at any time.
    Unrecognized { alert_name: Option<String> },
}

/// A typed field of a recognized event did not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to decode {alert_name} webhook: {message}")]
pub struct DecodeError {
    pub alert_name: &'static str,
    pub message: String,
}

/// Decode `fields` into the record selected by `alert_name`.
///
/// Keys are matched exactly. Keys the record does not declare are dropped,
/// and declared keys that are missing take their empty value.
pub fn decode(fields: &FieldSet, alert_name: Option<&str>) -> Result<WebhookOutcome, DecodeError> {
    let Some(alert) = alert_name.and_then(AlertName::from_name) else {
        return Ok(WebhookOutcome::Unrecognized {
            alert_name: alert_name.map(str::to_owned),
        });
    };

    let event = match alert {
        AlertName::SubscriptionCreated => {
            WebhookEvent::SubscriptionCreated(decode_record::<SubscriptionCreated>(fields, alert)?)
        }
        AlertName::SubscriptionCancelled => WebhookEvent::SubscriptionCancelled(
            decode_record::<SubscriptionCancelled>(fields, alert)?,
        ),
        AlertName::SubscriptionPaymentSucceeded => WebhookEvent::SubscriptionPaymentSucceeded(
            decode_record::<SubscriptionPaymentSucceeded>(fields, alert)?,
        ),
        AlertName::SubscriptionUpdated => {
            WebhookEvent::SubscriptionUpdated(decode_record::<SubscriptionUpdated>(fields, alert)?)
        }
        AlertName::SubscriptionPaymentFailed => WebhookEvent::SubscriptionPaymentFailed(
            decode_record::<SubscriptionPaymentFailed>(fields, alert)?,
        ),
    };
    Ok(WebhookOutcome::Event(event))
}

/// Decode the discriminator-less fulfillment webhook.
pub fn decode_fulfillment(fields: &FieldSet) -> Result<FulfillmentWebhook, DecodeError> {
    deserialize_fields(fields).map_err(|e| DecodeError {
        alert_name: FULFILLMENT,
        message: e.to_string(),
    })
}

fn decode_record<T: DeserializeOwned>(fields: &FieldSet, alert: AlertName) -> Result<T, DecodeError> {
    deserialize_fields(fields).map_err(|e| DecodeError {
        alert_name: alert.as_str(),
        message: e.to_string(),
    })
}

fn deserialize_fields<T: DeserializeOwned>(fields: &FieldSet) -> Result<T, ValueError> {
    let deserializer: MapDeserializer<'_, _, ValueError> = MapDeserializer::new(fields.iter());
    T::deserialize(deserializer)
}
