//! Webhook event records.
//!
//! Every field arrives as a form string, so every field here is a `String`
//! unless the record documents otherwise. Missing fields decode to `""`.
//! Field lists follow the Paddle Classic subscription event reference.

use serde::{Deserialize, Deserializer, Serialize};
use time::Date;
use time::macros::format_description;

/// Discriminator values carried in the `alert_name` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertName {
    SubscriptionCreated,
    SubscriptionCancelled,
    SubscriptionPaymentSucceeded,
    SubscriptionUpdated,
    SubscriptionPaymentFailed,
}

impl AlertName {
    pub const ALL: [AlertName; 5] = [
        AlertName::SubscriptionCreated,
        AlertName::SubscriptionCancelled,
        AlertName::SubscriptionPaymentSucceeded,
        AlertName::SubscriptionUpdated,
        AlertName::SubscriptionPaymentFailed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertName::SubscriptionCreated => "subscription_created",
            AlertName::SubscriptionCancelled => "subscription_cancelled",
            AlertName::SubscriptionPaymentSucceeded => "subscription_payment_succeeded",
            AlertName::SubscriptionUpdated => "subscription_updated",
            AlertName::SubscriptionPaymentFailed => "subscription_payment_failed",
        }
    }

    /// Exact, case-sensitive lookup. `None` for event types this crate does
    /// not model.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alert| alert.as_str() == name)
    }
}

impl std::fmt::Display for AlertName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified, decoded subscription webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    SubscriptionCreated(SubscriptionCreated),
    SubscriptionCancelled(SubscriptionCancelled),
    SubscriptionPaymentSucceeded(SubscriptionPaymentSucceeded),
    SubscriptionUpdated(SubscriptionUpdated),
    SubscriptionPaymentFailed(SubscriptionPaymentFailed),
}

impl WebhookEvent {
    pub fn alert_name(&self) -> AlertName {
        match self {
            WebhookEvent::SubscriptionCreated(_) => AlertName::SubscriptionCreated,
            WebhookEvent::SubscriptionCancelled(_) => AlertName::SubscriptionCancelled,
            WebhookEvent::SubscriptionPaymentSucceeded(_) => {
                AlertName::SubscriptionPaymentSucceeded
            }
            WebhookEvent::SubscriptionUpdated(_) => AlertName::SubscriptionUpdated,
            WebhookEvent::SubscriptionPaymentFailed(_) => AlertName::SubscriptionPaymentFailed,
        }
    }

    /// The subscription the event refers to.
    pub fn subscription_id(&self) -> &str {
        match self {
            WebhookEvent::SubscriptionCreated(e) => &e.subscription_id,
            WebhookEvent::SubscriptionCancelled(e) => &e.subscription_id,
            WebhookEvent::SubscriptionPaymentSucceeded(e) => &e.subscription_id,
            WebhookEvent::SubscriptionUpdated(e) => &e.subscription_id,
            WebhookEvent::SubscriptionPaymentFailed(e) => &e.subscription_id,
        }
    }

    /// Paddle's unique id for this delivery, empty for event shapes that do
    /// not carry one.
    pub fn alert_id(&self) -> &str {
        match self {
            WebhookEvent::SubscriptionCreated(e) => &e.alert_id,
            WebhookEvent::SubscriptionCancelled(e) => &e.alert_id,
            WebhookEvent::SubscriptionPaymentSucceeded(e) => &e.alert_id,
            WebhookEvent::SubscriptionUpdated(e) => &e.alert_id,
            WebhookEvent::SubscriptionPaymentFailed(e) => &e.alert_id,
        }
    }
}

/// `subscription_created`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionCreated {
    pub alert_id: String,
    pub subscription_id: String,
    pub status: String,
    pub email: String,
    pub marketing_consent: String,
    pub subscription_plan_id: String,
    pub next_bill_date: String,
    pub passthrough: String,
    pub update_url: String,
    pub user_id: String,
    pub cancel_url: String,
    pub currency: String,
    pub checkout_id: String,
    pub quantity: String,
    pub unit_price: String,
    pub event_time: String,
}

impl SubscriptionCreated {
    pub fn next_bill_date(&self) -> Option<Date> {
        parse_date(&self.next_bill_date)
    }
}

/// `subscription_cancelled`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionCancelled {
    pub alert_id: String,
    pub subscription_id: String,
    pub status: String,
    pub email: String,
    pub marketing_consent: String,
    pub subscription_plan_id: String,
    pub cancellation_effective_date: String,
    pub passthrough: String,
    pub user_id: String,
    pub checkout_id: String,
    pub quantity: String,
    pub unit_price: String,
    pub event_time: String,
    pub currency: String,
}

impl SubscriptionCancelled {
    /// The day the subscription stops, `None` when absent or malformed.
    pub fn cancellation_effective_date(&self) -> Option<Date> {
        parse_date(&self.cancellation_effective_date)
    }
}

/// `subscription_payment_succeeded`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionPaymentSucceeded {
    pub alert_id: String,
    pub checkout_id: String,
    pub currency: String,
    pub email: String,
    pub event_time: String,
    pub marketing_consent: String,
    pub next_bill_date: String,
    pub passthrough: String,
    pub quantity: String,
    pub status: String,
    pub subscription_id: String,
    pub subscription_plan_id: String,
    pub unit_price: String,
    pub user_id: String,
}

impl SubscriptionPaymentSucceeded {
    pub fn next_bill_date(&self) -> Option<Date> {
        parse_date(&self.next_bill_date)
    }
}

/// `subscription_updated`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionUpdated {
    pub alert_id: String,
    pub alert_name: String,
    pub cancel_url: String,
    pub checkout_id: String,
    pub currency: String,
    pub custom_data: String,
    pub event_time: String,
    pub marketing_consent: String,
    pub new_price: String,
    pub new_quantity: String,
    pub new_unit_price: String,
    pub next_bill_date: String,
    pub old_next_bill_date: String,
    pub old_price: String,
    pub old_quantity: String,
    pub old_status: String,
    pub old_subscription_plan_id: String,
    pub old_unit_price: String,
    pub status: String,
    pub subscription_id: String,
    pub subscription_plan_id: String,
    pub update_url: String,
    pub user_id: String,
    pub paused_at: String,
    pub paused_from: String,
    pub paused_reason: String,
}

/// `subscription_payment_failed`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionPaymentFailed {
    pub alert_id: String,
    pub alert_name: String,
    pub amount: String,
    pub attempt_number: String,
    pub cancel_url: String,
    pub checkout_id: String,
    pub currency: String,
    pub custom_data: String,
    pub email: String,
    pub event_time: String,
    pub instalments: String,
    pub marketing_consent: String,
    pub next_retry_date: String,
    pub order_id: String,
    pub user_id: String,
    pub quantity: String,
    pub status: String,
    pub subscription_id: String,
    pub subscription_payment_id: String,
    pub subscription_plan_id: String,
    pub unit_price: String,
    pub update_url: String,
}

impl SubscriptionPaymentFailed {
    pub fn next_retry_date(&self) -> Option<Date> {
        parse_date(&self.next_retry_date)
    }
}

/// Product fulfillment webhook.
///
/// Sent to the product's fulfillment URL without an `alert_name`, so it has
/// its own entry point. `quantity` is parsed; everything else stays textual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FulfillmentWebhook {
    pub event_time: String,
    #[serde(deserialize_with = "quantity_from_str")]
    pub quantity: u32,
    pub passthrough: String,
    pub email: String,
    pub marketing_consent: String,
    pub p_order_id: String,
    pub p_product_id: String,
    pub p_country: String,
    pub p_currency: String,
    pub p_price: String,
    pub p_coupon: String,
}

fn quantity_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| serde::de::Error::custom(format!("quantity {raw:?} is not a whole number")))
}

fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_name_lookup() {
        for alert in AlertName::ALL {
            assert_eq!(AlertName::from_name(alert.as_str()), Some(alert));
            assert_eq!(alert.to_string(), alert.as_str());
        }
        assert_eq!(AlertName::from_name("Subscription_Created"), None);
        assert_eq!(AlertName::from_name("some_future_event"), None);
    }

    #[test]
    fn test_cancellation_effective_date() {
        let event = SubscriptionCancelled {
            cancellation_effective_date: "2021-05-12".to_string(),
            ..Default::default()
        };
        let date = event.cancellation_effective_date().unwrap();
        assert_eq!(date.year(), 2021);
        assert_eq!(date.month(), time::Month::May);
        assert_eq!(date.day(), 12);
    }

    #[test]
    fn test_malformed_dates_are_none() {
        let mut event = SubscriptionCancelled::default();
        assert_eq!(event.cancellation_effective_date(), None);
        event.cancellation_effective_date = "12/05/2021".to_string();
        assert_eq!(event.cancellation_effective_date(), None);
    }

    #[test]
    fn test_event_accessors() {
        let event = WebhookEvent::SubscriptionPaymentFailed(SubscriptionPaymentFailed {
            alert_id: "77".to_string(),
            subscription_id: "42".to_string(),
            ..Default::default()
        });
        assert_eq!(event.alert_name(), AlertName::SubscriptionPaymentFailed);
        assert_eq!(event.subscription_id(), "42");
        assert_eq!(event.alert_id(), "77");
    }
}
