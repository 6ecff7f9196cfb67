//! Subscription API objects: prices, users and plan updates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A gross/net/tax price triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub gross: Decimal,
    pub net: Decimal,
    pub tax: Decimal,
}

/// Recurring part of a priced product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedSubscription {
    pub frequency: u32,
    pub interval: String,
    pub list_price: Price,
    pub price: Price,
    #[serde(default)]
    pub trial_days: u32,
}

/// One product in a [`SubscriptionPrices`] response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedProduct {
    pub product_id: u64,
    pub product_title: String,
    pub currency: String,
    pub list_price: Price,
    pub price: Price,
    #[serde(default)]
    pub subscription: Option<PricedSubscription>,
    #[serde(default)]
    pub vendor_set_prices_included_tax: bool,
}

/// Response of the checkout API `prices` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPrices {
    pub customer_country: String,
    pub products: Vec<PricedProduct>,
}

/// Query parameters for the `prices` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPricesOptions {
    /// Comma separated product ids.
    pub product_ids: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupons: Option<String>,
}

/// A past or scheduled subscription payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: Decimal,
    pub currency: String,
    pub date: String,
}

/// One entry of `subscription/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionUser {
    pub subscription_id: u64,
    pub plan_id: u64,
    pub user_id: u64,
    pub user_email: String,
    pub marketing_consent: bool,
    pub update_url: String,
    pub cancel_url: String,
    pub state: String,
    pub signup_date: String,
    #[serde(default)]
    pub last_payment: Option<Payment>,
    #[serde(default)]
    pub next_payment: Option<Payment>,
    #[serde(default)]
    pub paused_at: Option<String>,
    #[serde(default)]
    pub paused_from: Option<String>,
}

/// Query parameters for `subscription/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionUsersOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<u64>,
    /// `active`, `past_due`, `trialing`, `paused` or `deleted`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// At most 200.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Query parameters for `subscription/users/update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionUpdateOptions {
    pub subscription_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_immediately: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prorate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_modifiers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passthrough: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause: Option<bool>,
}

/// Response of `subscription/users/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionUpdate {
    pub subscription_id: u64,
    pub plan_id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub next_payment: Option<Payment>,
}
