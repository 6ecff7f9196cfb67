use serde::{Deserialize, Serialize};

/// Query parameters for `product/generate_pay_link`.
///
/// `prices` and `recurring_prices` take `"{CURRENCY}:{amount}"` entries and
/// are sent as indexed parameters (`prices[0]`, `prices[1]`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePayLinkOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip)]
    pub prices: Vec<String>,
    #[serde(skip)]
    pub recurring_prices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_variable: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_affiliate_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_consent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passthrough: Option<String>,
}

impl GeneratePayLinkOptions {
    /// The list-valued parameters as indexed query pairs.
    pub fn price_pairs(&self) -> Vec<(String, String)> {
        indexed("prices", &self.prices)
            .chain(indexed("recurring_prices", &self.recurring_prices))
            .collect()
    }
}

fn indexed<'a>(name: &'a str, values: &'a [String]) -> impl Iterator<Item = (String, String)> + 'a {
    values
        .iter()
        .enumerate()
        .map(move |(i, value)| (format!("{name}[{i}]"), value.clone()))
}

/// Response of `product/generate_pay_link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLink {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_pairs() {
        let options = GeneratePayLinkOptions {
            prices: vec!["USD:19.99".to_string(), "EUR:15.99".to_string()],
            recurring_prices: vec!["USD:9.99".to_string()],
            ..Default::default()
        };
        assert_eq!(
            options.price_pairs(),
            vec![
                ("prices[0]".to_string(), "USD:19.99".to_string()),
                ("prices[1]".to_string(), "EUR:15.99".to_string()),
                ("recurring_prices[0]".to_string(), "USD:9.99".to_string()),
            ]
        );
    }

    #[test]
    fn test_unset_options_are_omitted() {
        let options = GeneratePayLinkOptions {
            title: Some("Pro plan".to_string()),
            quantity: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Pro plan", "quantity": 2 }));
    }
}
