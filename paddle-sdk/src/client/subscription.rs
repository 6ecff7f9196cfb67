//! Subscription API (`subscription/*` and checkout `prices`).

use reqwest::Method;

use super::{ClientError, PaddleClient, parse_response};
use crate::objects::subscription::{
    SubscriptionPrices, SubscriptionPricesOptions, SubscriptionUpdate, SubscriptionUpdateOptions,
    SubscriptionUser, SubscriptionUsersOptions,
};

/// Subscription endpoints, obtained from [`PaddleClient::subscription`].
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionApi<'a> {
    client: &'a PaddleClient,
}

impl<'a> SubscriptionApi<'a> {
    pub(super) fn new(client: &'a PaddleClient) -> Self {
        Self { client }
    }

    /// `GET prices` on the checkout API – localized prices for products.
    pub async fn prices(
        &self,
        options: &SubscriptionPricesOptions,
    ) -> Result<SubscriptionPrices, ClientError> {
        let resp = self
            .client
            .checkout_request(Method::GET, "prices")?
            .query(options)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET subscription/users` – list subscribers, optionally filtered.
    pub async fn users(
        &self,
        options: &SubscriptionUsersOptions,
    ) -> Result<Vec<SubscriptionUser>, ClientError> {
        let resp = self
            .client
            .vendor_request(Method::GET, "subscription/users")?
            .query(options)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET subscription/users/update` – change quantity, plan or price of
    /// a subscription.
    pub async fn update(
        &self,
        options: &SubscriptionUpdateOptions,
    ) -> Result<SubscriptionUpdate, ClientError> {
        let resp = self
            .client
            .vendor_request(Method::GET, "subscription/users/update")?
            .query(options)
            .send()
            .await?;

        parse_response(resp).await
    }
}
