//! Product API (`product/*`).

use reqwest::Method;

use super::{ClientError, PaddleClient, parse_response};
use crate::objects::product::{GeneratePayLinkOptions, PayLink};

/// Product endpoints, obtained from [`PaddleClient::product`].
#[derive(Debug, Clone, Copy)]
pub struct ProductApi<'a> {
    client: &'a PaddleClient,
}

impl<'a> ProductApi<'a> {
    pub(super) fn new(client: &'a PaddleClient) -> Self {
        Self { client }
    }

    /// `POST product/generate_pay_link` for the configured product.
    ///
    /// `product_id` in `options` is replaced by
    /// [`VendorConfig::product_id`](crate::config::VendorConfig::product_id).
    pub async fn generate_pay_link(
        &self,
        options: &GeneratePayLinkOptions,
    ) -> Result<PayLink, ClientError> {
        let options = GeneratePayLinkOptions {
            product_id: self.client.config.product_id,
            ..options.clone()
        };
        self.generate_pay_link_custom(&options).await
    }

    /// `POST product/generate_pay_link` with caller-supplied product and
    /// prices, for one-off custom checkouts.
    pub async fn generate_pay_link_custom(
        &self,
        options: &GeneratePayLinkOptions,
    ) -> Result<PayLink, ClientError> {
        let resp = self
            .client
            .vendor_request(Method::POST, "product/generate_pay_link")?
            .query(options)
            .query(&options.price_pairs())
            .send()
            .await?;

        parse_response(resp).await
    }
}
