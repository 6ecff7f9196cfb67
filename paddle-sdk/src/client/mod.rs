//! HTTP client for the Paddle Classic API.
//!
//! Behind the default `client` cargo feature. Crates that only verify
//! webhooks can turn it off and skip `reqwest`.
//!
//! Every call is one request and one response. There is no retry, rate
//! limiting or caching layer.

mod product;
mod subscription;

pub use product::ProductApi;
pub use subscription::SubscriptionApi;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::VendorConfig;
use crate::objects::ApiEnvelope;

/// Default root of the vendor API.
pub const DEFAULT_BASE_URL: &str = "https://vendors.paddle.com/api/2.0/";

/// Default root of the checkout API (prices).
pub const DEFAULT_CHECKOUT_BASE_URL: &str = "https://checkout.paddle.com/api/2.0/";

/// Errors produced by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Paddle answered with `"success": false`.
    #[error("api error: code {code}: {message}")]
    Api { code: i64, message: String },

    /// Non-2xx status without a decodable envelope.
    #[error("unexpected status {status}, body: {body}")]
    Status { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// `vendor_id` and `vendor_auth_code` query parameters.
#[derive(Serialize)]
struct VendorAuth<'a> {
    vendor_id: u64,
    vendor_auth_code: &'a str,
}

/// Typed HTTP client for the Paddle Classic API.
#[derive(Debug, Clone)]
pub struct PaddleClient {
    http: Client,
    base_url: Url,
    checkout_base_url: Url,
    config: VendorConfig,
}

impl PaddleClient {
    /// Create a new `PaddleClient` against the production endpoints.
    pub fn new(config: VendorConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("valid default url"),
            checkout_base_url: Url::parse(DEFAULT_CHECKOUT_BASE_URL).expect("valid default url"),
            config,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Point vendor API calls somewhere else (sandbox, test server).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = with_trailing_slash(base_url);
        self
    }

    /// Point checkout API calls somewhere else.
    pub fn with_checkout_base_url(mut self, base_url: Url) -> Self {
        self.checkout_base_url = with_trailing_slash(base_url);
        self
    }

    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    /// Product endpoints.
    pub fn product(&self) -> ProductApi<'_> {
        ProductApi::new(self)
    }

    /// Subscription endpoints.
    pub fn subscription(&self) -> SubscriptionApi<'_> {
        SubscriptionApi::new(self)
    }

    fn vendor_auth(&self) -> VendorAuth<'_> {
        VendorAuth {
            vendor_id: self.config.vendor_id,
            vendor_auth_code: &self.config.api_key,
        }
    }

    /// Build a vendor-authenticated request to `path` under the vendor API.
    fn vendor_request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%method, path, "paddle api request");
        Ok(self.http.request(method, url).query(&self.vendor_auth()))
    }

    /// Build an unauthenticated request to `path` under the checkout API.
    fn checkout_request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = self.checkout_base_url.join(path)?;
        tracing::debug!(%method, path, "paddle checkout request");
        Ok(self.http.request(method, url))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    let envelope: ApiEnvelope = match serde_json::from_slice(&bytes) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(ClientError::Status {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Err(e) => return Err(ClientError::Json(e)),
    };
    decode_envelope(envelope)
}

fn decode_envelope<T: DeserializeOwned>(envelope: ApiEnvelope) -> Result<T, ClientError> {
    if !envelope.success {
        return Err(match envelope.error {
            Some(error) => ClientError::Api {
                code: error.code,
                message: error.message,
            },
            None => ClientError::Api {
                code: 0,
                message: "request failed without error details".to_string(),
            },
        });
    }
    let response = envelope.response.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(response).map_err(ClientError::Json)
}
