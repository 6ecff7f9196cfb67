//! Vendor credentials.

/// Credentials and defaults of a Paddle vendor account.
#[derive(Clone, PartialEq, Eq)]
pub struct VendorConfig {
    /// Numeric vendor id from the Paddle dashboard.
    pub vendor_id: u64,
    /// The vendor auth code (API key).
    pub api_key: String,
    /// Product bound to `generate_pay_link` calls.
    pub product_id: Option<u64>,
}

impl VendorConfig {
    /// Create a new VendorConfig.
    pub fn new(vendor_id: u64, api_key: impl Into<String>) -> Self {
        Self {
            vendor_id,
            api_key: api_key.into(),
            product_id: None,
        }
    }

    pub fn with_product_id(mut self, product_id: u64) -> Self {
        self.product_id = Some(product_id);
        self
    }
}

impl std::fmt::Debug for VendorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorConfig")
            .field("vendor_id", &self.vendor_id)
            .field("api_key", &"<redacted>")
            .field("product_id", &self.product_id)
            .finish()
    }
}
