//! Vendor configuration for the Paddle API.
//!
//! Loading these values from files or the environment is left to the
//! application; see the webhook server crate for a TOML based loader.

mod vendor;

pub use vendor::VendorConfig;
