//! TOML file configuration structures.
//!
//! These structs directly map to the `paddle-webhook.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub paddle: PaddleConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
    /// Largest accepted webhook body, in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
            body_limit: default_body_limit(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

fn default_body_limit() -> usize {
    64 * 1024
}

/// Paddle vendor section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddleConfig {
    /// Numeric vendor id from the Paddle dashboard.
    pub vendor_id: u64,
    /// PEM file holding Paddle's webhook public key. Relative paths are
    /// resolved against the directory of the config file.
    pub public_key_path: PathBuf,
}
