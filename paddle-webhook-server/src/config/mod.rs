//! Configuration module for paddle-webhook-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables, and loads the webhook public key.

pub mod file;

use crate::config::file::FileConfig;
use paddle_sdk::{KeyError, WebhookPublicKey};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("failed to load public key from {path:?}: {source}")]
    PublicKey {
        path: PathBuf,
        #[source]
        source: KeyError,
    },
}

/// Loaded configuration, ready to build the application state from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub body_limit: usize,
    pub vendor_id: u64,
    pub public_key: WebhookPublicKey,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
    public_key_override: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
            public_key_override: None,
        }
    }

    /// Use `path` instead of `paddle.public_key_path` from the file.
    pub fn with_public_key_path(mut self, path: Option<PathBuf>) -> Self {
        self.public_key_override = path;
        self
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI and environment overrides
    /// 3. Validate the configuration
    /// 4. Load the webhook public key
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }
        if let Some(path) = &self.public_key_override {
            file_config.paddle.public_key_path = path.clone();
        }

        self.validate(&file_config)?;

        let key_path = self.resolve(&file_config.paddle.public_key_path);
        let public_key =
            WebhookPublicKey::from_pem_file(&key_path).map_err(|source| ConfigError::PublicKey {
                path: key_path.clone(),
                source,
            })?;
        tracing::info!(
            path = %key_path.display(),
            modulus_bits = public_key.modulus_bits(),
            "Webhook public key loaded"
        );

        Ok(LoadedConfig {
            listen: file_config.server.listen,
            body_limit: file_config.server.body_limit,
            vendor_id: file_config.paddle.vendor_id,
            public_key,
        })
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.paddle.vendor_id == 0 {
            return Err(ConfigError::ValidationError(
                "paddle.vendor_id must be set".to_string(),
            ));
        }
        if config.server.body_limit == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve `path` against the directory of the config file.
    fn resolve(&self, path: &Path) -> PathBuf {
        match self.config_path.parent() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEST_PUBLIC_KEY: &str = include_str!("../../../paddle-sdk/testdata/test_key.pub");
    const EC_PUBLIC_KEY: &str = include_str!("../../../paddle-sdk/testdata/ec_key.pub");

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn config_with_key_path(key_path: &str) -> String {
        format!("[paddle]\nvendor_id = 12345\npublic_key_path = \"{key_path}\"\n")
    }

    #[test]
    fn test_load_resolves_key_relative_to_config() {
        let dir = TempDir::new().unwrap();
        write(&dir, "paddle.pub", TEST_PUBLIC_KEY);
        let config_path = write(&dir, "config.toml", &config_with_key_path("paddle.pub"));

        let loaded = ConfigLoader::new(&config_path, None).load().unwrap();
        assert_eq!(loaded.vendor_id, 12345);
        assert_eq!(loaded.listen.port(), 8080);
        assert_eq!(loaded.public_key.modulus_bits(), 2048);
    }

    #[test]
    fn test_overrides() {
        let dir = TempDir::new().unwrap();
        let key_path = write(&dir, "override.pub", TEST_PUBLIC_KEY);
        let config_path = write(&dir, "config.toml", &config_with_key_path("missing.pub"));

        let listen: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        let loaded = ConfigLoader::new(&config_path, Some(listen))
            .with_public_key_path(Some(key_path))
            .load()
            .unwrap();
        assert_eq!(loaded.listen, listen);
    }

    #[test]
    fn test_missing_key_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config_path = write(&dir, "config.toml", &config_with_key_path("missing.pub"));

        let err = ConfigLoader::new(&config_path, None).load().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PublicKey {
                source: KeyError::Io(_),
                ..
            }
        ));
    }

    #[test]
    fn test_non_rsa_key_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(&dir, "ec.pub", EC_PUBLIC_KEY);
        let config_path = write(&dir, "config.toml", &config_with_key_path("ec.pub"));

        let err = ConfigLoader::new(&config_path, None).load().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PublicKey {
                source: KeyError::UnsupportedAlgorithm,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_vendor_id_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "paddle.pub", TEST_PUBLIC_KEY);
        let config_path = write(
            &dir,
            "config.toml",
            "[paddle]\nvendor_id = 0\npublic_key_path = \"paddle.pub\"\n",
        );

        let err = ConfigLoader::new(&config_path, None).load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
