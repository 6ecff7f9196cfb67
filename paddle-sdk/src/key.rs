//! Loading of the RSA public key Paddle signs webhooks with.
//!
//! The vendor dashboard hands out the key as a PEM `PUBLIC KEY` block
//! (DER SubjectPublicKeyInfo). A bare PKCS#1 `RSA PUBLIC KEY` block is
//! accepted as well. Anything that is not an `rsaEncryption` key is rejected
//! here, at load time, so request handling never sees a bad key.

use std::path::Path;

use pkcs8::SubjectPublicKeyInfoRef;
use pkcs8::der::{self, Decode, Document};

const SPKI_LABEL: &str = "PUBLIC KEY";
const PKCS1_LABEL: &str = "RSA PUBLIC KEY";

const MIN_MODULUS_BITS: usize = 2048;
const MAX_MODULUS_BITS: usize = 8192;

/// Errors produced while loading the webhook public key.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("failed to read public key file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse PEM block containing the public key")]
    Pem(#[source] der::Error),
    #[error("unexpected PEM label {0:?}, expected PUBLIC KEY or RSA PUBLIC KEY")]
    UnexpectedLabel(String),
    #[error("failed to parse DER encoded public key: {0}")]
    InvalidDer(#[source] der::Error),
    #[error("unknown type of public key, only RSA keys are accepted")]
    UnsupportedAlgorithm,
    #[error("RSA public exponent is zero")]
    ZeroExponent,
    #[error("RSA modulus of {0} bits is outside the supported 2048..=8192 range")]
    UnsupportedKeySize(usize),
}

/// Paddle's webhook signing key.
///
/// Immutable once loaded; share it by reference or behind an `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookPublicKey {
    n: Box<[u8]>,
    e: Box<[u8]>,
}

impl std::fmt::Debug for WebhookPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookPublicKey")
            .field("modulus_bits", &self.modulus_bits())
            .finish()
    }
}

impl WebhookPublicKey {
    /// Read and parse a PEM file.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        let pem = std::fs::read_to_string(path)?;
        Self::from_pem(&pem)
    }

    /// Parse a single `PUBLIC KEY` or `RSA PUBLIC KEY` PEM block.
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        let (label, document) = Document::from_pem(pem).map_err(KeyError::Pem)?;
        match label {
            SPKI_LABEL => Self::from_spki_der(document.as_bytes()),
            PKCS1_LABEL => Self::from_pkcs1_der(document.as_bytes()),
            other => Err(KeyError::UnexpectedLabel(other.to_string())),
        }
    }

    /// Parse a DER `SubjectPublicKeyInfo`.
    pub fn from_spki_der(der: &[u8]) -> Result<Self, KeyError> {
        let spki = SubjectPublicKeyInfoRef::from_der(der).map_err(KeyError::InvalidDer)?;
        spki.algorithm
            .assert_algorithm_oid(pkcs1::ALGORITHM_OID)
            .map_err(|_| KeyError::UnsupportedAlgorithm)?;
        let key = spki
            .subject_public_key
            .as_bytes()
            .ok_or(KeyError::InvalidDer(der::Tag::BitString.value_error()))?;
        Self::from_pkcs1_der(key)
    }

    /// Parse a DER PKCS#1 `RSAPublicKey`.
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self, KeyError> {
        let key = pkcs1::RsaPublicKey::from_der(der).map_err(KeyError::InvalidDer)?;
        let e = key.public_exponent.as_bytes();
        if e.iter().all(|&b| b == 0) {
            return Err(KeyError::ZeroExponent);
        }

        let key = Self {
            n: key.modulus.as_bytes().into(),
            e: e.into(),
        };
        let bits = key.modulus_bits();
        if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&bits) {
            return Err(KeyError::UnsupportedKeySize(bits));
        }
        Ok(key)
    }

    /// Size of the RSA modulus in bits.
    pub fn modulus_bits(&self) -> usize {
        match self.n.iter().position(|&b| b != 0) {
            Some(i) => (self.n.len() - i) * 8 - self.n[i].leading_zeros() as usize,
            None => 0,
        }
    }

    pub(crate) fn components(&self) -> ring::signature::RsaPublicKeyComponents<&[u8]> {
        ring::signature::RsaPublicKeyComponents {
            n: &self.n,
            e: &self.e,
        }
    }
}
