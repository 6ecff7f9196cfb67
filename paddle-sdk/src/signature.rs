//! Webhook signature verification.
//!
//! Paddle Classic signs every webhook with RSA PKCS#1 v1.5 over the SHA-1
//! digest of the canonical field encoding (see [`crate::canonical`]). The
//! algorithm is fixed by the protocol:
//!
//! ```text
//! p_signature = base64(RSA-PKCS1-v1_5-SIGN(SHA1(serialize(ksort(fields)))))
//! ```

use ring::signature::RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY;

use crate::key::WebhookPublicKey;

/// Signature verification failed.
///
/// Deliberately carries no detail: a wrong signature, a signature of the
/// wrong length and a degenerate key are indistinguishable to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("webhook signature verification failed")]
pub struct AuthError;

impl From<ring::error::Unspecified> for AuthError {
    fn from(_: ring::error::Unspecified) -> Self {
        AuthError
    }
}

/// The `p_signature` field is not valid base64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid base64 encoding in p_signature")]
pub struct SignatureEncodingError;

/// Verify `signature` over `canonical` with Paddle's public key.
pub fn verify(
    canonical: &[u8],
    signature: &[u8],
    public_key: &WebhookPublicKey,
) -> Result<(), AuthError> {
    public_key
        .components()
        .verify(
            &RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY,
            canonical,
            signature,
        )
        .map_err(AuthError::from)
}

/// Decode the base64 text of a `p_signature` field into raw signature bytes.
pub fn decode_signature(encoded: &str) -> Result<Box<[u8]>, SignatureEncodingError> {
    decode_base64(encoded)
        .map(Vec::into_boxed_slice)
        .ok_or(SignatureEncodingError)
}

/// Standard-alphabet base64 with optional padding and embedded whitespace.
fn decode_base64(encoded: &str) -> Option<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let unpadded = compact.trim_end_matches('=');
    if unpadded.is_empty() {
        return None;
    }
    fast32::base64::RFC4648_NOPAD.decode_str(unpadded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical;
    use crate::fields::FieldSet;
    use crate::test_support::{other_public_key, sign, test_public_key};

    fn sample_fields() -> FieldSet {
        [
            ("alert_name", "subscription_payment_succeeded"),
            ("subscription_id", "42"),
            ("email", "customer@example.com"),
            ("passthrough", r#"{"account":"zażółć"}"#),
            ("coupon", ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_round_trip() {
        let canonical = canonical::encode(&sample_fields());
        let signature = sign(&canonical);
        assert_eq!(verify(&canonical, &signature, &test_public_key()), Ok(()));
    }

    #[test]
    fn test_rejects_other_key() {
        let canonical = canonical::encode(&sample_fields());
        let signature = sign(&canonical);
        assert_eq!(
            verify(&canonical, &signature, &other_public_key()),
            Err(AuthError)
        );
    }

    #[test]
    fn test_rejects_any_altered_signature_byte() {
        let canonical = canonical::encode(&sample_fields());
        let signature = sign(&canonical);
        let key = test_public_key();
        for i in [0, 1, signature.len() / 2, signature.len() - 1] {
            let mut altered = signature.clone();
            altered[i] ^= 0x01;
            assert_eq!(verify(&canonical, &altered, &key), Err(AuthError), "byte {i}");
        }
    }

    #[test]
    fn test_rejects_truncated_and_empty_signature() {
        let canonical = canonical::encode(&sample_fields());
        let signature = sign(&canonical);
        let key = test_public_key();
        assert_eq!(
            verify(&canonical, &signature[..signature.len() - 1], &key),
            Err(AuthError)
        );
        assert_eq!(verify(&canonical, &[], &key), Err(AuthError));
    }

    #[test]
    fn test_tampered_value_fails() {
        let fields = sample_fields();
        let signature = sign(&canonical::encode(&fields));
        let key = test_public_key();
        for (k, v) in fields.iter() {
            let mut tampered = fields.clone();
            tampered.set(k, format!("{v}x"));
            let canonical = canonical::encode(&tampered);
            assert_eq!(verify(&canonical, &signature, &key), Err(AuthError), "field {k}");
        }
    }

    #[test]
    fn test_added_field_fails() {
        let fields = sample_fields();
        let signature = sign(&canonical::encode(&fields));
        let mut extended = fields.clone();
        extended.set("extra", "");
        assert_eq!(
            verify(&canonical::encode(&extended), &signature, &test_public_key()),
            Err(AuthError)
        );
    }

    #[test]
    fn test_decode_signature() {
        assert_eq!(decode_signature("AAEC").unwrap().as_ref(), &[0, 1, 2]);
        assert_eq!(decode_signature("AAECAw==").unwrap().as_ref(), &[0, 1, 2, 3]);
        assert_eq!(decode_signature("AAECAw").unwrap().as_ref(), &[0, 1, 2, 3]);
        assert_eq!(decode_signature("AAEC\nAw==").unwrap().as_ref(), &[0, 1, 2, 3]);
        assert_eq!(decode_signature("not base64!"), Err(SignatureEncodingError));
        assert_eq!(decode_signature(""), Err(SignatureEncodingError));
    }
}
