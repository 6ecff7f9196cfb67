//! The webhook authentication pipeline.
//!
//! ```text
//! form body -> FieldSet -> remove p_signature -> canonical bytes
//!           -> RSA/SHA-1 verify -> branch on alert_name -> record
//! ```
//!
//! Every step either succeeds or aborts the whole pipeline; no partially
//! verified record is ever returned.
//!
//! # Example
//!
//! ```ignore
//! use paddle_sdk::{WebhookPublicKey, WebhookOutcome, verify_webhook};
//!
//! let key = WebhookPublicKey::from_pem_file("paddle.pub")?;
//! match verify_webhook(&body, &key)? {
//!     WebhookOutcome::Event(event) => handle(event),
//!     WebhookOutcome::Unrecognized { .. } => {}
//! }
//! ```

use crate::canonical;
use crate::decode::{self, DecodeError, WebhookOutcome};
use crate::fields::{FieldSet, InvalidFormEncoding};
use crate::key::WebhookPublicKey;
use crate::objects::webhook::FulfillmentWebhook;
use crate::signature::{self, AuthError, SignatureEncodingError};

/// Errors produced by the webhook pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookError {
    /// The body is not UTF-8 once percent-decoded.
    #[error(transparent)]
    InvalidFormEncoding(#[from] InvalidFormEncoding),
    /// The request carries no `p_signature` field.
    #[error("missing p_signature field")]
    MissingSignature,
    /// `p_signature` is not valid base64.
    #[error(transparent)]
    InvalidSignatureEncoding(#[from] SignatureEncodingError),
    /// The signature does not match the payload.
    #[error(transparent)]
    Authentication(#[from] AuthError),
    /// Authentic payload with a malformed typed field.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl WebhookError {
    /// Whether the request itself was malformed, as opposed to failing
    /// authentication or decoding.
    pub fn is_malformed_request(&self) -> bool {
        matches!(
            self,
            WebhookError::InvalidFormEncoding(_)
                | WebhookError::MissingSignature
                | WebhookError::InvalidSignatureEncoding(_)
        )
    }
}

/// Verify and decode a form-encoded subscription webhook body.
pub fn verify_webhook(
    body: &[u8],
    public_key: &WebhookPublicKey,
) -> Result<WebhookOutcome, WebhookError> {
    verify_fields(FieldSet::from_form_body(body)?, public_key)
}

/// Verify and decode an already parsed subscription webhook.
pub fn verify_fields(
    fields: FieldSet,
    public_key: &WebhookPublicKey,
) -> Result<WebhookOutcome, WebhookError> {
    let fields = authenticate(fields, public_key)?;
    let outcome = decode::decode(&fields, fields.alert_name())?;
    if let WebhookOutcome::Unrecognized { alert_name } = &outcome {
        tracing::debug!(alert_name = ?alert_name, "ignoring unrecognized webhook type");
    }
    Ok(outcome)
}

/// Verify and decode a form-encoded fulfillment webhook body.
pub fn verify_fulfillment_webhook(
    body: &[u8],
    public_key: &WebhookPublicKey,
) -> Result<FulfillmentWebhook, WebhookError> {
    verify_fulfillment_fields(FieldSet::from_form_body(body)?, public_key)
}

/// Verify and decode an already parsed fulfillment webhook.
pub fn verify_fulfillment_fields(
    fields: FieldSet,
    public_key: &WebhookPublicKey,
) -> Result<FulfillmentWebhook, WebhookError> {
    let fields = authenticate(fields, public_key)?;
    Ok(decode::decode_fulfillment(&fields)?)
}

/// Strip `p_signature` and check it against the remaining fields.
///
/// Returns the field set without the signature on success.
pub fn authenticate(
    mut fields: FieldSet,
    public_key: &WebhookPublicKey,
) -> Result<FieldSet, WebhookError> {
    let encoded = fields
        .take_signature()
        .ok_or(WebhookError::MissingSignature)?;
    let raw_signature = signature::decode_signature(&encoded)?;
    let canonical = canonical::encode(&fields);
    signature::verify(&canonical, &raw_signature, public_key).inspect_err(|_| {
        tracing::debug!(field_count = fields.len(), "webhook signature rejected");
    })?;
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::webhook::{SubscriptionCreated, WebhookEvent};
    use crate::test_support::{other_public_key, sign, signed_form_body, test_public_key};

    const SUBSCRIPTION_CREATED_FORM: &[u8] = include_bytes!("../testdata/subscription_created.form");
    const FULFILLMENT_FORM: &[u8] = include_bytes!("../testdata/fulfillment.form");

    #[test]
    fn test_recorded_subscription_created() {
        let outcome = verify_webhook(SUBSCRIPTION_CREATED_FORM, &test_public_key()).unwrap();
        let WebhookOutcome::Event(WebhookEvent::SubscriptionCreated(event)) = outcome else {
            panic!("expected subscription_created, got {outcome:?}");
        };
        assert_eq!(event.alert_id, "1700000001");
        assert_eq!(event.subscription_id, "42");
        assert_eq!(event.email, "customer@example.com");
        assert_eq!(event.passthrough, r#"{"account":"zażółć"}"#);
        assert_eq!(event.quantity, "3");
        assert_eq!(
            event.next_bill_date(),
            Some(time::macros::date!(2021 - 06 - 12))
        );
    }

    #[test]
    fn test_signer_reproduces_recorded_signature() {
        let mut fields = FieldSet::from_form_body(SUBSCRIPTION_CREATED_FORM).unwrap();
        let recorded = signature::decode_signature(&fields.take_signature().unwrap()).unwrap();
        assert_eq!(sign(&canonical::encode(&fields)), recorded.to_vec());
    }

    #[test]
    fn test_recorded_fulfillment() {
        let webhook = verify_fulfillment_webhook(FULFILLMENT_FORM, &test_public_key()).unwrap();
        assert_eq!(webhook.quantity, 2);
        assert_eq!(webhook.passthrough, "order-77");
        assert_eq!(webhook.p_coupon, "");
        assert_eq!(webhook.p_country, "PL");
    }

    #[test]
    fn test_recorded_body_rejected_under_other_key() {
        assert_eq!(
            verify_webhook(SUBSCRIPTION_CREATED_FORM, &other_public_key()),
            Err(WebhookError::Authentication(AuthError))
        );
    }

    #[test]
    fn test_minimal_subscription_created() {
        let body = signed_form_body(&[
            ("alert_name", "subscription_created"),
            ("subscription_id", "1"),
            ("email", "a@b.com"),
        ]);
        let outcome = verify_webhook(&body, &test_public_key()).unwrap();
        assert_eq!(
            outcome,
            WebhookOutcome::Event(WebhookEvent::SubscriptionCreated(SubscriptionCreated {
                subscription_id: "1".to_string(),
                email: "a@b.com".to_string(),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_unknown_alert_name_with_valid_signature() {
        let body = signed_form_body(&[("alert_name", "some_future_event"), ("alert_id", "5")]);
        assert_eq!(
            verify_webhook(&body, &test_public_key()),
            Ok(WebhookOutcome::Unrecognized {
                alert_name: Some("some_future_event".to_string())
            })
        );
    }

    #[test]
    fn test_unknown_alert_name_with_bad_signature_is_auth_error() {
        let body = signed_form_body(&[("alert_name", "some_future_event")]);
        assert_eq!(
            verify_webhook(&body, &other_public_key()),
            Err(WebhookError::Authentication(AuthError))
        );
    }

    #[test]
    fn test_missing_signature() {
        let err = verify_webhook(
            b"alert_name=subscription_created&subscription_id=1",
            &test_public_key(),
        )
        .unwrap_err();
        assert_eq!(err, WebhookError::MissingSignature);
        assert!(err.is_malformed_request());
    }

    #[test]
    fn test_signature_not_base64() {
        let err = verify_webhook(b"alert_name=x&p_signature=%21%21%21", &test_public_key())
            .unwrap_err();
        assert_eq!(
            err,
            WebhookError::InvalidSignatureEncoding(SignatureEncodingError)
        );
        assert!(err.is_malformed_request());
    }

    #[test]
    fn test_tampered_body_rejected() {
        let body = signed_form_body(&[
            ("alert_name", "subscription_payment_succeeded"),
            ("subscription_id", "1"),
            ("unit_price", "10.00"),
        ]);
        let tampered = String::from_utf8(body)
            .unwrap()
            .replace("unit_price=10.00", "unit_price=0.01");
        let err = verify_webhook(tampered.as_bytes(), &test_public_key()).unwrap_err();
        assert_eq!(err, WebhookError::Authentication(AuthError));
        assert!(!err.is_malformed_request());
    }

    #[test]
    fn test_duplicate_field_uses_first_value() {
        let body = signed_form_body(&[("alert_name", "subscription_created"), ("quantity", "1")]);
        let mut body = String::from_utf8(body).unwrap();
        body.push_str("&quantity=99");
        let WebhookOutcome::Event(WebhookEvent::SubscriptionCreated(event)) =
            verify_webhook(body.as_bytes(), &test_public_key()).unwrap()
        else {
            panic!("expected subscription_created");
        };
        assert_eq!(event.quantity, "1");
    }

    #[test]
    fn test_fulfillment_bad_quantity_is_decode_error() {
        let body = signed_form_body(&[("quantity", "lots"), ("passthrough", "x")]);
        let err = verify_fulfillment_webhook(&body, &test_public_key()).unwrap_err();
        assert!(matches!(err, WebhookError::Decode(_)));
        assert!(!err.is_malformed_request());
    }

    #[test]
    fn test_non_utf8_body_is_malformed() {
        let err = verify_webhook(
            b"alert_name=subscription_created&passthrough=%FF&p_signature=AAEC",
            &test_public_key(),
        )
        .unwrap_err();
        assert_eq!(err, WebhookError::InvalidFormEncoding(InvalidFormEncoding));
        assert!(err.is_malformed_request());
    }

    #[test]
    fn test_fulfillment_missing_signature() {
        assert_eq!(
            verify_fulfillment_webhook(b"quantity=1", &test_public_key()),
            Err(WebhookError::MissingSignature)
        );
    }
}
