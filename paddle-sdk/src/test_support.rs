//! Signing helpers standing in for Paddle in unit tests.

use rsa::RsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha1::Sha1;

use crate::canonical;
use crate::fields::{FieldSet, SIGNATURE_FIELD};
use crate::key::WebhookPublicKey;

const TEST_PRIVATE_KEY: &[u8] = include_bytes!("../testdata/test_key.pk8");
const TEST_PUBLIC_KEY: &str = include_str!("../testdata/test_key.pub");
const OTHER_PUBLIC_KEY: &str = include_str!("../testdata/other_key.pub");

pub fn test_public_key() -> WebhookPublicKey {
    WebhookPublicKey::from_pem(TEST_PUBLIC_KEY).unwrap()
}

pub fn other_public_key() -> WebhookPublicKey {
    WebhookPublicKey::from_pem(OTHER_PUBLIC_KEY).unwrap()
}

/// Sign `message` the way Paddle does, with the test private key.
pub fn sign(message: &[u8]) -> Vec<u8> {
    let private_key = RsaPrivateKey::from_pkcs8_der(TEST_PRIVATE_KEY).unwrap();
    SigningKey::<Sha1>::new(private_key).sign(message).to_vec()
}

/// Build a signed form body carrying `pairs`.
pub fn signed_form_body(pairs: &[(&str, &str)]) -> Vec<u8> {
    let fields: FieldSet = pairs.iter().copied().collect();
    let signature = sign(&canonical::encode(&fields));
    let encoded_signature = fast32::base64::RFC4648_NOPAD.encode(&signature);

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(pairs.iter().copied());
    serializer.append_pair(SIGNATURE_FIELD, &encoded_signature);
    serializer.finish().into_bytes()
}
