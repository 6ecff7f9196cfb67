//! The flat string field set carried by a Paddle webhook request.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Name of the form field holding the base64 webhook signature.
pub const SIGNATURE_FIELD: &str = "p_signature";

/// Name of the form field holding the event discriminator.
pub const ALERT_NAME_FIELD: &str = "alert_name";

/// A form body whose percent-decoded bytes are not UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("form body is not valid UTF-8 after percent-decoding")]
pub struct InvalidFormEncoding;

/// String-keyed, string-valued fields of a webhook request, ordered by the
/// raw bytes of their keys.
///
/// Form bodies may repeat a key. Only the first value is kept, which is the
/// same reduction Paddle applies before signing, so the canonical encoding
/// of a `FieldSet` always matches the signed preimage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: BTreeMap<String, String>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` request body.
    ///
    /// Keys and values must be UTF-8 once percent-decoded. A lossy decode
    /// would change the signed bytes, so such bodies are refused instead.
    pub fn from_form_body(body: &[u8]) -> Result<Self, InvalidFormEncoding> {
        if std::str::from_utf8(&urlencoding::decode_binary(body)).is_err() {
            return Err(InvalidFormEncoding);
        }
        Ok(url::form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect())
    }

    /// Insert a field unless the key is already present.
    ///
    /// Returns `false` when an earlier value was kept.
    pub fn insert_first(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.fields.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Insert or overwrite a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    /// Remove and return the `p_signature` field.
    pub fn take_signature(&mut self) -> Option<String> {
        self.remove(SIGNATURE_FIELD)
    }

    /// The `alert_name` discriminator, if the request carries one.
    pub fn alert_name(&self) -> Option<&str> {
        self.get(ALERT_NAME_FIELD)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert_first(k, v);
        }
        set
    }
}
