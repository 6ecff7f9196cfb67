//! Canonical encoding of a webhook field set.
//!
//! Paddle signs the PHP `serialize()` output of the key-sorted field array:
//!
//! ```text
//! a:{count}:{s:{len}:"{key}";s:{len}:"{value}";...}
//! ```
//!
//! Lengths are byte lengths of the raw strings. Nothing is escaped.

use crate::fields::FieldSet;

/// Encode `fields` into the byte string Paddle hashed before signing.
///
/// `FieldSet` iterates in ascending byte order of its keys, so the output
/// depends only on the key/value mapping.
pub fn encode(fields: &FieldSet) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(format!("a:{}:{{", fields.len()).as_bytes());
    for (key, value) in fields.iter() {
        push_string(&mut out, key);
        push_string(&mut out, value);
    }
    out.push(b'}');
    out
}

fn push_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(format!("s:{}:\"", s.len()).as_bytes());
    out.extend_from_slice(s.as_bytes());
    out.extend_from_slice(b"\";");
}
