//! Canonical JSON form for structured payloads.
//!
//! Object keys are sorted by their UTF-8 bytes and no insignificant whitespace
//! is emitted. Strings and numbers use serde_json's encoding. Two logically
//! identical values always produce the same bytes, whatever order their keys
//! were inserted in.

use std::borrow::Cow;

use serde_json::Value;

/// A webhook body as handed to the signer or verifier.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    /// Already serialized bytes, signed verbatim.
    Raw(&'a [u8]),
    /// Structured value, serialized with [`canonical_json`] before signing.
    Json(&'a Value),
}

impl<'a> Payload<'a> {
    /// The exact bytes that are signed and transmitted.
    pub fn to_bytes(&self) -> Cow<'a, [u8]> {
        match self {
            Payload::Raw(bytes) => Cow::Borrowed(bytes),
            Payload::Json(value) => Cow::Owned(canonical_json(value).into_bytes()),
        }
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Payload::Raw(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Payload<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Payload::Raw(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Payload<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Payload::Raw(bytes)
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Payload::Raw(text.as_bytes())
    }
}

impl<'a> From<&'a Value> for Payload<'a> {
    fn from(value: &'a Value) -> Self {
        Payload::Json(value)
    }
}

/// Serialize `value` in canonical form.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
