//! HMAC-SHA256 signing over the `timestamp.payload` message.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Separator between the decimal timestamp and the payload bytes.
const MESSAGE_SEPARATOR: u8 = b'.';

/// Build the exact byte sequence that gets signed.
///
/// The timestamp is mixed into the message so a signature cannot be replayed
/// with a different timestamp, even for an identical payload.
pub fn signing_message(timestamp: i64, payload: &[u8]) -> Vec<u8> {
    let timestamp = timestamp.to_string();
    let mut message = Vec::with_capacity(timestamp.len() + 1 + payload.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.push(MESSAGE_SEPARATOR);
    message.extend_from_slice(payload);
    message
}

/// Compute the lower-case hex HMAC-SHA256 of `message` keyed with `secret`.
pub fn sign(message: &[u8], secret: &[u8]) -> String {
    hex::encode(digest(message, secret))
}

/// Sign `payload` as it would be sent at `timestamp`.
pub fn sign_payload(timestamp: i64, payload: &[u8], secret: &[u8]) -> String {
    sign(&signing_message(timestamp, payload), secret)
}

/// Raw 32-byte HMAC-SHA256 output.
pub(crate) fn digest(message: &[u8], secret: &[u8]) -> [u8; 32] {
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(m) => m,
        // HMAC hashes or pads the key, so every key length is accepted.
        Err(_) => unreachable!("HMAC-SHA256 accepts keys of any length"),
    };
    mac.update(message);

    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}
