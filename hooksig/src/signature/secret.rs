//! Shared-secret generation and handling.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::error::Error;

/// Default secret size in bytes (256 bits).
pub const DEFAULT_SECRET_BYTES: usize = 32;

/// Largest secret the keygen tool will mint.
pub const MAX_SECRET_BYTES: usize = 1024;

/// Generate a new shared secret as lower-case hex.
///
/// Bytes come from the operating system's CSPRNG. The result has
/// `2 * length_bytes` characters.
pub fn generate_secret(length_bytes: usize) -> Result<String, Error> {
    let mut bytes = vec![0u8; length_bytes];
    OsRng.try_fill_bytes(&mut bytes)?;
    let secret = hex::encode(&bytes);
    bytes.zeroize();
    Ok(secret)
}

/// A shared webhook secret.
///
/// Redacted in `Debug` output and wiped from memory on drop. Deliberately not
/// `PartialEq`: secrets are only ever compared through a MAC.
#[derive(Clone)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Key bytes for signing and verification. Never log these.
    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// True when the secret is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(***)")
    }
}

impl Drop for WebhookSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secret_default_length() {
        let secret = generate_secret(DEFAULT_SECRET_BYTES).unwrap();
        assert_eq!(secret.len(), 64);
        assert!(secret
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_generate_secret_custom_length() {
        assert_eq!(generate_secret(16).unwrap().len(), 32);
        assert_eq!(generate_secret(0).unwrap(), "");
    }

    #[test]
    fn test_generate_secret_is_unique() {
        let a = generate_secret(DEFAULT_SECRET_BYTES).unwrap();
        let b = generate_secret(DEFAULT_SECRET_BYTES).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_webhook_secret_debug_is_redacted() {
        let secret = WebhookSecret::new("super-secret-value");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("super-secret-value"));
        assert_eq!(debug, "WebhookSecret(***)");
    }

    #[test]
    fn test_webhook_secret_is_blank() {
        assert!(WebhookSecret::new("").is_blank());
        assert!(WebhookSecret::new("   ").is_blank());
        assert!(!WebhookSecret::new("key123").is_blank());
        assert_eq!(WebhookSecret::new("abc").expose(), b"abc");
    }
}
