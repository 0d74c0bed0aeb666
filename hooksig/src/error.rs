//! Error types.
//!
//! Rejections of inbound webhooks are expected outcomes and are modelled by
//! [`VerificationError`]. [`Error`] covers the conditions the subsystem cannot
//! work without, such as an unavailable entropy source.

use thiserror::Error;

/// Why an inbound webhook was rejected.
///
/// The `Display` text is for server-side diagnostics only. It must never be
/// echoed back to the caller, otherwise it becomes an oracle telling an
/// attacker which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Signature or timestamp header absent.
    #[error("missing webhook signature or timestamp")]
    MissingCredentials,

    /// Timestamp header present but not a decimal integer.
    #[error("invalid timestamp format")]
    MalformedTimestamp,

    /// Timestamp older than the freshness window.
    #[error("timestamp too old")]
    StaleTimestamp,

    /// Timestamp further ahead than the allowed clock skew.
    #[error("timestamp in the future")]
    FutureTimestamp,

    /// Recomputed signature disagrees with the claimed one.
    #[error("invalid signature")]
    SignatureMismatch,
}

impl VerificationError {
    /// Stable snake_case label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationError::MissingCredentials => "missing_credentials",
            VerificationError::MalformedTimestamp => "malformed_timestamp",
            VerificationError::StaleTimestamp => "stale_timestamp",
            VerificationError::FutureTimestamp => "future_timestamp",
            VerificationError::SignatureMismatch => "signature_mismatch",
        }
    }
}

/// Outcome of verifying a single webhook: accepted, or rejected for exactly one reason.
pub type VerificationResult = Result<(), VerificationError>;

/// Unrecoverable failures.
#[derive(Debug, Error)]
pub enum Error {
    /// The operating system's secure random source could not be read.
    #[error("secure random source unavailable: {0}")]
    Entropy(#[from] rand::Error),

    /// A structured payload could not be serialized.
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}
