//! Request-level validation used by the HTTP layer.

use axum::http::HeaderMap;
use tracing::debug;

use super::freshness::now_ms;
use super::headers::{extract_credentials, parse_timestamp};
use super::verify::verify_at;
use crate::error::{VerificationError, VerificationResult};

/// Validate an inbound webhook from its headers and raw body.
///
/// Checks, in order: both credential headers present, timestamp well formed,
/// timestamp fresh, signature matches. Never panics on adversarial input;
/// every failure is returned as a [`VerificationError`].
pub fn validate_request(
    headers: &HeaderMap,
    body: &[u8],
    secret: &[u8],
    max_age_ms: i64,
) -> VerificationResult {
    validate_request_at(headers, body, secret, max_age_ms, now_ms())
}

/// Same as [`validate_request`], with an explicit notion of "now".
pub fn validate_request_at(
    headers: &HeaderMap,
    body: &[u8],
    secret: &[u8],
    max_age_ms: i64,
    now: i64,
) -> VerificationResult {
    let credentials = extract_credentials(headers);

    let (Some(signature), Some(raw_timestamp)) = (credentials.signature, credentials.timestamp)
    else {
        return Err(VerificationError::MissingCredentials);
    };

    let timestamp = parse_timestamp(&raw_timestamp)?;

    debug!(
        timestamp = timestamp,
        age_ms = now.saturating_sub(timestamp),
        body_length = body.len(),
        signature_length = signature.len(),
        "webhook_credentials_extracted"
    );

    verify_at(body, &signature, secret, timestamp, max_age_ms, now)
}
