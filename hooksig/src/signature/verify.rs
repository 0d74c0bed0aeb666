//! Signature verification with constant-time comparison.

use subtle::ConstantTimeEq;

use super::freshness::{check_freshness, now_ms};
use super::mac::{digest, sign_payload};
use crate::error::{VerificationError, VerificationResult};

/// Verify `claimed_signature` for `payload` signed at `timestamp`, against the
/// current wall clock.
pub fn verify(
    payload: &[u8],
    claimed_signature: &str,
    secret: &[u8],
    timestamp: i64,
    max_age_ms: i64,
) -> VerificationResult {
    verify_at(payload, claimed_signature, secret, timestamp, max_age_ms, now_ms())
}

/// Same as [`verify`], with an explicit notion of "now".
pub fn verify_at(
    payload: &[u8],
    claimed_signature: &str,
    secret: &[u8],
    timestamp: i64,
    max_age_ms: i64,
    now: i64,
) -> VerificationResult {
    check_freshness(timestamp, now, max_age_ms)?;

    let expected_signature = sign_payload(timestamp, payload, secret);

    if signatures_match(&expected_signature, claimed_signature, secret) {
        Ok(())
    } else {
        Err(VerificationError::SignatureMismatch)
    }
}

/// Constant-time signature comparison.
///
/// Both candidates are first reduced to fixed-length HMAC digests, so inputs
/// of different lengths are compared in the same time as equal-length ones
/// and a length mismatch is plain inequality.
fn signatures_match(expected: &str, claimed: &str, key: &[u8]) -> bool {
    let expected = digest(expected.as_bytes(), key);
    let claimed = digest(claimed.as_bytes(), key);
    expected.ct_eq(&claimed).into()
}
