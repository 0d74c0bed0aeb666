//! Bounded-window timestamp check.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{VerificationError, VerificationResult};

/// Default maximum age of a signed request: 5 minutes.
pub const DEFAULT_MAX_AGE_MS: i64 = 300_000;

/// How far ahead of the verifier's clock a timestamp may be.
pub const MAX_CLOCK_SKEW_MS: i64 = 60_000;

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    i64::try_from(millis).unwrap_or(i64::MAX)
}

/// Check that `timestamp` falls inside `[now - max_age_ms, now + MAX_CLOCK_SKEW_MS]`.
///
/// The age check runs first, so a timestamp that is both stale and in the
/// future cannot happen; both bounds are inclusive.
pub fn check_freshness(timestamp: i64, now: i64, max_age_ms: i64) -> VerificationResult {
    if now.saturating_sub(timestamp) > max_age_ms {
        return Err(VerificationError::StaleTimestamp);
    }

    if timestamp > now.saturating_add(MAX_CLOCK_SKEW_MS) {
        return Err(VerificationError::FutureTimestamp);
    }

    Ok(())
}
