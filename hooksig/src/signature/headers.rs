//! Transport metadata: reading inbound credentials and building outbound headers.

use axum::http::HeaderMap;

use super::canonical::Payload;
use super::freshness::now_ms;
use super::mac::sign_payload;
use crate::error::VerificationError;

/// Header carrying the lower-case hex HMAC digest.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Header carrying the signing time in milliseconds since the Unix epoch.
pub const TIMESTAMP_HEADER: &str = "x-webhook-timestamp";

/// Content type set on every signed outbound request.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Raw credential values found on an inbound request.
///
/// An empty value counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub signature: Option<String>,
    pub timestamp: Option<String>,
}

/// Read the signature and timestamp headers.
///
/// `HeaderMap` lookups are case-insensitive, so `X-Webhook-Signature` and
/// `x-webhook-signature` are the same header.
pub fn extract_credentials(headers: &HeaderMap) -> Credentials {
    Credentials {
        signature: header_value(headers, SIGNATURE_HEADER),
        timestamp: header_value(headers, TIMESTAMP_HEADER),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    // Non-ASCII bytes are kept (lossily) rather than dropped: the value was
    // sent, so it must fail as malformed or mismatched, not as missing.
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a timestamp header strictly as a decimal integer.
pub fn parse_timestamp(raw: &str) -> Result<i64, VerificationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| VerificationError::MalformedTimestamp)
}

/// Headers to attach to an outbound signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub signature: String,
    pub timestamp: i64,
}

impl SignedHeaders {
    /// Name/value pairs, including `content-type`, ready to attach verbatim.
    pub fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            (SIGNATURE_HEADER, self.signature.clone()),
            (TIMESTAMP_HEADER, self.timestamp.to_string()),
            ("content-type", CONTENT_TYPE_JSON.to_string()),
        ]
    }
}

/// Sign `payload` at the current wall-clock time.
///
/// Structured payloads are signed in canonical form; the request body must
/// carry those same bytes.
pub fn build_headers<'a>(payload: impl Into<Payload<'a>>, secret: &[u8]) -> SignedHeaders {
    build_headers_at(payload, secret, now_ms())
}

/// Sign `payload` at an explicit `timestamp`.
pub fn build_headers_at<'a>(
    payload: impl Into<Payload<'a>>,
    secret: &[u8],
    timestamp: i64,
) -> SignedHeaders {
    let bytes = payload.into().to_bytes();
    SignedHeaders {
        signature: sign_payload(timestamp, &bytes, secret),
        timestamp,
    }
}
