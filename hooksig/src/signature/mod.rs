//! Webhook signing and verification.
//!
//! A signature is the lower-case hex HMAC-SHA256 of `"{timestamp}.{payload}"`
//! keyed with the shared secret, where `timestamp` is milliseconds since the
//! Unix epoch. It travels in the `x-webhook-signature` header next to
//! `x-webhook-timestamp`.
//!
//! ```text
//! signer:   payload ─► build_headers ─► {signature, timestamp, content-type}
//! verifier: headers + body ─► validate_request
//!                               ├─ extract_credentials
//!                               ├─ check_freshness
//!                               └─ sign + constant-time compare
//! ```
//!
//! Everything here is synchronous, stateless and safe to call from any number
//! of tasks at once. The secret is always an explicit argument.

pub mod canonical;
pub mod freshness;
pub mod headers;
pub mod mac;
pub mod request;
pub mod secret;
pub mod verify;

pub use canonical::{canonical_json, Payload};
pub use freshness::{check_freshness, now_ms, DEFAULT_MAX_AGE_MS, MAX_CLOCK_SKEW_MS};
pub use headers::{
    build_headers, build_headers_at, extract_credentials, parse_timestamp, Credentials,
    SignedHeaders, CONTENT_TYPE_JSON, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
pub use mac::{sign, sign_payload, signing_message};
pub use request::{validate_request, validate_request_at};
pub use secret::{generate_secret, WebhookSecret, DEFAULT_SECRET_BYTES, MAX_SECRET_BYTES};
pub use verify::{verify, verify_at};
