//! hooksig - signed webhooks between an application server and an
//! automation caller.
//!
//! The library provides the signing core plus thin HTTP adapters for it:
//! - `hooksig-web`: receives webhooks and rejects anything not signed
//! - `hooksig-send`: signs a JSON payload and delivers it
//! - `hooksig-keygen`: mints a new shared secret
//!
//! ## Architecture
//!
//! ```text
//! caller → build_headers → HTTP → validate_request → handler
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod signature;
pub mod web;

// Re-export commonly used types
pub use client::WebhookSender;
pub use config::{Config, ConfigError};
pub use error::{Error, VerificationError, VerificationResult};
pub use signature::{
    build_headers, canonical_json, extract_credentials, generate_secret, sign, validate_request,
    verify, SignedHeaders, WebhookSecret,
};
pub use web::AppState;
