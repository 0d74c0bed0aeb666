//! Configuration module for environment variable parsing.
//!
//! Only the binaries read configuration. The library takes the secret and the
//! freshness window as explicit arguments.

use std::env;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::signature::{WebhookSecret, DEFAULT_MAX_AGE_MS};

/// Errors for configuration that has no usable default.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} is empty")]
    Blank(&'static str),

    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared HMAC secret
    pub webhook_secret: Option<WebhookSecret>,

    /// Maximum age in milliseconds for webhook timestamps
    pub max_age_ms: i64,

    /// Port for the web server to listen on
    pub port: u16,

    /// Largest request body the web server will buffer
    pub body_limit_bytes: usize,

    /// Endpoint that signed webhooks are sent to
    pub target_url: Option<String>,

    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            webhook_secret: env::var("WEBHOOK_SECRET").ok().map(WebhookSecret::new),

            max_age_ms: parse_or("WEBHOOK_MAX_AGE_MS", DEFAULT_MAX_AGE_MS, |v: &i64| *v >= 0),

            port: parse_or("PORT", 8080, |_: &u16| true),

            body_limit_bytes: parse_or("WEBHOOK_BODY_LIMIT_BYTES", 1024 * 1024, |v: &usize| *v > 0),

            target_url: env::var("WEBHOOK_TARGET_URL").ok(),

            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", 8000, |v: &u64| *v > 0),
        }
    }

    /// The configured secret, refusing to run without one.
    pub fn require_secret(&self) -> Result<&WebhookSecret, ConfigError> {
        match &self.webhook_secret {
            None => Err(ConfigError::Missing("WEBHOOK_SECRET")),
            Some(secret) if secret.is_blank() => Err(ConfigError::Blank("WEBHOOK_SECRET")),
            Some(secret) => Ok(secret),
        }
    }

    /// The parsed target URL for outbound webhooks.
    pub fn require_target_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .target_url
            .as_deref()
            .ok_or(ConfigError::Missing("WEBHOOK_TARGET_URL"))?;
        Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
            name: "WEBHOOK_TARGET_URL",
            source,
        })
    }
}

/// Parse an environment variable, falling back to `default` when it is unset,
/// unparseable or rejected by `valid`.
fn parse_or<T>(name: &str, default: T, valid: impl Fn(&T) -> bool) -> T
where
    T: FromStr,
{
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_valid() {
        env::set_var("HOOKSIG_TEST_MAX_AGE", "1000");
        let result = parse_or("HOOKSIG_TEST_MAX_AGE", 5i64, |v| *v >= 0);
        assert_eq!(result, 1000);
        env::remove_var("HOOKSIG_TEST_MAX_AGE");
    }

    #[test]
    fn test_parse_or_default() {
        let result = parse_or("HOOKSIG_NONEXISTENT_VAR", 10u64, |_: &u64| true);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_parse_or_rejected() {
        env::set_var("HOOKSIG_TEST_NEGATIVE", "-1");
        assert_eq!(parse_or("HOOKSIG_TEST_NEGATIVE", 7i64, |v| *v >= 0), 7);
        env::set_var("HOOKSIG_TEST_NEGATIVE", "abc");
        assert_eq!(parse_or("HOOKSIG_TEST_NEGATIVE", 7i64, |v| *v >= 0), 7);
        env::remove_var("HOOKSIG_TEST_NEGATIVE");
    }

    fn config() -> Config {
        Config {
            webhook_secret: None,
            max_age_ms: DEFAULT_MAX_AGE_MS,
            port: 8080,
            body_limit_bytes: 1024,
            target_url: None,
            request_timeout_ms: 8000,
        }
    }

    #[test]
    fn test_require_secret() {
        let mut config = config();
        assert!(matches!(
            config.require_secret(),
            Err(ConfigError::Missing("WEBHOOK_SECRET"))
        ));

        config.webhook_secret = Some(WebhookSecret::new("  "));
        assert!(matches!(
            config.require_secret(),
            Err(ConfigError::Blank("WEBHOOK_SECRET"))
        ));

        config.webhook_secret = Some(WebhookSecret::new("key123"));
        assert_eq!(config.require_secret().unwrap().expose(), b"key123");
    }

    #[test]
    fn test_require_target_url() {
        let mut config = config();
        assert!(config.require_target_url().is_err());

        config.target_url = Some("not a url".to_string());
        assert!(matches!(
            config.require_target_url(),
            Err(ConfigError::InvalidUrl { .. })
        ));

        config.target_url = Some("https://example.com/webhooks/content-status".to_string());
        assert_eq!(
            config.require_target_url().unwrap().path(),
            "/webhooks/content-status"
        );
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let mut config = config();
        config.webhook_secret = Some(WebhookSecret::new("do-not-print"));
        assert!(!format!("{:?}", config).contains("do-not-print"));
    }
}
