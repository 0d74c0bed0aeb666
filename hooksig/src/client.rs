//! Outbound signed webhook delivery.
//!
//! A single attempt per call: no retries and no delivery guarantees. The
//! caller decides what to do with a non-success status.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{error, info};
use url::Url;

use crate::error::Error;
use crate::signature::{build_headers, Payload, WebhookSecret};

/// Sends webhooks signed with a shared secret.
#[derive(Clone)]
pub struct WebhookSender {
    client: Client,
    secret: WebhookSecret,
}

impl WebhookSender {
    /// Create a sender with the given per-request timeout.
    pub fn new(secret: WebhookSecret, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, secret })
    }

    /// Serialize `payload` in canonical JSON form and send it.
    pub async fn send_json<T: Serialize>(&self, url: &Url, payload: &T) -> Result<StatusCode> {
        let value = serde_json::to_value(payload).map_err(Error::from)?;
        let body = Payload::Json(&value).to_bytes().into_owned();
        self.send_raw(url, body).await
    }

    /// Sign `body` as-is and POST it to `url`.
    pub async fn send_raw(&self, url: &Url, body: Vec<u8>) -> Result<StatusCode> {
        let signed = build_headers(&body, self.secret.expose());

        info!(
            url = %url,
            body_length = body.len(),
            timestamp = signed.timestamp,
            "webhook_send_starting"
        );

        let mut request = self.client.post(url.clone());
        for (name, value) in signed.to_pairs() {
            request = request.header(name, value);
        }

        let response = match request.body(body).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    error!(url = %url, error = %e, "webhook_send_timeout");
                } else {
                    error!(url = %url, error = %e, "webhook_send_error");
                }
                return Err(e).context("Failed to send webhook");
            }
        };

        let status = response.status();
        info!(
            url = %url,
            status_code = status.as_u16(),
            is_success = status.is_success(),
            "webhook_send_complete"
        );

        Ok(status)
    }
}
