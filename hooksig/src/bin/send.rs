//! hooksig Sender - signs a JSON payload read from stdin and POSTs it.
//!
//! The payload is re-serialized in canonical form (sorted keys, no extra
//! whitespace) before signing, so the receiver sees exactly the signed bytes.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hooksig::{Config, WebhookSender};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for scripting
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let secret = config
        .require_secret()
        .context("Webhook secret must be configured")?
        .clone();
    let url = config
        .require_target_url()
        .context("Target URL must be configured")?;

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read payload from stdin")?;

    let payload: serde_json::Value =
        serde_json::from_str(&input).context("Payload on stdin is not valid JSON")?;

    let sender = WebhookSender::new(secret, Duration::from_millis(config.request_timeout_ms))?;
    let status = sender.send_json(&url, &payload).await?;

    info!(status_code = status.as_u16(), "sender_finished");
    println!("{}", status.as_u16());

    if !status.is_success() {
        bail!("Receiver answered {}", status);
    }

    Ok(())
}
