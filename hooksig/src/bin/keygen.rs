//! hooksig Keygen - prints a new shared webhook secret.
//!
//! Usage: `hooksig-keygen [LENGTH_BYTES]` (default 32, at most 1024). The
//! secret is written to stdout only; store it at both ends before rotating.

use anyhow::{bail, Context, Result};

use hooksig::generate_secret;
use hooksig::signature::{DEFAULT_SECRET_BYTES, MAX_SECRET_BYTES};

fn main() -> Result<()> {
    let length_bytes = parse_length(std::env::args().nth(1))?;

    let secret = generate_secret(length_bytes).context("Failed to generate secret")?;
    println!("{secret}");

    Ok(())
}

/// Parse the optional length argument.
fn parse_length(arg: Option<String>) -> Result<usize> {
    let length_bytes = match arg {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Invalid length in bytes: {raw}"))?,
        None => DEFAULT_SECRET_BYTES,
    };

    if length_bytes == 0 || length_bytes > MAX_SECRET_BYTES {
        bail!("Length must be between 1 and {MAX_SECRET_BYTES} bytes, got {length_bytes}");
    }

    Ok(length_bytes)
}
