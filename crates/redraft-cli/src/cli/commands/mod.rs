//! CLI command handlers.

pub mod config;
pub mod editor;
pub mod rephrase;
pub mod serve;
pub mod translate;
pub mod usage;

use std::io::Read;

use anyhow::{Context, Result, anyhow};
use redraft_core::api::ApiError;

/// The positional text, or stdin when it is absent. Trimmed; empty input is
/// rejected before any request is made.
fn read_text(text: Option<String>) -> Result<String> {
    let raw = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut buf)
                .context("read text from stdin")?;
            buf
        }
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("No text provided");
    }
    Ok(trimmed.to_string())
}

/// Prints the error record to stderr and turns the failure into the same
/// `Error: <reason>` line the editor shows.
fn api_failure(err: &ApiError) -> anyhow::Error {
    tracing::debug!(kind = %err.kind, "request failed");
    eprintln!("{}", err.record.to_pretty_json());
    anyhow!("Error: {}", err.reason())
}
