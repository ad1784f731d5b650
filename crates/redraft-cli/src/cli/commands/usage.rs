//! Usage command.

use anyhow::{Context, Result};
use redraft_core::api::ProxyClient;
use redraft_core::config::Config;

use super::api_failure;

pub async fn run(config: &Config, json: bool) -> Result<()> {
    let client = ProxyClient::from_config(config)?;
    let usage = client.usage().await.map_err(|e| api_failure(&e))?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&usage).context("serialize usage")?
        );
    } else {
        println!("{}", usage.summary());
    }
    Ok(())
}
