//! One-shot translate.

use anyhow::{Result, bail};
use redraft_core::api::{ProxyClient, TranslateRequest};
use redraft_core::config::Config;
use redraft_core::options::{as_source_code, as_target_code};

use super::{api_failure, read_text};

pub async fn run(
    config: &Config,
    text: Option<String>,
    to: Option<&str>,
    from: Option<&str>,
) -> Result<()> {
    let text = read_text(text)?;

    let to = to.unwrap_or(&config.translate.target_lang);
    let Some(target) = as_target_code(to) else {
        bail!("Unknown target language: {to}");
    };
    let from = from.unwrap_or(&config.translate.source_lang).trim();
    let source = if from.is_empty() || from.eq_ignore_ascii_case("auto") {
        None
    } else {
        match as_source_code(from) {
            Some(code) => Some(code),
            None => bail!("Unknown source language: {from}"),
        }
    };

    let client = ProxyClient::from_config(config)?;
    let response = client
        .translate(&TranslateRequest::new(text, source, target))
        .await
        .map_err(|e| api_failure(&e))?;

    match response.result() {
        Some(translated) => println!("{translated}"),
        None => println!("No translation available."),
    }
    Ok(())
}
