//! One-shot rephrase.

use anyhow::Result;
use redraft_core::api::{ProxyClient, RephraseRequest};
use redraft_core::config::Config;
use redraft_core::diff;
use redraft_core::options::{RephraseLanguage, Tone, WritingStyle};

use super::{api_failure, read_text};

pub struct RephraseOptions<'a> {
    pub config: &'a Config,
    pub text: Option<String>,
    pub language: Option<RephraseLanguage>,
    pub style: Option<WritingStyle>,
    pub tone: Option<Tone>,
    pub diff: bool,
}

pub async fn run(opts: RephraseOptions<'_>) -> Result<()> {
    let text = read_text(opts.text)?;
    let defaults = &opts.config.rephrase;

    // A flag for either option replaces both configured defaults.
    let (style, tone) = match (opts.style, opts.tone) {
        (Some(style), _) => (style, Tone::Default),
        (None, Some(tone)) => (WritingStyle::Default, tone),
        (None, None) => (defaults.writing_style, defaults.tone),
    };
    let request = RephraseRequest::new(
        text.as_str(),
        opts.language.unwrap_or(defaults.language),
        style,
        tone,
    );

    let client = ProxyClient::from_config(opts.config)?;
    let response = client
        .rephrase(&request)
        .await
        .map_err(|e| api_failure(&e))?;

    match response.result() {
        None => println!("No rephrasing available."),
        Some(revised) if opts.diff => println!("{}", diff::highlight(&text, revised).to_html()),
        Some(revised) => println!("{revised}"),
    }
    Ok(())
}
