//! Interactive editor (default command).

use anyhow::Result;
use redraft_core::config::Config;

#[cfg(feature = "tui")]
pub async fn run(config: &Config) -> Result<()> {
    redraft_tui::run_interactive(config).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: &Config) -> Result<()> {
    anyhow::bail!(
        "This build has no interactive editor.\n\
         Use `redraft rephrase TEXT` or `redraft translate TEXT --to CODE`."
    )
}
