//! Full-screen rephrase/translate TUI.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use features::{error_panel, input, output, session, statusline};
use redraft_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive editor until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal or terminal I/O fails.
pub async fn run_interactive(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive editor requires a terminal.\n\
             Use `redraft rephrase TEXT` or `redraft translate TEXT --to CODE` instead."
        );
    }

    let mut runtime = TuiRuntime::new(config)?;
    tokio::task::block_in_place(|| runtime.run())
}
