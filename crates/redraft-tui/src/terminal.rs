//! Terminal lifecycle management.
//!
//! The terminal is restored on normal exit, on Ctrl+C (handled as a key in
//! raw mode) and on panic through the installed hook.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Enables raw mode, enters the alternate screen and creates the terminal.
///
/// Call `install_panic_hook()` first so a panic still restores the terminal.
///
/// # Errors
/// Returns an error if the terminal cannot be put into raw mode.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

/// Enables bracketed paste so pasted text arrives as a single event.
///
/// # Errors
/// Returns an error if the escape sequence cannot be written.
pub fn enable_input_features() -> Result<()> {
    execute!(io::stdout(), EnableBracketedPaste).context("Failed to enable bracketed paste")
}

/// # Errors
/// Returns an error if the escape sequence cannot be written.
pub fn disable_input_features() -> Result<()> {
    execute!(io::stdout(), DisableBracketedPaste).context("Failed to disable bracketed paste")
}

/// Restores terminal state. Idempotent.
///
/// # Errors
/// Returns an error if raw mode cannot be disabled.
pub fn restore_terminal() -> Result<()> {
    // Must happen before leaving raw mode.
    let _ = execute!(io::stdout(), DisableBracketedPaste);

    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
