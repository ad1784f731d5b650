//! Clipboard access for copying the output panel.
//!
//! Tries the system clipboard first, then falls back to an OSC 52 escape
//! sequence (which also works over SSH when the terminal supports it).

use std::fmt;
use std::io::Write;

use base64::Engine;

pub struct Clipboard;

impl Clipboard {
    pub fn copy(text: &str) -> Result<(), ClipboardError> {
        match Self::copy_system(text) {
            Ok(()) => Ok(()),
            Err(system) => {
                tracing::debug!(error = %system, "system clipboard unavailable, trying OSC 52");
                Self::copy_osc52(text)
            }
        }
    }

    fn copy_system(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::System(e.to_string()))
    }

    fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        let mut stdout = std::io::stdout();
        write!(stdout, "\x1b]52;c;{encoded}\x1b\\")
            .and_then(|()| stdout.flush())
            .map_err(|e| ClipboardError::Osc52(e.to_string()))
    }
}

#[derive(Debug)]
pub enum ClipboardError {
    System(String),
    Osc52(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::System(msg) => write!(f, "system clipboard failed: {msg}"),
            ClipboardError::Osc52(msg) => write!(f, "OSC 52 clipboard failed: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}
