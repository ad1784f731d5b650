//! UI event types.
//!
//! All inputs (terminal, timer, async results) are converted to `UiEvent`
//! before being processed by the reducer.

use std::time::Instant;

use crossterm::event::Event as CrosstermEvent;
use redraft_core::api::{ApiError, RephraseResponse, TranslateResponse, Usage};
use redraft_core::options::{RephraseLanguage, Tone, WritingStyle};

use crate::common::TaskCompleted;
use crate::session::OperationMode;

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (debounce polling, spinner animation, notice expiry).
    Tick { now: Instant },

    /// Start of a loop iteration, carrying the clock.
    Frame { now: Instant },

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// Logical control event, produced by key handling and overlays.
    Control(ControlEvent),

    /// A rephrase or translate request finished.
    RequestCompleted(RequestCompleted),

    /// Usage lookup finished.
    UsageLoaded(TaskCompleted<Result<Usage, ApiError>>),

    /// Clipboard copy finished.
    Copied(Result<(), String>),
}

#[derive(Debug)]
pub enum RequestCompleted {
    Rephrase {
        /// The (trimmed) text that was sent, for diffing against the result.
        original: String,
        completed: TaskCompleted<Result<RephraseResponse, ApiError>>,
    },
    Translate(TaskCompleted<Result<TranslateResponse, ApiError>>),
}

/// Control events accepted by the interaction core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// Replace the whole input text.
    SetInput(String),
    SetMode(OperationMode),
    ToggleMode,
    SetLanguage(RephraseLanguage),
    SetWritingStyle(WritingStyle),
    SetTone(Tone),
    /// `None` selects auto-detect.
    SetSourceLang(Option<String>),
    SetTargetLang(String),
    SwapLanguages,
    Clear,
    DismissError,
    RefreshUsage,
    CopyOutput,
    Quit,
}
