//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── input: InputState          (source text editor)
//! │   ├── session: SessionState      (mode and per-mode options)
//! │   ├── output: OutputState        (result panel)
//! │   ├── error_panel: ErrorPanelState
//! │   ├── debounce: Debounce         (one slot per operation)
//! │   ├── task_seq / tasks           (staleness guard)
//! │   └── status_line: StatusLineState
//! └── overlay: Option<Overlay>       (modal pickers)
//! ```
//!
//! Overlays live beside `TuiState` so their handlers can borrow both at once.

use std::time::{Duration, Instant};

use redraft_core::config::Config;

use crate::common::{Debouncer, TaskSeq, Tasks};
use crate::error_panel::ErrorPanelState;
use crate::input::InputState;
use crate::output::OutputState;
use crate::overlays::Overlay;
use crate::session::{OperationMode, SessionState};
use crate::statusline::StatusLineState;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            tui: TuiState::new(config),
            overlay: None,
        }
    }
}

/// Debounce slots, one per operation so they never interfere.
#[derive(Debug, Clone)]
pub struct Debounce {
    pub rephrase: Debouncer<String>,
    pub translate: Debouncer<String>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            rephrase: Debouncer::new(delay),
            translate: Debouncer::new(delay),
        }
    }

    pub fn slot_mut(&mut self, mode: OperationMode) -> &mut Debouncer<String> {
        match mode {
            OperationMode::Rephrase => &mut self.rephrase,
            OperationMode::Translate => &mut self.translate,
        }
    }

    pub fn cancel_all(&mut self) {
        self.rephrase.cancel();
        self.translate.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.rephrase.is_pending() || self.translate.is_pending()
    }

    /// Earliest pending deadline across both slots.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.rephrase.deadline(), self.translate.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    pub should_quit: bool,
    /// Clock reading from the most recent `Frame`/`Tick` event.
    pub now: Instant,
    pub input: InputState,
    pub session: SessionState,
    pub output: OutputState,
    pub error_panel: ErrorPanelState,
    pub debounce: Debounce,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub status_line: StatusLineState,
    /// Spinner animation frame counter (for in-flight requests).
    pub spinner_frame: usize,
    /// Proxy base URL, shown in the header.
    pub proxy_url: String,
}

impl TuiState {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            now: Instant::now(),
            input: InputState::default(),
            session: SessionState::from_config(config),
            output: OutputState::default(),
            error_panel: ErrorPanelState::default(),
            debounce: Debounce::new(config.debounce_delay()),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            status_line: StatusLineState::default(),
            spinner_frame: 0,
            proxy_url: config
                .resolve_proxy_url()
                .unwrap_or_else(|_| config.proxy_url.clone()),
        }
    }

    /// True while anything needs fast ticking: a pending debounce, a request
    /// in flight, or a notice waiting to expire.
    pub fn needs_fast_tick(&self) -> bool {
        self.debounce.is_pending()
            || self.tasks.is_any_running()
            || self.status_line.has_pending_notice()
    }
}
