//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard
//! input. Each overlay owns its state, key handler, and render function and
//! reports its outcome as an `OverlayUpdate`.

pub mod option_picker;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use option_picker::{OptionPickerState, PickerKind};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::events::ControlEvent;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub controls: Vec<ControlEvent>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            controls: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_controls(mut self, controls: Vec<ControlEvent>) -> Self {
        self.controls = controls;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    OptionPicker(OptionPickerState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::OptionPicker(p) => p.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::OptionPicker(p) => p.handle_key(key),
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    fn render(&self, frame: &mut Frame, area: Rect);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(overlay) = self {
            overlay.render(frame, area);
        }
    }
}
