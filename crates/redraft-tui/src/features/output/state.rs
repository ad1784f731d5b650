use redraft_core::diff::Highlight;

use crate::session::OperationMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStatus {
    #[default]
    Empty,
    Pending,
    Ready,
    Errored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputContent {
    #[default]
    None,
    /// "Rephrasing..." / "Translating..." while a request is in flight.
    Placeholder(&'static str),
    /// Rephrased text with additions marked.
    Rephrased(Highlight),
    /// Translated text or an empty-result message.
    Text(String),
    /// `Error: <reason>`.
    Error(String),
}

/// The output panel. Written only by the request coordinator.
#[derive(Debug, Clone, Default)]
pub struct OutputState {
    pub status: OutputStatus,
    pub content: OutputContent,
}

impl OutputState {
    pub fn clear(&mut self) {
        self.status = OutputStatus::Empty;
        self.content = OutputContent::None;
    }

    pub fn set_pending(&mut self, mode: OperationMode) {
        self.status = OutputStatus::Pending;
        self.content = OutputContent::Placeholder(mode.pending_text());
    }

    pub fn set_ready(&mut self, content: OutputContent) {
        self.status = OutputStatus::Ready;
        self.content = content;
    }

    pub fn set_errored(&mut self, reason: &str) {
        self.status = OutputStatus::Errored;
        self.content = OutputContent::Error(format!("Error: {reason}"));
    }

    pub fn is_pending(&self) -> bool {
        self.status == OutputStatus::Pending
    }

    /// Visible text without any annotation, as it would be copied.
    pub fn visible_text(&self) -> Option<String> {
        match &self.content {
            OutputContent::None => None,
            OutputContent::Placeholder(text) => Some((*text).to_string()),
            OutputContent::Rephrased(highlight) => Some(highlight.revised_text()),
            OutputContent::Text(text) | OutputContent::Error(text) => Some(text.clone()),
        }
    }

    /// Result text worth copying (successful output only).
    pub fn copyable_text(&self) -> Option<String> {
        match (&self.status, &self.content) {
            (OutputStatus::Ready, OutputContent::Rephrased(highlight)) => {
                Some(highlight.revised_text())
            }
            (OutputStatus::Ready, OutputContent::Text(text)) => Some(text.clone()),
            _ => None,
        }
    }
}
