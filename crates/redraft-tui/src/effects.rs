//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover I/O and task spawning only; the reducer never performs
//! either directly.

use redraft_core::api::{RephraseRequest, TranslateRequest};

use crate::common::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Send a rephrase request; the completion carries `id`.
    Rephrase { id: TaskId, request: RephraseRequest },

    /// Send a translate request; the completion carries `id`.
    Translate {
        id: TaskId,
        request: TranslateRequest,
    },

    /// Fetch character usage.
    FetchUsage { id: TaskId },

    /// Copy text to the system clipboard.
    CopyToClipboard { text: String },
}
