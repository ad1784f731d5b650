//! Effect handlers.
//!
//! Pure async functions: the runtime spawns them and sends the returned
//! event to the inbox.

use redraft_core::api::{ProxyClient, RephraseRequest, TranslateRequest};

use crate::common::{Clipboard, TaskCompleted, TaskId};
use crate::events::{RequestCompleted, UiEvent};

pub async fn rephrase(client: ProxyClient, id: TaskId, request: RephraseRequest) -> UiEvent {
    let result = client.rephrase(&request).await;
    UiEvent::RequestCompleted(RequestCompleted::Rephrase {
        original: request.text,
        completed: TaskCompleted { id, result },
    })
}

pub async fn translate(client: ProxyClient, id: TaskId, request: TranslateRequest) -> UiEvent {
    let result = client.translate(&request).await;
    UiEvent::RequestCompleted(RequestCompleted::Translate(TaskCompleted { id, result }))
}

pub async fn usage(client: ProxyClient, id: TaskId) -> UiEvent {
    let result = client.usage().await;
    UiEvent::UsageLoaded(TaskCompleted { id, result })
}

/// Copies on a blocking thread; the system clipboard may block briefly.
pub async fn copy_to_clipboard(text: String) -> UiEvent {
    let result = tokio::task::spawn_blocking(move || Clipboard::copy(&text))
        .await
        .map_err(|e| format!("Task failed: {e}"))
        .and_then(|r| r.map_err(|e| e.to_string()));
    UiEvent::Copied(result)
}
