//! Request coordinator.
//!
//! Starts rephrase/translate requests and applies their completions. Each
//! dispatch is tagged with a fresh `TaskId`; a completion is applied only if
//! its id is still the active one for that kind, so a slow earlier response
//! can never overwrite a newer one.

use redraft_core::api::{ApiError, RephraseResponse, TranslateResponse};
use redraft_core::diff;

use super::state::OutputContent;
use crate::common::{TaskId, TaskKind, sanitize_for_display};
use crate::effects::UiEffect;
use crate::session::OperationMode;
use crate::state::TuiState;

pub fn task_kind(mode: OperationMode) -> TaskKind {
    match mode {
        OperationMode::Rephrase => TaskKind::Rephrase,
        OperationMode::Translate => TaskKind::Translate,
    }
}

/// Runs `mode`'s operation on the current input.
pub fn run(tui: &mut TuiState, mode: OperationMode) -> Vec<UiEffect> {
    let text = tui.input.text().to_string();
    run_with_text(tui, mode, &text)
}

pub fn run_rephrase(tui: &mut TuiState) -> Vec<UiEffect> {
    run(tui, OperationMode::Rephrase)
}

pub fn run_translate(tui: &mut TuiState) -> Vec<UiEffect> {
    run(tui, OperationMode::Translate)
}

/// Runs `mode`'s operation on `text`.
///
/// Empty (after trimming) input clears the output and orphans any
/// outstanding request instead of sending one.
pub fn run_with_text(tui: &mut TuiState, mode: OperationMode, text: &str) -> Vec<UiEffect> {
    let kind = task_kind(mode);
    tui.debounce.slot_mut(mode).cancel();

    let text = text.trim();
    if text.is_empty() {
        if tui.tasks.state(kind).is_running() {
            tracing::debug!(kind = kind.label(), "input cleared, orphaning request");
        }
        tui.tasks.state_mut(kind).clear();
        tui.output.clear();
        tui.error_panel.hide();
        return vec![];
    }

    tui.output.set_pending(mode);
    tui.error_panel.hide();
    let id = tui.tasks.state_mut(kind).start(&mut tui.task_seq);
    tracing::debug!(kind = kind.label(), id = id.0, chars = text.chars().count(), "dispatch");

    match mode {
        OperationMode::Rephrase => vec![UiEffect::Rephrase {
            id,
            request: tui.session.rephrase_request(text),
        }],
        OperationMode::Translate => vec![UiEffect::Translate {
            id,
            request: tui.session.translate_request(text),
        }],
    }
}

/// Cancels pending work for `mode` without touching the output.
pub fn abandon(tui: &mut TuiState, mode: OperationMode) {
    tui.debounce.slot_mut(mode).cancel();
    tui.tasks.state_mut(task_kind(mode)).clear();
}

pub fn handle_rephrase_completed(
    tui: &mut TuiState,
    id: TaskId,
    original: &str,
    result: Result<RephraseResponse, ApiError>,
) {
    if !accept(tui, TaskKind::Rephrase, id) {
        return;
    }
    match result {
        Ok(response) => {
            let content = match response.result() {
                Some(revised) => OutputContent::Rephrased(diff::highlight(
                    &sanitize_for_display(original),
                    &sanitize_for_display(revised),
                )),
                None => OutputContent::Text(
                    OperationMode::Rephrase.empty_result_text().to_string(),
                ),
            };
            tui.session
                .record_detected(OperationMode::Rephrase, response.detected_language.as_deref());
            tui.output.set_ready(content);
        }
        Err(err) => apply_error(tui, &err),
    }
}

pub fn handle_translate_completed(
    tui: &mut TuiState,
    id: TaskId,
    result: Result<TranslateResponse, ApiError>,
) {
    if !accept(tui, TaskKind::Translate, id) {
        return;
    }
    match result {
        Ok(response) => {
            let text = response.result().map_or_else(
                || OperationMode::Translate.empty_result_text().to_string(),
                sanitize_for_display,
            );
            tui.session
                .record_detected(OperationMode::Translate, response.detected_language.as_deref());
            tui.output.set_ready(OutputContent::Text(text));
        }
        Err(err) => apply_error(tui, &err),
    }
}

fn accept(tui: &mut TuiState, kind: TaskKind, id: TaskId) -> bool {
    let ok = tui.tasks.state_mut(kind).finish_if_active(id);
    if !ok {
        tracing::debug!(kind = kind.label(), id = id.0, "discarding stale completion");
    }
    ok
}

fn apply_error(tui: &mut TuiState, err: &ApiError) {
    tracing::warn!(kind = %err.kind, reason = %err, "request failed");
    tui.output.set_errored(&err.reason());
    tui.error_panel.show(err.record.clone());
}
