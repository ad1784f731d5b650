//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::{ControlEvent, RequestCompleted, UiEvent};
use crate::output;
use crate::overlays::{OptionPickerState, Overlay, OverlayTransition, PickerKind};
use crate::session::OperationMode;
use crate::state::{AppState, TuiState};
use crate::statusline::UsageDisplay;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick { now } => handle_tick(&mut app.tui, now),
        UiEvent::Frame { now } => {
            app.tui.now = now;
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Control(control) => handle_control(&mut app.tui, control),
        UiEvent::RequestCompleted(RequestCompleted::Rephrase { original, completed }) => {
            output::handle_rephrase_completed(
                &mut app.tui,
                completed.id,
                &original,
                completed.result,
            );
            vec![]
        }
        UiEvent::RequestCompleted(RequestCompleted::Translate(completed)) => {
            output::handle_translate_completed(&mut app.tui, completed.id, completed.result);
            vec![]
        }
        UiEvent::UsageLoaded(completed) => {
            if app
                .tui
                .tasks
                .state_mut(TaskKind::Usage)
                .finish_if_active(completed.id)
            {
                if let Err(err) = &completed.result {
                    tracing::warn!(reason = %err, "usage lookup failed");
                }
                app.tui.status_line.set_usage_result(completed.result);
            }
            vec![]
        }
        UiEvent::Copied(result) => {
            let now = app.tui.now;
            match result {
                Ok(()) => app.tui.status_line.notify("Copied to clipboard", now),
                Err(err) => {
                    tracing::warn!(error = %err, "clipboard copy failed");
                    app.tui.status_line.notify(format!("Copy failed: {err}"), now);
                }
            }
            vec![]
        }
    }
}

fn handle_tick(tui: &mut TuiState, now: std::time::Instant) -> Vec<UiEffect> {
    tui.now = now;
    tui.spinner_frame = tui.spinner_frame.wrapping_add(1);
    tui.status_line.expire_notice(now);

    let mut effects = Vec::new();
    for mode in [OperationMode::Rephrase, OperationMode::Translate] {
        if let Some(text) = tui.debounce.slot_mut(mode).poll(now) {
            effects.extend(output::run_with_text(tui, mode, &text));
        }
    }
    effects
}

/// Schedules a debounced run of the active mode after an edit.
fn input_changed(tui: &mut TuiState) {
    let mode = tui.session.mode;
    let text = tui.input.text().to_string();
    let now = tui.now;
    tui.debounce.slot_mut(mode).trigger(now, text);
}

/// Re-runs `mode` immediately if it is the active mode and there is input.
fn rerun_if_active(tui: &mut TuiState, mode: OperationMode, changed: bool) -> Vec<UiEffect> {
    if !changed || tui.session.mode != mode || tui.input.text().trim().is_empty() {
        return vec![];
    }
    output::run(tui, mode)
}

/// Applies a logical control event.
pub fn handle_control(tui: &mut TuiState, control: ControlEvent) -> Vec<UiEffect> {
    match control {
        ControlEvent::SetInput(text) => {
            if tui.input.set_text(&text) {
                input_changed(tui);
            }
            vec![]
        }
        ControlEvent::SetMode(mode) => set_mode(tui, mode),
        ControlEvent::ToggleMode => {
            let mode = tui.session.mode.toggled();
            set_mode(tui, mode)
        }
        ControlEvent::SetLanguage(language) => {
            let changed = tui.session.set_language(language);
            rerun_if_active(tui, OperationMode::Rephrase, changed)
        }
        ControlEvent::SetWritingStyle(style) => {
            let changed = tui.session.set_writing_style(style);
            rerun_if_active(tui, OperationMode::Rephrase, changed)
        }
        ControlEvent::SetTone(tone) => {
            let changed = tui.session.set_tone(tone);
            rerun_if_active(tui, OperationMode::Rephrase, changed)
        }
        ControlEvent::SetSourceLang(code) => {
            let changed = tui.session.set_source_lang(code);
            rerun_if_active(tui, OperationMode::Translate, changed)
        }
        ControlEvent::SetTargetLang(code) => {
            let changed = tui.session.set_target_lang(code);
            rerun_if_active(tui, OperationMode::Translate, changed)
        }
        ControlEvent::SwapLanguages => {
            let changed = tui.session.swap_languages();
            rerun_if_active(tui, OperationMode::Translate, changed)
        }
        ControlEvent::Clear => {
            tui.input.clear();
            tui.debounce.cancel_all();
            output::abandon(tui, OperationMode::Rephrase);
            output::abandon(tui, OperationMode::Translate);
            tui.output.clear();
            tui.error_panel.hide();
            vec![]
        }
        ControlEvent::DismissError => {
            tui.error_panel.hide();
            vec![]
        }
        ControlEvent::RefreshUsage => {
            let id = tui.tasks.state_mut(TaskKind::Usage).start(&mut tui.task_seq);
            tui.status_line.usage = UsageDisplay::Loading;
            vec![UiEffect::FetchUsage { id }]
        }
        ControlEvent::CopyOutput => match tui.output.copyable_text() {
            Some(text) => vec![UiEffect::CopyToClipboard { text }],
            None => {
                let now = tui.now;
                tui.status_line.notify("Nothing to copy", now);
                vec![]
            }
        },
        ControlEvent::Quit => {
            tui.should_quit = true;
            vec![UiEffect::Quit]
        }
    }
}

/// Switches mode. The previous mode's pending work is abandoned so its
/// completion cannot land in the shared output panel.
fn set_mode(tui: &mut TuiState, mode: OperationMode) -> Vec<UiEffect> {
    let previous = tui.session.mode;
    if !tui.session.set_mode(mode) {
        return vec![];
    }
    output::abandon(tui, previous);
    output::run(tui, mode)
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if app.overlay.is_none() && app.tui.input.handle_paste(&text) {
                input_changed(&mut app.tui);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(overlay) = &mut app.overlay {
        let update = overlay.handle_key(key);
        if matches!(update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return update
            .controls
            .into_iter()
            .flat_map(|control| handle_control(&mut app.tui, control))
            .collect();
    }

    let tui = &mut app.tui;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let control = match key.code {
        KeyCode::Char('c' | 'q') if ctrl => Some(ControlEvent::Quit),
        KeyCode::Tab => Some(ControlEvent::ToggleMode),
        KeyCode::Char('l') if ctrl => Some(ControlEvent::Clear),
        KeyCode::Char('u') if ctrl => Some(ControlEvent::RefreshUsage),
        KeyCode::Char('y') if ctrl => Some(ControlEvent::CopyOutput),
        KeyCode::Char('x') if ctrl => Some(ControlEvent::SwapLanguages),
        KeyCode::Esc if tui.error_panel.is_visible() => Some(ControlEvent::DismissError),
        _ => None,
    };
    if let Some(control) = control {
        return handle_control(tui, control);
    }

    let picker = match key.code {
        KeyCode::Char('g') if ctrl => Some(match tui.session.mode {
            OperationMode::Rephrase => PickerKind::Language,
            OperationMode::Translate => PickerKind::TargetLang,
        }),
        KeyCode::Char('f') if ctrl => Some(PickerKind::SourceLang),
        KeyCode::Char('s') if ctrl => Some(PickerKind::WritingStyle),
        KeyCode::Char('t') if ctrl => Some(PickerKind::Tone),
        _ => None,
    };
    if let Some(kind) = picker {
        app.overlay = Some(Overlay::OptionPicker(OptionPickerState::open(
            kind,
            &tui.session,
        )));
        return vec![];
    }

    match key.code {
        KeyCode::PageUp if tui.error_panel.is_visible() => tui.error_panel.scroll_up(),
        KeyCode::PageDown if tui.error_panel.is_visible() => tui.error_panel.scroll_down(),
        _ => {
            if tui.input.handle_key(key) {
                input_changed(tui);
            }
        }
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use redraft_core::api::{ApiError, RephraseResponse, TranslateResponse};
    use redraft_core::config::Config;
    use redraft_core::diff::{DiffSegment, Highlight, SegmentKind};
    use redraft_core::options::{Tone, WritingStyle};

    use super::*;
    use crate::common::{TaskCompleted, TaskId};
    use crate::output::{OutputContent, OutputStatus};

    fn app() -> AppState {
        AppState::new(&Config::default())
    }

    fn type_text(app: &mut AppState, text: &str) {
        update(app, UiEvent::Control(ControlEvent::SetInput(text.to_string())));
    }

    fn tick(app: &mut AppState, now: Instant) -> Vec<UiEffect> {
        update(app, UiEvent::Tick { now })
    }

    fn rephrase_done(id: TaskId, original: &str, revised: &str) -> UiEvent {
        UiEvent::RequestCompleted(RequestCompleted::Rephrase {
            original: original.to_string(),
            completed: TaskCompleted {
                id,
                result: Ok(RephraseResponse {
                    rephrased_text: Some(revised.to_string()),
                    detected_language: Some("EN".to_string()),
                    ..Default::default()
                }),
            },
        })
    }

    fn dispatched_id(effects: &[UiEffect]) -> TaskId {
        match effects {
            [UiEffect::Rephrase { id, .. } | UiEffect::Translate { id, .. }] => *id,
            other => panic!("expected a single dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_typing_dispatches_after_quiet_period() {
        let mut app = app();
        let t = Instant::now();
        app.tui.now = t;
        type_text(&mut app, "I are");
        app.tui.now = t + Duration::from_millis(50);
        type_text(&mut app, "I are hap");
        app.tui.now = t + Duration::from_millis(100);
        type_text(&mut app, "I are happy");

        assert!(tick(&mut app, t + Duration::from_millis(499)).is_empty());
        let effects = tick(&mut app, t + Duration::from_millis(500));
        match effects.as_slice() {
            [UiEffect::Rephrase { request, .. }] => assert_eq!(request.text, "I are happy"),
            other => panic!("unexpected effects: {other:?}"),
        }
        assert!(tick(&mut app, t + Duration::from_secs(2)).is_empty());
        assert_eq!(app.tui.output.status, OutputStatus::Pending);
    }

    #[test]
    fn test_end_to_end_rephrase_marks_addition() {
        let mut app = app();
        type_text(&mut app, "I are happy");
        let effects = output::run_rephrase(&mut app.tui);
        let id = dispatched_id(&effects);

        update(&mut app, rephrase_done(id, "I are happy", "I am happy"));

        assert_eq!(app.tui.output.status, OutputStatus::Ready);
        let OutputContent::Rephrased(Highlight::Annotated(segments)) = &app.tui.output.content
        else {
            panic!("expected annotated output, got {:?}", app.tui.output.content);
        };
        assert!(segments.contains(&DiffSegment {
            text: "am".to_string(),
            kind: SegmentKind::Added,
        }));
        assert_eq!(app.tui.output.visible_text().as_deref(), Some("I am happy"));
        assert_eq!(app.tui.session.detected_language.as_deref(), Some("EN"));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut app = app();
        type_text(&mut app, "first");
        let first = dispatched_id(&output::run_rephrase(&mut app.tui));
        type_text(&mut app, "second");
        let second = dispatched_id(&output::run_rephrase(&mut app.tui));
        assert!(second > first);

        update(&mut app, rephrase_done(second, "second", "second!"));
        update(&mut app, rephrase_done(first, "first", "first!"));

        assert_eq!(app.tui.output.visible_text().as_deref(), Some("second!"));
        assert!(!app.tui.tasks.is_any_running());
    }

    fn failed(mode: OperationMode, id: TaskId) -> UiEvent {
        let err = ApiError::upstream(
            500,
            Some("Internal Server Error"),
            r#"{"error":"DeepL API error"}"#,
        );
        UiEvent::RequestCompleted(match mode {
            OperationMode::Rephrase => RequestCompleted::Rephrase {
                original: "hello".to_string(),
                completed: TaskCompleted { id, result: Err(err) },
            },
            OperationMode::Translate => RequestCompleted::Translate(TaskCompleted {
                id,
                result: Err(err),
            }),
        })
    }

    #[test]
    fn test_empty_input_clears_without_request() {
        for mode in [OperationMode::Rephrase, OperationMode::Translate] {
            let mut app = app();
            update(&mut app, UiEvent::Control(ControlEvent::SetMode(mode)));
            type_text(&mut app, "hello");
            let id = dispatched_id(&output::run(&mut app.tui, mode));
            update(&mut app, failed(mode, id));
            assert!(app.tui.error_panel.is_visible(), "{mode:?}");

            type_text(&mut app, "   ");
            assert!(output::run(&mut app.tui, mode).is_empty());
            assert_eq!(app.tui.output.status, OutputStatus::Empty);
            assert!(!app.tui.error_panel.is_visible(), "{mode:?}");

            // An in-flight request is orphaned by emptying the input.
            type_text(&mut app, "hello");
            let id = dispatched_id(&output::run(&mut app.tui, mode));
            type_text(&mut app, "");
            assert!(output::run(&mut app.tui, mode).is_empty());
            update(&mut app, failed(mode, id));
            assert_eq!(app.tui.output.status, OutputStatus::Empty);
            assert!(!app.tui.error_panel.is_visible());
        }
    }

    #[test]
    fn test_immediate_rerun_cancels_pending_debounce() {
        let mut app = app();
        let t = Instant::now();
        app.tui.now = t;
        type_text(&mut app, "hello");
        assert!(app.tui.debounce.is_pending());

        app.tui.now = t + Duration::from_millis(100);
        let effects = update(
            &mut app,
            UiEvent::Control(ControlEvent::SetWritingStyle(WritingStyle::Business)),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::Rephrase { .. }]));

        assert!(tick(&mut app, t + Duration::from_millis(500)).is_empty());
        assert!(tick(&mut app, t + Duration::from_secs(2)).is_empty());
    }

    #[test]
    fn test_mode_switch_cancels_pending_debounce() {
        let mut app = app();
        let t = Instant::now();
        app.tui.now = t;
        type_text(&mut app, "Hallo Welt");

        app.tui.now = t + Duration::from_millis(100);
        let effects = update(&mut app, UiEvent::Control(ControlEvent::ToggleMode));
        assert!(matches!(effects.as_slice(), [UiEffect::Translate { .. }]));

        assert!(tick(&mut app, t + Duration::from_millis(500)).is_empty());
        assert!(tick(&mut app, t + Duration::from_secs(2)).is_empty());
        assert!(!app.tui.debounce.is_pending());
    }

    #[test]
    fn test_upstream_error_shows_reason_and_panel() {
        let mut app = app();
        type_text(&mut app, "hello");
        let id = dispatched_id(&output::run_rephrase(&mut app.tui));

        update(&mut app, failed(OperationMode::Rephrase, id));

        assert_eq!(app.tui.output.status, OutputStatus::Errored);
        assert_eq!(
            app.tui.output.visible_text().as_deref(),
            Some("Error: DeepL API error")
        );
        let json = app.tui.error_panel.contents().unwrap_or_default();
        assert!(json.contains("\"status\": 500"), "{json}");

        update(&mut app, UiEvent::Control(ControlEvent::DismissError));
        assert!(!app.tui.error_panel.is_visible());
    }

    #[test]
    fn test_option_change_reruns_active_mode_only() {
        let mut app = app();
        type_text(&mut app, "hello");

        let effects = update(
            &mut app,
            UiEvent::Control(ControlEvent::SetWritingStyle(WritingStyle::Business)),
        );
        match effects.as_slice() {
            [UiEffect::Rephrase { request, .. }] => {
                assert_eq!(request.writing_style, Some(WritingStyle::Business));
                assert_eq!(request.tone, None);
            }
            other => panic!("unexpected effects: {other:?}"),
        }

        // Same value again is a no-op.
        let effects = update(
            &mut app,
            UiEvent::Control(ControlEvent::SetWritingStyle(WritingStyle::Business)),
        );
        assert!(effects.is_empty());

        // Tone resets the style.
        let effects = update(&mut app, UiEvent::Control(ControlEvent::SetTone(Tone::Friendly)));
        match effects.as_slice() {
            [UiEffect::Rephrase { request, .. }] => {
                assert_eq!(request.writing_style, None);
                assert_eq!(request.tone, Some(Tone::Friendly));
            }
            other => panic!("unexpected effects: {other:?}"),
        }

        // Translate settings change state only while rephrasing.
        let effects = update(
            &mut app,
            UiEvent::Control(ControlEvent::SetTargetLang("DE".to_string())),
        );
        assert!(effects.is_empty());
        assert_eq!(app.tui.session.translate.target_lang, "DE");
    }

    #[test]
    fn test_mode_switch_abandons_previous_mode() {
        let mut app = app();
        type_text(&mut app, "Hallo Welt");
        let rephrase_id = dispatched_id(&output::run_rephrase(&mut app.tui));

        let effects = update(&mut app, UiEvent::Control(ControlEvent::ToggleMode));
        let translate_id = dispatched_id(&effects);
        assert_eq!(app.tui.session.mode, OperationMode::Translate);

        update(&mut app, rephrase_done(rephrase_id, "Hallo Welt", "Hallo, Welt"));
        assert!(app.tui.output.is_pending());

        update(
            &mut app,
            UiEvent::RequestCompleted(RequestCompleted::Translate(TaskCompleted {
                id: translate_id,
                result: Ok(TranslateResponse {
                    translated_text: Some("Hello world".to_string()),
                    detected_language: Some("DE".to_string()),
                }),
            })),
        );
        assert_eq!(app.tui.output.visible_text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_mode_switch_with_empty_input_clears_output() {
        let mut app = app();
        let effects = update(
            &mut app,
            UiEvent::Control(ControlEvent::SetMode(OperationMode::Translate)),
        );
        assert!(effects.is_empty());
        assert_eq!(app.tui.output.status, OutputStatus::Empty);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut app = app();
        let t = Instant::now();
        app.tui.now = t;
        type_text(&mut app, "hello");
        update(&mut app, UiEvent::Control(ControlEvent::Clear));

        assert!(app.tui.input.text().is_empty());
        assert_eq!(app.tui.output.status, OutputStatus::Empty);
        assert!(tick(&mut app, t + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_usage_lookup_updates_status_line() {
        let mut app = app();
        let effects = update(&mut app, UiEvent::Control(ControlEvent::RefreshUsage));
        let [UiEffect::FetchUsage { id }] = effects.as_slice() else {
            panic!("unexpected effects: {effects:?}");
        };
        assert_eq!(app.tui.status_line.usage, UsageDisplay::Loading);

        let err = ApiError::upstream(403, Some("Forbidden"), "nope");
        update(
            &mut app,
            UiEvent::UsageLoaded(TaskCompleted { id: *id, result: Err(err) }),
        );
        assert!(matches!(app.tui.status_line.usage, UsageDisplay::Failed(_)));
        assert!(!app.tui.error_panel.is_visible());
    }

    #[test]
    fn test_copy_without_result_notifies() {
        let mut app = app();
        let effects = update(&mut app, UiEvent::Control(ControlEvent::CopyOutput));
        assert!(effects.is_empty());
        assert!(app.tui.status_line.has_pending_notice());
    }

    #[test]
    fn test_picker_selection_applies_control() {
        let mut app = app();
        type_text(&mut app, "hello");
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));

        update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('t'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(app.overlay.is_some());

        for ch in "friendly".chars() {
            update(&mut app, UiEvent::Terminal(key(KeyCode::Char(ch))));
        }
        let effects = update(&mut app, UiEvent::Terminal(key(KeyCode::Enter)));

        assert!(app.overlay.is_none());
        assert_eq!(app.tui.session.rephrase.tone, Tone::Friendly);
        assert!(matches!(effects.as_slice(), [UiEffect::Rephrase { .. }]));
        assert_eq!(app.tui.input.text(), "hello");
    }
}
