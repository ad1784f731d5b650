//! List picker for rephrase options and translation languages.
//!
//! Typing filters the list by name or code; Enter emits the matching
//! control event.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use redraft_core::options::{
    RephraseLanguage, SOURCE_LANGUAGES, TARGET_LANGUAGES, Tone, WritingStyle,
};

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use crate::events::ControlEvent;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Language,
    WritingStyle,
    Tone,
    SourceLang,
    TargetLang,
}

impl PickerKind {
    pub fn title(self) -> &'static str {
        match self {
            PickerKind::Language => "Rephrase Language",
            PickerKind::WritingStyle => "Writing Style",
            PickerKind::Tone => "Tone",
            PickerKind::SourceLang => "Source Language",
            PickerKind::TargetLang => "Target Language",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerValue {
    Language(RephraseLanguage),
    WritingStyle(WritingStyle),
    Tone(Tone),
    Source(Option<&'static str>),
    Target(&'static str),
}

impl PickerValue {
    fn into_control(self) -> ControlEvent {
        match self {
            PickerValue::Language(l) => ControlEvent::SetLanguage(l),
            PickerValue::WritingStyle(s) => ControlEvent::SetWritingStyle(s),
            PickerValue::Tone(t) => ControlEvent::SetTone(t),
            PickerValue::Source(code) => ControlEvent::SetSourceLang(code.map(str::to_string)),
            PickerValue::Target(code) => ControlEvent::SetTargetLang(code.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PickerItem {
    pub label: String,
    pub code: String,
    pub value: PickerValue,
}

impl PickerItem {
    fn new(label: impl Into<String>, code: impl Into<String>, value: PickerValue) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
            value,
        }
    }

    fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.label.to_lowercase().contains(&filter) || self.code.to_lowercase().contains(&filter)
    }
}

#[derive(Debug, Clone)]
pub struct OptionPickerState {
    pub kind: PickerKind,
    pub items: Vec<PickerItem>,
    pub filter: String,
    /// Index into the filtered list.
    pub selected: usize,
}

fn title_case(wire: &str) -> String {
    wire.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl OptionPickerState {
    /// Opens a picker with the session's current value preselected.
    pub fn open(kind: PickerKind, session: &SessionState) -> Self {
        let items: Vec<PickerItem> = match kind {
            PickerKind::Language => RephraseLanguage::all()
                .iter()
                .map(|&l| PickerItem::new(l.display_name(), l.as_str(), PickerValue::Language(l)))
                .collect(),
            PickerKind::WritingStyle => WritingStyle::all()
                .iter()
                .map(|&s| {
                    PickerItem::new(
                        title_case(s.as_str()),
                        s.as_str(),
                        PickerValue::WritingStyle(s),
                    )
                })
                .collect(),
            PickerKind::Tone => Tone::all()
                .iter()
                .map(|&t| PickerItem::new(title_case(t.as_str()), t.as_str(), PickerValue::Tone(t)))
                .collect(),
            PickerKind::SourceLang => std::iter::once(PickerItem::new(
                "Auto-detect",
                "auto",
                PickerValue::Source(None),
            ))
            .chain(
                SOURCE_LANGUAGES
                    .iter()
                    .map(|l| PickerItem::new(l.name, l.code, PickerValue::Source(Some(l.code)))),
            )
            .collect(),
            PickerKind::TargetLang => TARGET_LANGUAGES
                .iter()
                .map(|l| PickerItem::new(l.name, l.code, PickerValue::Target(l.code)))
                .collect(),
        };

        let current = match kind {
            PickerKind::Language => Some(PickerValue::Language(session.rephrase.language)),
            PickerKind::WritingStyle => {
                Some(PickerValue::WritingStyle(session.rephrase.writing_style))
            }
            PickerKind::Tone => Some(PickerValue::Tone(session.rephrase.tone)),
            PickerKind::SourceLang | PickerKind::TargetLang => None,
        };
        let current_code = match kind {
            PickerKind::SourceLang => Some(
                session
                    .translate
                    .source_lang
                    .clone()
                    .unwrap_or_else(|| "auto".to_string()),
            ),
            PickerKind::TargetLang => Some(session.translate.target_lang.clone()),
            _ => None,
        };

        let selected = items
            .iter()
            .position(|item| {
                current.as_ref() == Some(&item.value)
                    || current_code
                        .as_deref()
                        .is_some_and(|code| item.code.eq_ignore_ascii_case(code))
            })
            .unwrap_or(0);

        Self {
            kind,
            items,
            filter: String::new(),
            selected,
        }
    }

    pub fn visible(&self) -> Vec<&PickerItem> {
        self.items
            .iter()
            .filter(|item| self.filter.is_empty() || item.matches(&self.filter))
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let count = self.visible().len();

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::PageUp => {
                self.selected = self.selected.saturating_sub(10);
                OverlayUpdate::stay()
            }
            KeyCode::PageDown => {
                self.selected = (self.selected + 10).min(count.saturating_sub(1));
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.selected = 0;
                OverlayUpdate::stay()
            }
            KeyCode::Char(ch) if !ctrl => {
                self.filter.push(ch);
                self.selected = 0;
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                let Some(item) = self.visible().get(self.selected).copied() else {
                    return OverlayUpdate::stay();
                };
                OverlayUpdate::close().with_controls(vec![item.value.clone().into_control()])
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let visible = self.visible();
        let hints = [
            InputHint::new("↑↓", "navigate"),
            InputHint::new("Enter", "select"),
            InputHint::new("Esc", "cancel"),
        ];
        let height = (visible.len().min(12) as u16 + 5).max(8);
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: self.kind.title(),
                border_color: Color::Magenta,
                width: 44,
                height,
                hints: &hints,
            },
        );
        let body = layout.body;

        let filter_line = if self.filter.is_empty() {
            Line::from(Span::styled(
                "type to filter",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Magenta)),
                Span::raw(self.filter.clone()),
            ])
        };
        frame.render_widget(
            Paragraph::new(filter_line),
            Rect::new(body.x, body.y, body.width, 1),
        );

        let list_area = Rect::new(
            body.x,
            body.y + 1,
            body.width,
            body.height.saturating_sub(2),
        );
        let code_width = 7;
        let items: Vec<ListItem> = visible
            .iter()
            .map(|item| {
                let label_width = usize::from(list_area.width.saturating_sub(2 + code_width + 1));
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<label_width$}", item.label),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:>width$}", item.code, width = usize::from(code_width)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::Magenta)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default();
        if !visible.is_empty() {
            list_state.select(Some(self.selected));
        }
        frame.render_stateful_widget(list, list_area, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_opens_on_current_value() {
        let mut session = SessionState::default();
        session.set_tone(Tone::Confident);
        let picker = OptionPickerState::open(PickerKind::Tone, &session);
        assert_eq!(picker.items[picker.selected].value, PickerValue::Tone(Tone::Confident));

        let picker = OptionPickerState::open(PickerKind::TargetLang, &session);
        assert_eq!(picker.items[picker.selected].code, "EN-US");

        let picker = OptionPickerState::open(PickerKind::SourceLang, &session);
        assert_eq!(picker.items[picker.selected].value, PickerValue::Source(None));
    }

    #[test]
    fn test_filter_then_enter_emits_control() {
        let session = SessionState::default();
        let mut picker = OptionPickerState::open(PickerKind::TargetLang, &session);
        for ch in "germ".chars() {
            picker.handle_key(key(KeyCode::Char(ch)));
        }
        assert_eq!(picker.visible().len(), 1);

        let update = picker.handle_key(key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert_eq!(
            update.controls,
            vec![ControlEvent::SetTargetLang("DE".to_string())]
        );
    }

    #[test]
    fn test_esc_closes_without_controls() {
        let session = SessionState::default();
        let mut picker = OptionPickerState::open(PickerKind::WritingStyle, &session);
        let update = picker.handle_key(key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(update.controls.is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("prefer_business"), "Prefer Business");
        assert_eq!(title_case("default"), "Default");
    }
}
