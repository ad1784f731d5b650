//! Inspection panel for the last failed request.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use redraft_core::api::ErrorRecord;

#[derive(Debug, Clone, Default)]
pub struct ErrorPanelState {
    record: Option<ErrorRecord>,
    pub scroll: u16,
}

impl ErrorPanelState {
    pub fn show(&mut self, record: ErrorRecord) {
        self.record = Some(record);
        self.scroll = 0;
    }

    pub fn hide(&mut self) {
        self.record = None;
        self.scroll = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.record.is_some()
    }

    /// Pretty JSON of the record, if visible.
    pub fn contents(&self) -> Option<String> {
        self.record.as_ref().map(ErrorRecord::to_pretty_json)
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let lines = self.contents().map_or(0, |c| c.lines().count());
        if usize::from(self.scroll) + 1 < lines {
            self.scroll += 1;
        }
    }
}

pub fn render_error_panel(panel: &ErrorPanelState, frame: &mut Frame, area: Rect) {
    let Some(contents) = panel.contents() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Error details ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(vec![
            Span::styled(" Esc", Style::default().fg(Color::Red)),
            Span::styled(" close • ", Style::default().fg(Color::DarkGray)),
            Span::styled("PgUp/PgDn", Style::default().fg(Color::Red)),
            Span::styled(" scroll ", Style::default().fg(Color::DarkGray)),
        ]));

    let lines: Vec<Line> = contents
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Gray))))
        .collect();

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((panel.scroll, 0));
    frame.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_hide() {
        let mut panel = ErrorPanelState::default();
        assert!(!panel.is_visible());

        panel.show(ErrorRecord::from_response(500, None, r#"{"error":"boom"}"#));
        assert!(panel.is_visible());
        assert!(panel.contents().unwrap().contains(r#""status": 500"#));

        panel.scroll_down();
        panel.hide();
        assert!(panel.contents().is_none());
        assert_eq!(panel.scroll, 0);
    }
}
