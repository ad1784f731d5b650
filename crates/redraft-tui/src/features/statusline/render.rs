use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use redraft_core::options;

use crate::common::truncate_with_ellipsis;
use crate::session::OperationMode;
use crate::state::TuiState;

const SEPARATOR: &str = " │ ";

fn option_spans(tui: &TuiState) -> Vec<Span<'static>> {
    let key = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Cyan);
    let session = &tui.session;

    match session.mode {
        OperationMode::Rephrase => {
            let cfg = &session.rephrase;
            let mut spans = vec![
                Span::styled("lang ", key),
                Span::styled(cfg.language.display_name(), value),
            ];
            if !cfg.writing_style.is_default() {
                spans.push(Span::styled("  style ", key));
                spans.push(Span::styled(cfg.writing_style.to_string(), value));
            }
            if !cfg.tone.is_default() {
                spans.push(Span::styled("  tone ", key));
                spans.push(Span::styled(cfg.tone.to_string(), value));
            }
            spans
        }
        OperationMode::Translate => {
            let cfg = &session.translate;
            let source = cfg.source_lang.as_deref().unwrap_or("auto");
            vec![
                Span::styled(source.to_string(), value),
                Span::styled(" → ", key),
                Span::styled(cfg.target_lang.clone(), value),
            ]
        }
    }
}

/// Renders the bottom status line: mode, options, detected language, usage.
pub fn render_status_line(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let mode_style = Style::default()
        .fg(Color::Black)
        .bg(match tui.session.mode {
            OperationMode::Rephrase => Color::Magenta,
            OperationMode::Translate => Color::Blue,
        })
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut left = vec![
        Span::styled(format!(" {} ", tui.session.mode.label()), mode_style),
        Span::raw(" "),
    ];
    left.extend(option_spans(tui));

    if let Some(detected) = &tui.session.detected_language {
        let name = options::language_name(detected).unwrap_or(detected.as_str());
        left.push(Span::styled(SEPARATOR, dim));
        left.push(Span::styled("detected ", dim));
        left.push(Span::styled(name.to_string(), Style::default().fg(Color::Yellow)));
    }

    if let Some(notice) = &tui.status_line.notice {
        left.push(Span::styled(SEPARATOR, dim));
        left.push(Span::styled(
            notice.text.clone(),
            Style::default().fg(Color::Green),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(left)), area);

    let usage = truncate_with_ellipsis(
        &tui.status_line.usage.label(),
        usize::from(area.width / 2),
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("{usage} "), dim)))
            .alignment(Alignment::Right),
        area,
    );
}
