//! Pure view functions for the TUI.
//!
//! Everything here takes `&AppState`, draws to a ratatui `Frame`, and never
//! mutates state or returns effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;
use crate::error_panel::render_error_panel;
use crate::input::render_input;
use crate::output::render_output;
use crate::overlays::OverlayExt;
use crate::overlays::render_utils::{InputHint, hint_line};
use crate::session::OperationMode;
use crate::state::AppState;
use crate::statusline::render_status_line;

const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const HINTS_HEIGHT: u16 = 1;
/// Error panel share of the body when visible, in percent.
const ERROR_PANEL_PERCENT: u16 = 35;

fn hints(mode: OperationMode) -> Vec<InputHint<'static>> {
    let mut hints = vec![
        InputHint::new("Tab", "mode"),
        InputHint::new("^G", match mode {
            OperationMode::Rephrase => "language",
            OperationMode::Translate => "target",
        }),
    ];
    match mode {
        OperationMode::Rephrase => {
            hints.push(InputHint::new("^S", "style"));
            hints.push(InputHint::new("^T", "tone"));
        }
        OperationMode::Translate => {
            hints.push(InputHint::new("^F", "source"));
            hints.push(InputHint::new("^X", "swap"));
        }
    }
    hints.extend([
        InputHint::new("^Y", "copy"),
        InputHint::new("^L", "clear"),
        InputHint::new("^U", "usage"),
        InputHint::new("^Q", "quit"),
    ]);
    hints
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let url = truncate_with_ellipsis(&app.tui.proxy_url, usize::from(area.width / 2));
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                " redraft ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {url}"), Style::default().fg(Color::DarkGray)),
        ])),
        area,
    );
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let tui = &app.tui;

    let [header, body, status, hint_row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(4),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(HINTS_HEIGHT),
        ])
        .areas(area);

    render_header(app, frame, header);

    let (panes, error_area) = if tui.error_panel.is_visible() {
        let [panes, error] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(100 - ERROR_PANEL_PERCENT),
                Constraint::Percentage(ERROR_PANEL_PERCENT),
            ])
            .areas(body);
        (panes, Some(error))
    } else {
        (body, None)
    };

    // Side by side when wide enough, stacked otherwise.
    let direction = if panes.width >= 80 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let [input_area, output_area] = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .areas(panes);

    render_input(
        &tui.input,
        tui.session.mode,
        app.overlay.is_none(),
        frame,
        input_area,
    );
    render_output(&tui.output, tui.spinner_frame, frame, output_area);
    if let Some(error_area) = error_area {
        render_error_panel(&tui.error_panel, frame, error_area);
    }

    render_status_line(tui, frame, status);
    frame.render_widget(
        Paragraph::new(hint_line(&hints(tui.session.mode), Color::Cyan)),
        hint_row,
    );

    app.overlay.render(frame, area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use redraft_core::config::Config;

    use super::*;
    use crate::events::ControlEvent;
    use crate::update::handle_control;

    fn screen(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_mode_and_placeholder() {
        let mut app = AppState::new(&Config::default());
        let text = screen(&app, 100, 20);
        assert!(text.contains("Rephrase"));
        assert!(text.contains("Type or paste text here"));

        handle_control(&mut app.tui, ControlEvent::ToggleMode);
        let text = screen(&app, 100, 20);
        assert!(text.contains("Translate"));
        assert!(text.contains("source"));
    }
}
