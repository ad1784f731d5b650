//! Input panel view.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::InputState;
use crate::common::wrap_with_cursor;
use crate::session::OperationMode;

pub fn render_input(
    input: &InputState,
    mode: OperationMode,
    focused: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let title = match mode {
        OperationMode::Rephrase => " Text to rephrase ",
        OperationMode::Translate => " Text to translate ",
    };
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if input.buffer.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Type or paste text here…",
                Style::default().fg(Color::DarkGray),
            ))),
            inner,
        );
        if focused {
            frame.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    let lines = input.buffer.lines();
    let wrapped = wrap_with_cursor(&lines, usize::from(inner.width), input.buffer.cursor());

    // Keep the cursor row visible.
    let height = usize::from(inner.height.max(1));
    let top = wrapped.cursor.0.saturating_sub(height - 1);

    let visible: Vec<Line> = wrapped
        .rows
        .iter()
        .skip(top)
        .take(height)
        .map(|row| Line::from(row.clone()))
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);

    if focused {
        let (row, col) = wrapped.cursor;
        frame.set_cursor_position(Position::new(
            inner.x + col as u16,
            inner.y + (row - top) as u16,
        ));
    }
}
