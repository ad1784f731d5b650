use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Centers a `width` x `height` box inside `area`, clamped to fit.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

pub struct OverlayLayout {
    pub popup: Rect,
    pub body: Rect,
}

/// Clears the popup area, draws border, title and hint footer, and returns
/// the remaining body area.
pub fn render_overlay(frame: &mut Frame, area: Rect, config: &OverlayConfig<'_>) -> OverlayLayout {
    let popup = calculate_overlay_area(area, config.width, config.height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(config.border_color))
            .title(format!(" {} ", config.title))
            .title_style(
                Style::default()
                    .fg(config.border_color)
                    .add_modifier(Modifier::BOLD),
            ),
        popup,
    );

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );
    if !config.hints.is_empty() {
        render_hints(frame, inner, config.hints, config.border_color);
    }
    let footer_height = u16::from(!config.hints.is_empty());
    let body = Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(footer_height),
    );

    OverlayLayout { popup, body }
}

pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders `key action • key action` on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight: Color) {
    let row = Rect::new(area.x, area.y + area.height.saturating_sub(1), area.width, 1);
    frame.render_widget(
        Paragraph::new(hint_line(hints, highlight)).alignment(Alignment::Center),
        row,
    );
}

pub fn hint_line(hints: &[InputHint], highlight: Color) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            hint.key.to_string(),
            Style::default().fg(highlight),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_area_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(calculate_overlay_area(area, 40, 10), Rect::new(30, 15, 40, 10));

        let small = Rect::new(0, 0, 20, 8);
        let popup = calculate_overlay_area(small, 40, 20);
        assert_eq!((popup.width, popup.height), (16, 6));
    }
}
