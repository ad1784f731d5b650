//! Output panel view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use redraft_core::diff::{Highlight, SegmentKind};

use super::state::{OutputContent, OutputState, OutputStatus};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn added_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Pushes `text` onto `lines` as `style`d spans, starting a new line at
/// each `\n`.
fn push_styled(lines: &mut Vec<Line<'static>>, text: &str, style: Style) {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 || lines.is_empty() {
            lines.push(Line::default());
        }
        if !part.is_empty()
            && let Some(line) = lines.last_mut()
        {
            line.spans.push(Span::styled(part.to_string(), style));
        }
    }
}

/// Styled lines for a rephrase result: additions highlighted, removals
/// skipped.
pub fn highlight_lines(highlight: &Highlight) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match highlight {
        Highlight::Unchanged(text) | Highlight::Plain(text) => {
            push_styled(&mut lines, text, Style::default());
        }
        Highlight::Annotated(segments) => {
            for segment in segments {
                let style = match segment.kind {
                    SegmentKind::Unchanged => Style::default(),
                    SegmentKind::Added => added_style(),
                    SegmentKind::Removed => continue,
                };
                push_styled(&mut lines, &segment.text, style);
            }
        }
    }
    lines
}

pub fn render_output(output: &OutputState, spinner_frame: usize, frame: &mut Frame, area: Rect) {
    let border = match output.status {
        OutputStatus::Errored => Color::Red,
        OutputStatus::Pending => Color::Yellow,
        OutputStatus::Ready | OutputStatus::Empty => Color::DarkGray,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Output ");

    let lines = match &output.content {
        OutputContent::None => vec![Line::from(Span::styled(
            "Start typing to see results.",
            Style::default().fg(Color::DarkGray),
        ))],
        OutputContent::Placeholder(text) => {
            let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
            vec![Line::from(vec![
                Span::styled(format!("{spinner} "), Style::default().fg(Color::Yellow)),
                Span::styled(
                    *text,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ])]
        }
        OutputContent::Rephrased(highlight) => highlight_lines(highlight),
        OutputContent::Text(text) => {
            let mut lines = Vec::new();
            push_styled(&mut lines, text, Style::default());
            lines
        }
        OutputContent::Error(text) => vec![Line::from(Span::styled(
            text.clone(),
            Style::default().fg(Color::Red),
        ))],
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use redraft_core::diff::highlight;

    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_removed_words_are_not_rendered() {
        let lines = highlight_lines(&highlight("I are happy", "I am happy"));
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "I am happy");

        let added: Vec<_> = lines[0]
            .spans
            .iter()
            .filter(|s| s.style == added_style())
            .collect();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].content, "am");
    }

    #[test]
    fn test_newlines_split_lines() {
        let lines = highlight_lines(&highlight("a\nb", "a\nc"));
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }
}
