//! Width-aware text helpers for rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates to `max_width` terminal columns, ending with `…` when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Result of hard-wrapping a buffer at a fixed column width.
#[derive(Debug, PartialEq, Eq)]
pub struct Wrapped {
    pub rows: Vec<String>,
    /// Visual (row, column) of the cursor.
    pub cursor: (usize, usize),
}

/// Hard-wraps `lines` at `width` columns, tracking where a cursor at
/// logical `(row, col)` (chars) ends up.
pub fn wrap_with_cursor(lines: &[&str], width: usize, cursor: (usize, usize)) -> Wrapped {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut visual_cursor = (0, 0);

    for (line_idx, line) in lines.iter().enumerate() {
        let mut current = String::new();
        let mut current_width = 0;

        for (col, ch) in line.chars().enumerate() {
            let w = ch.width().unwrap_or(0);
            if current_width + w > width && current_width > 0 {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if line_idx == cursor.0 && col == cursor.1 {
                visual_cursor = (rows.len(), current_width);
            }
            current.push(ch);
            current_width += w;
        }

        if line_idx == cursor.0 && cursor.1 >= line.chars().count() {
            if current_width >= width {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            visual_cursor = (rows.len(), current_width);
        }
        rows.push(current);
    }

    Wrapped {
        rows,
        cursor: visual_cursor,
    }
}

/// Expands tabs and drops every other control character except `\n` from
/// text received over the wire.
pub fn sanitize_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\t' => out.push_str("    "),
            '\n' => out.push('\n'),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
