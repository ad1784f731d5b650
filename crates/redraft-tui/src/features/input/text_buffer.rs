//! Multi-line editing buffer for the source text.
//!
//! Text is stored as one `String` with the cursor as a char offset; row and
//! column are derived when rendering.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    /// Cursor position in chars from the start of `text`.
    cursor: usize,
}

impl TextBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.replace("\r\n", "\n");
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Cursor as (row, col) in chars.
    pub fn cursor(&self) -> (usize, usize) {
        let before: String = self.text.chars().take(self.cursor).collect();
        let row = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map_or(0, |line| line.chars().count());
        (row, col)
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    pub fn insert_str(&mut self, s: &str) {
        let s = s.replace("\r\n", "\n");
        let idx = self.byte_index(self.cursor);
        self.text.insert_str(idx, &s);
        self.cursor += s.chars().count();
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn delete_prev_char(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.remove_range(self.cursor - 1, self.cursor);
        self.cursor -= 1;
        true
    }

    pub fn delete_next_char(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        self.remove_range(self.cursor, self.cursor + 1);
        true
    }

    /// Deletes the run of same-class characters left of the cursor
    /// (whitespace, word characters, or punctuation).
    pub fn delete_word_left(&mut self) -> bool {
        let start = self.word_left_target();
        if start == self.cursor {
            return false;
        }
        self.remove_range(start, self.cursor);
        self.cursor = start;
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_word_left(&mut self) {
        self.cursor = self.word_left_target();
    }

    pub fn move_word_right(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut idx = self.cursor;
        if idx >= chars.len() {
            return;
        }
        let class = char_class(chars[idx]);
        while idx < chars.len() && char_class(chars[idx]) == class {
            idx += 1;
        }
        self.cursor = idx;
    }

    pub fn move_line_start(&mut self) {
        let (_, col) = self.cursor();
        self.cursor -= col;
    }

    pub fn move_line_end(&mut self) {
        let rest = self.text.chars().skip(self.cursor);
        let to_end = rest.take_while(|&c| c != '\n').count();
        self.cursor += to_end;
    }

    pub fn move_up(&mut self) {
        let (row, col) = self.cursor();
        if row > 0 {
            self.set_cursor(row - 1, col);
        }
    }

    pub fn move_down(&mut self) {
        let (row, col) = self.cursor();
        if row + 1 < self.lines().len() {
            self.set_cursor(row + 1, col);
        }
    }

    /// Applies an editing key. Returns true if the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.kind, KeyEventKind::Release) {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('w') if ctrl => self.delete_word_left(),
            KeyCode::Char(ch) if !ctrl && !alt => {
                self.insert_char(ch);
                true
            }
            KeyCode::Enter => {
                self.insert_char('\n');
                true
            }
            KeyCode::Backspace if alt || ctrl => self.delete_word_left(),
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left if alt || ctrl => {
                self.move_word_left();
                false
            }
            KeyCode::Right if alt || ctrl => {
                self.move_word_right();
                false
            }
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Up => {
                self.move_up();
                false
            }
            KeyCode::Down => {
                self.move_down();
                false
            }
            KeyCode::Home => {
                self.move_line_start();
                false
            }
            KeyCode::End => {
                self.move_line_end();
                false
            }
            _ => false,
        }
    }

    fn set_cursor(&mut self, row: usize, col: usize) {
        let mut offset = 0;
        for (i, line) in self.text.split('\n').enumerate() {
            let len = line.chars().count();
            if i == row {
                self.cursor = offset + col.min(len);
                return;
            }
            offset += len + 1;
        }
    }

    fn word_left_target(&self) -> usize {
        let chars: Vec<char> = self.text.chars().take(self.cursor).collect();
        let mut idx = chars.len();
        if idx == 0 {
            return 0;
        }
        let class = char_class(chars[idx - 1]);
        while idx > 0 && char_class(chars[idx - 1]) == class {
            idx -= 1;
        }
        idx
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        let start = self.byte_index(start);
        let end = self.byte_index(end);
        self.text.replace_range(start..end, "");
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CharClass {
    Whitespace,
    Word,
    Punct,
}

fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}
