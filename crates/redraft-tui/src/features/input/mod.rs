//! Input feature slice: the source-text editor.

mod render;
mod text_buffer;

use crossterm::event::KeyEvent;
pub use render::render_input;
pub use text_buffer::TextBuffer;

#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub buffer: TextBuffer,
}

impl InputState {
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Replaces the text. Returns true if it differs from before.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.buffer.text() == text {
            return false;
        }
        self.buffer.set_text(text);
        true
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Applies an editing key. Returns true if the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.buffer.input(key)
    }

    /// Inserts pasted text at the cursor.
    pub fn handle_paste(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.buffer.insert_str(text);
        true
    }
}
