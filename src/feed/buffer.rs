//! The pending note buffer
//!
//! The capture core does not own a text widget. It talks to whatever holds
//! the pending note through `NoteBuffer`.

/// Text surface the user types the pending note into
pub trait NoteBuffer {
    /// Full current contents
    fn current_text(&self) -> String;

    /// Remove all contents
    fn clear(&mut self);

    /// Insert `text` at the cursor and move the cursor past it
    fn insert_at_cursor(&mut self, text: &str);

    fn is_blank(&self) -> bool {
        self.current_text().trim().is_empty()
    }
}

/// In-memory buffer with a byte-offset cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamping to the text and snapping back to a char boundary
    pub fn set_cursor(&mut self, pos: usize) {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        self.cursor = pos;
    }

    /// Replace the whole contents, leaving the cursor at the end
    pub fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }
}

impl NoteBuffer for TextBuffer {
    fn current_text(&self) -> String {
        self.text.clone()
    }

    fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn insert_at_cursor(&mut self, text: &str) {
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_cursor() {
        let mut buffer = TextBuffer::with_text("hello world");
        buffer.set_cursor(5);
        buffer.insert_at_cursor(",");
        buffer.insert_at_cursor(" big");

        assert_eq!(buffer.current_text(), "hello, big world");
        assert_eq!(buffer.cursor(), 10);
    }

    #[test]
    fn test_set_cursor_snaps_to_char_boundary() {
        let mut buffer = TextBuffer::with_text("añb");
        buffer.set_cursor(2);
        assert_eq!(buffer.cursor(), 1);
        buffer.set_cursor(100);
        assert_eq!(buffer.cursor(), 4);
    }

    #[test]
    fn test_clear_and_blank() {
        let mut buffer = TextBuffer::with_text(" \n\t");
        assert!(buffer.is_blank());
        buffer.insert_at_cursor("x");
        assert!(!buffer.is_blank());
        buffer.clear();
        assert_eq!(buffer.current_text(), "");
        assert_eq!(buffer.cursor(), 0);
    }
}
