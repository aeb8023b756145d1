//! The accumulated text buffer.  Append and delete only.

use crate::config::DeleteMode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// `true` when the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Append a single space unless the text already ends in one.
    ///
    /// Returns `true` if a space was added.
    pub fn push_space(&mut self) -> bool {
        if self.text.ends_with(' ') {
            return false;
        }
        self.text.push(' ');
        true
    }

    /// Apply a DELETE.  No-op on empty text.
    ///
    /// * [`DeleteMode::Character`] removes the last character.
    /// * [`DeleteMode::Word`] removes a trailing space if there is one;
    ///   otherwise it cuts back to (and keeps) the last space, or empties
    ///   the text when it holds a single word.
    pub fn delete(&mut self, mode: DeleteMode) {
        if self.text.is_empty() {
            return;
        }
        match mode {
            DeleteMode::Character => {
                self.text.pop();
            }
            DeleteMode::Word => {
                if self.text.ends_with(' ') {
                    self.text.pop();
                } else if let Some(idx) = self.text.rfind(' ') {
                    self.text.truncate(idx + 1);
                } else {
                    self.text.clear();
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(s: &str) -> TextBuffer {
        let mut b = TextBuffer::new();
        b.push_str(s);
        b
    }

    #[test]
    fn push_space_never_doubles() {
        let mut b = buf("HI");
        assert!(b.push_space());
        assert!(!b.push_space());
        assert_eq!(b.as_str(), "HI ");
    }

    #[test]
    fn push_space_on_empty_text() {
        let mut b = TextBuffer::new();
        assert!(b.push_space());
        assert_eq!(b.as_str(), " ");
        assert!(b.is_blank());
    }

    #[test]
    fn word_delete_removes_trailing_space_first() {
        let mut b = buf("hello there ");
        b.delete(DeleteMode::Word);
        assert_eq!(b.as_str(), "hello there");
        b.delete(DeleteMode::Word);
        assert_eq!(b.as_str(), "hello ");
        b.delete(DeleteMode::Word);
        assert_eq!(b.as_str(), "hello");
        b.delete(DeleteMode::Word);
        assert_eq!(b.as_str(), "");
    }

    #[test]
    fn character_delete() {
        let mut b = buf("AB");
        b.delete(DeleteMode::Character);
        assert_eq!(b.as_str(), "A");
        b.delete(DeleteMode::Character);
        b.delete(DeleteMode::Character);
        assert_eq!(b.as_str(), "");
    }

    #[test]
    fn delete_on_empty_is_noop() {
        let mut b = TextBuffer::new();
        b.delete(DeleteMode::Word);
        b.delete(DeleteMode::Character);
        assert_eq!(b.as_str(), "");
    }
}
