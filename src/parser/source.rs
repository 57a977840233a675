use crate::base::{LineIndex, SourceLocation};

/// Seekable character source over one document.
///
/// `position` is a byte offset that always sits on a character boundary.
#[derive(Debug, Clone)]
pub struct SourceReader {
    text: String,
    index: LineIndex,
    position: usize,
}

impl SourceReader {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            index: LineIndex::new(&text),
            text,
            position: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves to `position`, clamped to the end and backed up to a char boundary.
    pub fn set_position(&mut self, position: usize) {
        let mut position = position.min(self.text.len());
        while !self.text.is_char_boundary(position) {
            position -= 1;
        }
        self.position = position;
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.text.len()
    }

    pub fn rest(&self) -> &str {
        &self.text[self.position..]
    }

    pub fn location(&self) -> SourceLocation {
        self.location_at(self.position)
    }

    pub fn location_at(&self, offset: usize) -> SourceLocation {
        self.index.location(&self.text, offset)
    }
}
