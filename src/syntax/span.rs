use std::fmt;

use super::edit::EditHandler;
use super::generators::SpanChunkGenerator;
use super::kinds::SpanKind;
use crate::base::{SourceLocation, TextRange, TextSize};
use crate::parser::Symbol;

/// Leaf of the syntax tree: a contiguous run of accepted symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub kind: SpanKind,
    pub symbols: Vec<Symbol>,
    pub start: SourceLocation,
    /// Concatenated text of `symbols`
    pub content: String,
    pub chunk_generator: SpanChunkGenerator,
    pub edit_handler: EditHandler,
}

impl Span {
    /// Length of the span in bytes.
    pub fn length(&self) -> usize {
        self.content.len()
    }

    pub fn end(&self) -> usize {
        self.start.absolute + self.content.len()
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.start.offset(), TextSize::new(self.content.len() as u32))
    }

    /// Whether every symbol is whitespace or a line break.
    pub fn is_whitespace_only(&self) -> bool {
        !self.content.is_empty() && self.content.chars().all(char::is_whitespace)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Span at {}::{} - [{}]",
            self.kind,
            self.start,
            self.length(),
            self.content
        )
    }
}
