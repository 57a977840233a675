use std::fmt;

use smol_str::SmolStr;

use super::errors::RazorDiagnostic;
use super::keywords::Keyword;
use super::syntax_kind::SyntaxKind;
use crate::base::{SourceLocation, TextRange, TextSize};

/// A classified token with its text and where it starts.
///
/// Lexical problems (an unterminated string, say) travel with the symbol and
/// reach the session diagnostics when the symbol is accepted into a span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub kind: SyntaxKind,
    /// Set for `KEYWORD` symbols only
    pub keyword: Option<Keyword>,
    pub text: SmolStr,
    pub start: SourceLocation,
    pub errors: Vec<RazorDiagnostic>,
}

impl Symbol {
    pub fn new(kind: SyntaxKind, text: impl Into<SmolStr>, start: SourceLocation) -> Self {
        Self {
            kind,
            keyword: None,
            text: text.into(),
            start,
            errors: Vec::new(),
        }
    }

    pub fn keyword(keyword: Keyword, text: impl Into<SmolStr>, start: SourceLocation) -> Self {
        Self {
            keyword: Some(keyword),
            ..Self::new(SyntaxKind::KEYWORD, text, start)
        }
    }

    /// An empty symbol standing in for content that is not there.
    pub fn marker(start: SourceLocation) -> Self {
        Self::new(SyntaxKind::UNKNOWN, "", start)
    }

    pub fn with_error(mut self, error: RazorDiagnostic) -> Self {
        self.errors.push(error);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset one past the last byte of the symbol.
    pub fn end(&self) -> usize {
        self.start.absolute + self.text.len()
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.start.offset(), TextSize::new(self.text.len() as u32))
    }

    /// Splits after `at` bytes; the head keeps the lexical errors.
    ///
    /// The tail is `None` when `at` covers the whole symbol.
    pub fn split(&self, at: usize, head_kind: SyntaxKind) -> (Symbol, Option<Symbol>) {
        let at = at.min(self.text.len());
        let head_text = &self.text[..at];
        let head = Symbol {
            kind: head_kind,
            keyword: None,
            text: SmolStr::new(head_text),
            start: self.start,
            errors: self.errors.clone(),
        };
        let tail = (at < self.text.len()).then(|| Symbol {
            kind: self.kind,
            keyword: None,
            text: SmolStr::new(&self.text[at..]),
            start: self.start.advance(head_text),
            errors: Vec::new(),
        });
        (head, tail)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} at {}", self.kind, self.text, self.start)
    }
}
