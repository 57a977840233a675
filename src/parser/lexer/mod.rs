//! Logos-based tokenizers for the three dialects.
//!
//! Every tokenizer answers one question: what is the first symbol of this
//! text? The token cursor owns the position, so a symbol is a pure function
//! of the dialect and the offset it was read from. That makes seeking back
//! to a bookmark a plain position write.

mod csharp;
mod html;
mod vb;

use super::errors::{ErrorCode, RazorDiagnostic, messages};
use super::keywords::Keyword;
use super::language::Language;
use super::source::SourceReader;
use super::symbol::Symbol;
use super::syntax_kind::SyntaxKind;
use crate::base::{SourceLocation, is_newline_char, is_whitespace_char};

pub(crate) use csharp::lex as lex_csharp;
pub(crate) use html::lex as lex_html;
pub(crate) use vb::lex as lex_vb;

/// Lexical problems reported on the symbol that has them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexError {
    UnterminatedString,
    UnterminatedChar,
    UnterminatedComment,
}

impl LexError {
    fn message(self) -> String {
        match self {
            LexError::UnterminatedString => messages::unterminated_string_literal(),
            LexError::UnterminatedChar => messages::unterminated_char_literal(),
            LexError::UnterminatedComment => messages::unterminated_block_comment(),
        }
    }
}

/// Kind and byte length of one lexed symbol, before it gets a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawToken {
    pub kind: SyntaxKind,
    pub keyword: Option<Keyword>,
    pub len: usize,
    pub error: Option<LexError>,
}

impl RawToken {
    pub(crate) fn new(kind: SyntaxKind, len: usize) -> Self {
        Self {
            kind,
            keyword: None,
            len,
            error: None,
        }
    }

    pub(crate) fn keyword(keyword: Keyword, len: usize) -> Self {
        Self {
            keyword: Some(keyword),
            ..Self::new(SyntaxKind::KEYWORD, len)
        }
    }

    pub(crate) fn with_error(mut self, error: Option<LexError>) -> Self {
        self.error = error;
        self
    }

    fn into_symbol(self, text: &str, start: SourceLocation) -> Symbol {
        let mut symbol = Symbol::new(self.kind, text, start);
        symbol.keyword = self.keyword;
        if let Some(error) = self.error {
            let code = match error {
                LexError::UnterminatedComment => ErrorCode::UnterminatedConstruct,
                _ => ErrorCode::UnterminatedLiteral,
            };
            symbol = symbol.with_error(RazorDiagnostic::new(error.message(), start, 1, code));
        }
        symbol
    }
}

/// Byte length of the identifier-continue run at the start of `rest`.
pub(crate) fn extend_identifier(rest: &str) -> usize {
    rest.char_indices()
        .find(|&(_, c)| !unicode_ident::is_xid_continue(c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len())
}

/// Whitespace run or line break at the start of `rest`, the same in every dialect.
pub(crate) fn lex_trivia(rest: &str) -> Option<RawToken> {
    let first = rest.chars().next()?;
    if rest.starts_with("\r\n") {
        Some(RawToken::new(SyntaxKind::NEWLINE, 2))
    } else if is_newline_char(first) {
        Some(RawToken::new(SyntaxKind::NEWLINE, first.len_utf8()))
    } else if is_whitespace_char(first) {
        let len = rest
            .char_indices()
            .find(|&(_, c)| !is_whitespace_char(c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        Some(RawToken::new(SyntaxKind::WHITESPACE, len))
    } else {
        None
    }
}

/// Read the symbol of `language` starting at `offset` of the source.
pub(crate) fn symbol_at(language: Language, source: &SourceReader, offset: usize) -> Option<Symbol> {
    let rest = source.text().get(offset..)?;
    let raw = language.lex(rest)?;
    let text = &rest[..raw.len];
    Some(raw.into_symbol(text, source.location_at(offset)))
}

/// Tokenize a whole string whose first character sits at `start`.
pub fn tokenize(language: Language, text: &str, start: SourceLocation) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    let mut offset = 0;
    let mut location = start;
    while let Some(raw) = language.lex(&text[offset..]) {
        if raw.len == 0 {
            break;
        }
        let piece = &text[offset..offset + raw.len];
        symbols.push(raw.into_symbol(piece, location));
        location = location.advance(piece);
        offset += raw.len;
    }
    symbols
}
