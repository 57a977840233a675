//! Grammar modules for the markup and code dialects
//!
//! - `markup` - tags, attributes, sections and the document production
//! - `csharp` - C-family directives, keyword statements and expressions
//! - `vb` - BASIC-family directives and `End`-terminated blocks
//!
//! Each dialect wraps the shared [`Session`](super::session::Session) in a
//! parser type implementing [`TokenParser`](super::primitives::TokenParser);
//! productions are free functions over that type.

pub(crate) mod csharp;
pub(crate) mod markup;
pub(crate) mod vb;

use super::symbol::Symbol;
use super::syntax_kind::SyntaxKind;

/// Whitespace, optionally also line breaks and code comments.
pub(crate) fn spacing(newlines: bool, comments: bool) -> impl Fn(&Symbol) -> bool + Copy {
    move |s| {
        s.kind == SyntaxKind::WHITESPACE
            || (newlines && s.kind == SyntaxKind::NEWLINE)
            || (comments && s.kind == SyntaxKind::COMMENT)
    }
}

/// Concatenated text of `symbols`.
pub(crate) fn content_of(symbols: &[Symbol]) -> String {
    symbols.iter().map(Symbol::text).collect()
}

/// Remove optional surrounding quotes. A quote on one side only is an error.
pub(crate) fn strip_quotes(value: &str) -> Result<&str, &str> {
    let starts = value.starts_with('"');
    let ends = value.len() > 1 && value.ends_with('"');
    match (starts, ends) {
        (true, true) => Ok(&value[1..value.len() - 1]),
        (false, false) => Ok(value),
        _ => Err(value),
    }
}
