//! Per-dialect language characteristics.
//!
//! Everything a parser needs to know about its dialect that is not grammar:
//! how to lex, which bracket closes which, and how to describe a symbol kind
//! in a diagnostic. All of it is immutable and shared across sessions.

use super::lexer::{self, RawToken};
use super::symbol::Symbol;
use super::syntax_kind::SyntaxKind;
use crate::base::SourceLocation;

/// The dialect a symbol stream is lexed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Html,
    CSharp,
    VisualBasic,
}

/// Which programming dialect code regions are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CodeDialect {
    #[default]
    CSharp,
    VisualBasic,
}

impl CodeDialect {
    pub fn language(self) -> Language {
        match self {
            CodeDialect::CSharp => Language::CSharp,
            CodeDialect::VisualBasic => Language::VisualBasic,
        }
    }
}

impl Language {
    /// Lex the first symbol of `rest`, or `None` at end of input.
    pub(crate) fn lex(self, rest: &str) -> Option<RawToken> {
        if rest.is_empty() {
            return None;
        }
        if let Some(trivia) = lexer::lex_trivia(rest) {
            return Some(trivia);
        }
        match self {
            Language::Html => lexer::lex_html(rest),
            Language::CSharp => lexer::lex_csharp(rest),
            Language::VisualBasic => lexer::lex_vb(rest),
        }
    }

    pub fn is_code(self) -> bool {
        self != Language::Html
    }

    /// Whether identifiers and keywords compare ignoring case.
    pub fn is_case_insensitive(self) -> bool {
        self == Language::VisualBasic
    }

    pub fn tokenize_string(self, text: &str, start: SourceLocation) -> Vec<Symbol> {
        lexer::tokenize(self, text, start)
    }

    pub fn is_whitespace(self, symbol: &Symbol) -> bool {
        symbol.kind == SyntaxKind::WHITESPACE
    }

    pub fn is_newline(self, symbol: &Symbol) -> bool {
        symbol.kind == SyntaxKind::NEWLINE
    }

    pub fn is_transition(self, symbol: &Symbol) -> bool {
        symbol.kind == SyntaxKind::TRANSITION
    }

    pub fn is_comment_start(self, symbol: &Symbol) -> bool {
        symbol.kind == SyntaxKind::RAZOR_COMMENT_TRANSITION
    }

    pub fn is_identifier(self, symbol: &Symbol) -> bool {
        match self {
            Language::Html => symbol.kind == SyntaxKind::TEXT,
            _ => symbol.kind == SyntaxKind::IDENT,
        }
    }

    /// The bracket that balances `kind`, or `UNKNOWN` when it is not a bracket.
    pub fn flip_bracket(self, kind: SyntaxKind) -> SyntaxKind {
        match kind {
            SyntaxKind::L_PAREN => SyntaxKind::R_PAREN,
            SyntaxKind::R_PAREN => SyntaxKind::L_PAREN,
            SyntaxKind::L_BRACKET => SyntaxKind::R_BRACKET,
            SyntaxKind::R_BRACKET => SyntaxKind::L_BRACKET,
            SyntaxKind::L_BRACE => SyntaxKind::R_BRACE,
            SyntaxKind::R_BRACE => SyntaxKind::L_BRACE,
            SyntaxKind::L_ANGLE => SyntaxKind::R_ANGLE,
            SyntaxKind::R_ANGLE => SyntaxKind::L_ANGLE,
            _ => SyntaxKind::UNKNOWN,
        }
    }

    /// Representative source text of a fixed-text symbol kind.
    pub fn sample(self, kind: SyntaxKind) -> &'static str {
        match kind {
            SyntaxKind::TRANSITION | SyntaxKind::RAZOR_COMMENT_TRANSITION => "@",
            SyntaxKind::RAZOR_COMMENT_STAR => "*",
            SyntaxKind::L_ANGLE => "<",
            SyntaxKind::R_ANGLE => ">",
            SyntaxKind::BANG => "!",
            SyntaxKind::SLASH => "/",
            SyntaxKind::QUESTION => "?",
            SyntaxKind::L_BRACKET => "[",
            SyntaxKind::R_BRACKET => "]",
            SyntaxKind::EQ => "=",
            SyntaxKind::COLON => ":",
            SyntaxKind::DOUBLE_HYPHEN => "--",
            SyntaxKind::DOUBLE_QUOTE => "\"",
            SyntaxKind::SINGLE_QUOTE => "'",
            SyntaxKind::L_PAREN => "(",
            SyntaxKind::R_PAREN => ")",
            SyntaxKind::L_BRACE => "{",
            SyntaxKind::R_BRACE => "}",
            SyntaxKind::DOT => ".",
            SyntaxKind::COMMA => ",",
            SyntaxKind::SEMICOLON => ";",
            SyntaxKind::COLON_COLON => "::",
            SyntaxKind::LINE_CONTINUATION => "_",
            SyntaxKind::NEWLINE => "\n",
            SyntaxKind::WHITESPACE => " ",
            _ => "",
        }
    }

    /// The empty symbol used when a span must exist but nothing was read.
    pub fn marker_symbol(self, location: SourceLocation) -> Symbol {
        Symbol::marker(location)
    }

    /// Split `symbol` after `at` bytes; see [`Symbol::split`].
    pub fn split_symbol(self, symbol: &Symbol, at: usize, head_kind: SyntaxKind) -> (Symbol, Option<Symbol>) {
        symbol.split(at, head_kind)
    }
}
