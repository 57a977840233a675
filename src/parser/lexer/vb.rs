//! BASIC-family tokenizer.
//!
//! Keywords are case-insensitive. `REM` comments and the `_` line
//! continuation are recognised after identifier lexing, since both are
//! spelled like identifiers.

use logos::Logos;

use super::{LexError, RawToken, extend_identifier};
use crate::base::is_newline_char;
use crate::parser::keywords::{Keyword, VbKeyword};
use crate::parser::syntax_kind::SyntaxKind;

/// How a `"`-delimited literal ended.
#[derive(Debug, Clone, Copy, PartialEq)]
enum QuoteEnd {
    String,
    /// `"x"c`
    Char,
    Unterminated,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum VbToken {
    // =========================================================================
    // COMMENTS
    // =========================================================================
    #[regex(r"'[^\r\n\x{85}\x{2028}\x{2029}]*")]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    #[regex(r"\[[a-zA-Z_][a-zA-Z0-9_]*\]")]
    Ident,

    #[regex(r"[^\x00-\x7F]", unicode_identifier)]
    UnicodeIdent,

    #[regex(r"[0-9]+([sS]|[iI]|[lL]|[uU][sSiIlL])?")]
    #[regex(r"&[hH][0-9a-fA-F]+")]
    #[regex(r"&[oO][0-7]+")]
    Integer,

    #[regex(r"[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?[fFrRdD]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFrRdD]?")]
    #[regex(r"[0-9]+[fFrRdD]")]
    Float,

    #[token("\"", quoted_literal)]
    Quoted(QuoteEnd),

    #[regex(r"#[^#\r\n\x{85}\x{2028}\x{2029}]*#")]
    Date,

    // =========================================================================
    // TRANSITION
    // =========================================================================
    #[token("@")]
    Transition,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("#")]
    Hash,
    #[token("$")]
    Dollar,
    #[token("&")]
    Amp,
    #[token("&=")]
    AmpEq,
    #[token("*")]
    Star,
    #[token("*=")]
    StarEq,
    #[token("+")]
    Plus,
    #[token("+=")]
    PlusEq,
    #[token("-")]
    Minus,
    #[token("-=")]
    MinusEq,
    #[token("/")]
    Slash,
    #[token("/=")]
    SlashEq,
    #[token("\\")]
    Backslash,
    #[token("^")]
    Caret,
    #[token("^=")]
    CaretEq,
    #[token("=")]
    Eq,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("<>")]
    Neq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
}

/// `"` literal body; `""` is an escaped quote and a line break ends it.
fn quoted_literal(lex: &mut logos::Lexer<VbToken>) -> QuoteEnd {
    let rest = lex.remainder();
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' if chars.next_if(|&(_, next)| next == '"').is_some() => {}
            '"' => {
                if chars.next_if(|&(_, next)| matches!(next, 'c' | 'C')).is_some() {
                    lex.bump(i + 2);
                    return QuoteEnd::Char;
                }
                lex.bump(i + 1);
                return QuoteEnd::String;
            }
            c if is_newline_char(c) => {
                lex.bump(i);
                return QuoteEnd::Unterminated;
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    QuoteEnd::Unterminated
}

fn unicode_identifier(lex: &mut logos::Lexer<VbToken>) -> bool {
    let first = lex.slice().chars().next();
    if !first.is_some_and(unicode_ident::is_xid_start) {
        return false;
    }
    let len = extend_identifier(lex.remainder());
    lex.bump(len);
    true
}

impl VbToken {
    fn kind(self) -> SyntaxKind {
        use VbToken::*;
        match self {
            Comment => SyntaxKind::COMMENT,
            Ident | UnicodeIdent => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER_LITERAL,
            Float => SyntaxKind::REAL_LITERAL,
            Quoted(QuoteEnd::Char) => SyntaxKind::CHAR_LITERAL,
            Quoted(_) => SyntaxKind::STRING_LITERAL,
            Date => SyntaxKind::DATE_LITERAL,
            Transition => SyntaxKind::TRANSITION,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Colon => SyntaxKind::COLON,
            Question => SyntaxKind::QUESTION,
            Bang => SyntaxKind::BANG,
            Hash => SyntaxKind::HASH,
            Dollar => SyntaxKind::DOLLAR,
            Amp => SyntaxKind::AMP,
            AmpEq => SyntaxKind::AMP_EQ,
            Star => SyntaxKind::STAR,
            StarEq => SyntaxKind::STAR_EQ,
            Plus => SyntaxKind::PLUS,
            PlusEq => SyntaxKind::PLUS_EQ,
            Minus => SyntaxKind::MINUS,
            MinusEq => SyntaxKind::MINUS_EQ,
            Slash => SyntaxKind::SLASH,
            SlashEq => SyntaxKind::SLASH_EQ,
            Backslash => SyntaxKind::BACKSLASH,
            Caret => SyntaxKind::CARET,
            CaretEq => SyntaxKind::CARET_EQ,
            Eq => SyntaxKind::EQ,
            LAngle => SyntaxKind::L_ANGLE,
            RAngle => SyntaxKind::R_ANGLE,
            Neq => SyntaxKind::NEQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            Shl => SyntaxKind::SHL,
            Shr => SyntaxKind::SHR,
        }
    }
}

/// `REM` followed by a space or the end of the line starts a comment.
fn rem_comment_len(rest: &str) -> Option<usize> {
    let head = rest.get(..3)?;
    if !head.eq_ignore_ascii_case("rem") {
        return None;
    }
    match rest[3..].chars().next() {
        None => Some(rest.len()),
        Some(c) if c.is_whitespace() => Some(rest.find(is_newline_char).unwrap_or(rest.len())),
        _ => None,
    }
}

/// Lex the first BASIC-family symbol of `rest`.
pub(crate) fn lex(rest: &str) -> Option<RawToken> {
    if let Some(len) = rem_comment_len(rest) {
        return Some(RawToken::new(SyntaxKind::COMMENT, len));
    }
    let mut lexer = VbToken::lexer(rest);
    let token = lexer.next()?;
    let text = lexer.slice();
    let raw = match token {
        Ok(VbToken::Transition) if rest[1..].starts_with('*') => {
            RawToken::new(SyntaxKind::RAZOR_COMMENT_TRANSITION, 1)
        }
        Ok(VbToken::Ident) if text == "_" => RawToken::new(SyntaxKind::LINE_CONTINUATION, 1),
        Ok(token @ (VbToken::Ident | VbToken::UnicodeIdent)) => match VbKeyword::lookup(text) {
            Some(keyword) => RawToken::keyword(Keyword::Vb(keyword), text.len()),
            None => RawToken::new(token.kind(), text.len()),
        },
        Ok(token @ VbToken::Quoted(QuoteEnd::Unterminated)) => RawToken::new(token.kind(), text.len())
            .with_error(Some(LexError::UnterminatedString)),
        Ok(token) => RawToken::new(token.kind(), text.len()),
        Err(()) => RawToken::new(SyntaxKind::UNKNOWN, text.len()),
    };
    Some(raw)
}
