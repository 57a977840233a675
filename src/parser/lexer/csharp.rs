//! C-family tokenizer.

use logos::Logos;

use super::{LexError, RawToken, extend_identifier};
use crate::base::is_newline_char;
use crate::parser::keywords::{CSharpKeyword, Keyword};
use crate::parser::syntax_kind::SyntaxKind;

/// Whether a delimited literal or comment found its closing delimiter.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Closure {
    Closed,
    Open,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum CSharpToken {
    // =========================================================================
    // COMMENTS
    // =========================================================================
    #[regex(r"//[^\r\n\x{85}\x{2028}\x{2029}]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment(Closure),

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[^\x00-\x7F]", unicode_identifier)]
    UnicodeIdent,

    #[regex(r"[0-9]+([uU][lL]?|[lL][uU]?)?")]
    #[regex(r"0[xX][0-9a-fA-F]+([uU][lL]?|[lL][uU]?)?")]
    Integer,

    #[regex(r"[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFdDmM]?")]
    #[regex(r"[0-9]+[fFdDmM]")]
    Real,

    #[token("\"", string_literal)]
    String(Closure),

    #[token("@\"", verbatim_string_literal)]
    VerbatimString(Closure),

    #[token("'", char_literal)]
    Char(Closure),

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
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token("?")]
    Question,
    #[token("??")]
    QuestionQuestion,
    #[token("#")]
    Hash,
    #[token("+")]
    Plus,
    #[token("++")]
    PlusPlus,
    #[token("+=")]
    PlusEq,
    #[token("-")]
    Minus,
    #[token("--")]
    MinusMinus,
    #[token("-=")]
    MinusEq,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("*")]
    Star,
    #[token("*=")]
    StarEq,
    #[token("/")]
    Slash,
    #[token("/=")]
    SlashEq,
    #[token("%")]
    Percent,
    #[token("%=")]
    PercentEq,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("&=")]
    AmpEq,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("|=")]
    PipeEq,
    #[token("^")]
    Caret,
    #[token("^=")]
    CaretEq,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("!=")]
    Neq,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("<")]
    LAngle,
    #[token("<=")]
    LtEq,
    #[token("<<")]
    Shl,
    #[token("<<=")]
    ShlEq,
    #[token(">")]
    RAngle,
    #[token(">=")]
    GtEq,
    #[token(">>")]
    Shr,
    #[token(">>=")]
    ShrEq,
}

fn block_comment(lex: &mut logos::Lexer<CSharpToken>) -> Closure {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Closure::Closed
        }
        None => {
            lex.bump(lex.remainder().len());
            Closure::Open
        }
    }
}

/// Escaped string or char body up to `quote`; a line break ends it unclosed.
fn escaped_literal(lex: &mut logos::Lexer<CSharpToken>, quote: char) -> Closure {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    if is_newline_char(escaped) {
                        lex.bump(i + 1);
                        return Closure::Open;
                    }
                }
            }
            c if is_newline_char(c) => {
                lex.bump(i);
                return Closure::Open;
            }
            c if c == quote => {
                lex.bump(i + 1);
                return Closure::Closed;
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Closure::Open
}

fn string_literal(lex: &mut logos::Lexer<CSharpToken>) -> Closure {
    escaped_literal(lex, '"')
}

fn char_literal(lex: &mut logos::Lexer<CSharpToken>) -> Closure {
    escaped_literal(lex, '\'')
}

/// `@"..."` strings span lines; `""` is an escaped quote.
fn verbatim_string_literal(lex: &mut logos::Lexer<CSharpToken>) -> Closure {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            if bytes.get(i + 1) == Some(&b'"') {
                i += 2;
                continue;
            }
            lex.bump(i + 1);
            return Closure::Closed;
        }
        i += 1;
    }
    lex.bump(rest.len());
    Closure::Open
}

fn unicode_identifier(lex: &mut logos::Lexer<CSharpToken>) -> bool {
    let first = lex.slice().chars().next();
    if !first.is_some_and(unicode_ident::is_xid_start) {
        return false;
    }
    let len = extend_identifier(lex.remainder());
    lex.bump(len);
    true
}

impl CSharpToken {
    fn kind(self) -> SyntaxKind {
        use CSharpToken::*;
        match self {
            LineComment | BlockComment(_) => SyntaxKind::COMMENT,
            Ident | UnicodeIdent => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER_LITERAL,
            Real => SyntaxKind::REAL_LITERAL,
            String(_) | VerbatimString(_) => SyntaxKind::STRING_LITERAL,
            Char(_) => SyntaxKind::CHAR_LITERAL,
            Transition => SyntaxKind::TRANSITION,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            ColonColon => SyntaxKind::COLON_COLON,
            Question => SyntaxKind::QUESTION,
            QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            Hash => SyntaxKind::HASH,
            Plus => SyntaxKind::PLUS,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            PlusEq => SyntaxKind::PLUS_EQ,
            Minus => SyntaxKind::MINUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            MinusEq => SyntaxKind::MINUS_EQ,
            Arrow => SyntaxKind::ARROW,
            FatArrow => SyntaxKind::FAT_ARROW,
            Star => SyntaxKind::STAR,
            StarEq => SyntaxKind::STAR_EQ,
            Slash => SyntaxKind::SLASH,
            SlashEq => SyntaxKind::SLASH_EQ,
            Percent => SyntaxKind::PERCENT,
            PercentEq => SyntaxKind::PERCENT_EQ,
            Amp => SyntaxKind::AMP,
            AmpAmp => SyntaxKind::AMP_AMP,
            AmpEq => SyntaxKind::AMP_EQ,
            Pipe => SyntaxKind::PIPE,
            PipePipe => SyntaxKind::PIPE_PIPE,
            PipeEq => SyntaxKind::PIPE_EQ,
            Caret => SyntaxKind::CARET,
            CaretEq => SyntaxKind::CARET_EQ,
            Tilde => SyntaxKind::TILDE,
            Bang => SyntaxKind::BANG,
            Neq => SyntaxKind::NEQ,
            Eq => SyntaxKind::EQ,
            EqEq => SyntaxKind::EQ_EQ,
            LAngle => SyntaxKind::L_ANGLE,
            LtEq => SyntaxKind::LT_EQ,
            Shl => SyntaxKind::SHL,
            ShlEq => SyntaxKind::SHL_EQ,
            RAngle => SyntaxKind::R_ANGLE,
            GtEq => SyntaxKind::GT_EQ,
            Shr => SyntaxKind::SHR,
            ShrEq => SyntaxKind::SHR_EQ,
        }
    }

    fn error(self) -> Option<LexError> {
        match self {
            CSharpToken::BlockComment(Closure::Open) => Some(LexError::UnterminatedComment),
            CSharpToken::String(Closure::Open) | CSharpToken::VerbatimString(Closure::Open) => {
                Some(LexError::UnterminatedString)
            }
            CSharpToken::Char(Closure::Open) => Some(LexError::UnterminatedChar),
            _ => None,
        }
    }
}

/// Lex the first C-family symbol of `rest`.
pub(crate) fn lex(rest: &str) -> Option<RawToken> {
    let mut lexer = CSharpToken::lexer(rest);
    let token = lexer.next()?;
    let text = lexer.slice();
    let raw = match token {
        Ok(CSharpToken::Transition) if rest[1..].starts_with('*') => {
            RawToken::new(SyntaxKind::RAZOR_COMMENT_TRANSITION, 1)
        }
        Ok(token @ (CSharpToken::Ident | CSharpToken::UnicodeIdent)) => {
            match CSharpKeyword::lookup(text) {
                Some(keyword) => RawToken::keyword(Keyword::CSharp(keyword), text.len()),
                None => RawToken::new(token.kind(), text.len()),
            }
        }
        Ok(token) => RawToken::new(token.kind(), text.len()).with_error(token.error()),
        Err(()) => RawToken::new(SyntaxKind::UNKNOWN, text.len()),
    };
    Some(raw)
}
