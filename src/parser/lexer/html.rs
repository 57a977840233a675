//! Markup tokenizer.
//!
//! Text runs stop at whitespace, at any markup punctuation and at `@`,
//! except an `@` with alphanumeric characters on both sides, which stays in
//! the text so e-mail addresses do not become transitions.

use logos::Logos;

use super::RawToken;
use crate::parser::syntax_kind::SyntaxKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum HtmlToken {
    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("@")]
    Transition,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("!")]
    Bang,
    #[token("/")]
    Slash,
    #[token("?")]
    Question,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("=")]
    Eq,
    #[token("\"")]
    DoubleQuote,
    #[token("'")]
    SingleQuote,
    #[token("--")]
    DoubleHyphen,

    // =========================================================================
    // TEXT
    // =========================================================================
    #[regex(r#"[^ \t\x0B\x0C\r\n<>!/?\[\]="'@\-]"#, text_run)]
    #[token("-", text_run)]
    Text,
}

fn ends_text(c: char, next: Option<char>) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '<' | '>' | '!' | '/' | '?' | '[' | ']' | '=' | '"' | '\''
        )
        || (c == '-' && next == Some('-'))
}

fn text_run(lex: &mut logos::Lexer<HtmlToken>) -> bool {
    let rest = lex.remainder();
    let mut prev = lex.slice().chars().last();
    let mut len = 0;
    for (i, c) in rest.char_indices() {
        let next = rest[i + c.len_utf8()..].chars().next();
        if c == '@' {
            let embedded = prev.is_some_and(char::is_alphanumeric)
                && next.is_some_and(char::is_alphanumeric);
            if !embedded {
                break;
            }
        } else if ends_text(c, next) {
            break;
        }
        len = i + c.len_utf8();
        prev = Some(c);
    }
    lex.bump(len);
    true
}

impl From<HtmlToken> for SyntaxKind {
    fn from(token: HtmlToken) -> Self {
        match token {
            HtmlToken::Transition => SyntaxKind::TRANSITION,
            HtmlToken::LAngle => SyntaxKind::L_ANGLE,
            HtmlToken::RAngle => SyntaxKind::R_ANGLE,
            HtmlToken::Bang => SyntaxKind::BANG,
            HtmlToken::Slash => SyntaxKind::SLASH,
            HtmlToken::Question => SyntaxKind::QUESTION,
            HtmlToken::LBracket => SyntaxKind::L_BRACKET,
            HtmlToken::RBracket => SyntaxKind::R_BRACKET,
            HtmlToken::Eq => SyntaxKind::EQ,
            HtmlToken::DoubleQuote => SyntaxKind::DOUBLE_QUOTE,
            HtmlToken::SingleQuote => SyntaxKind::SINGLE_QUOTE,
            HtmlToken::DoubleHyphen => SyntaxKind::DOUBLE_HYPHEN,
            HtmlToken::Text => SyntaxKind::TEXT,
        }
    }
}

/// Lex the first markup symbol of `rest`.
pub(crate) fn lex(rest: &str) -> Option<RawToken> {
    let mut lexer = HtmlToken::lexer(rest);
    let token = lexer.next()?;
    let len = lexer.slice().len();
    let kind = match token {
        Ok(HtmlToken::Transition) if rest[1..].starts_with('*') => {
            SyntaxKind::RAZOR_COMMENT_TRANSITION
        }
        Ok(t) => t.into(),
        Err(()) => SyntaxKind::UNKNOWN,
    };
    Some(RawToken::new(kind, len))
}
