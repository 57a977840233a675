//! Keywords after a transition: block statements, `Imports`, `Option`,
//! `Inherits` and the reserved `Namespace`/`Class`.

use super::{VbParser, complete, expressions, report_unterminated, statements};
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::grammar::{content_of, spacing};
use crate::parser::keywords::{Keyword, VbKeyword};
use crate::parser::primitives::TokenParser;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{AcceptedCharacters, BlockType, SpanChunkGenerator, SpanKind};

/// Options `Option` can set.
const KNOWN_OPTIONS: &[&str] = &["Strict", "Explicit"];

/// The words closing a block keyword's statement.
pub(super) fn block_end(keyword: VbKeyword) -> Option<&'static [&'static str]> {
    let end: &'static [&'static str] = match keyword {
        VbKeyword::If => &["End", "If"],
        VbKeyword::While => &["End", "While"],
        VbKeyword::Select => &["End", "Select"],
        VbKeyword::Try => &["End", "Try"],
        VbKeyword::With => &["End", "With"],
        VbKeyword::SyncLock => &["End", "SyncLock"],
        VbKeyword::Using => &["End", "Using"],
        VbKeyword::For => &["Next"],
        VbKeyword::Do => &["Loop"],
        _ => return None,
    };
    Some(end)
}

pub(super) fn keyword_block(p: &mut VbParser<'_>) -> ParseResult {
    let keyword = match p.current().and_then(|s| s.keyword) {
        Some(Keyword::Vb(keyword)) => keyword,
        _ => return expressions::implicit_expression(p, AcceptedCharacters::NON_WHITESPACE),
    };

    if let Some(end) = block_end(keyword) {
        return statement_block(p, end);
    }
    match keyword {
        VbKeyword::Imports => imports_statement(p),
        VbKeyword::Option => option_statement(p),
        VbKeyword::Inherits => inherits_statement(p),
        VbKeyword::Namespace | VbKeyword::Class => reserved_directive(p),
        _ => expressions::implicit_expression(p, AcceptedCharacters::NON_WHITESPACE),
    }
}

/// `If ... End If` and the other block statements, as one code span.
fn statement_block(p: &mut VbParser<'_>, end: &'static [&'static str]) -> ParseResult {
    p.set_block_type(BlockType::Statement)?;
    let block = p.current_block_info();
    if !statements::keyword_statement(p, end)? {
        report_unterminated(p, &block, end);
    }
    complete(p)?;
    p.output(SpanKind::Code)
}

// =============================================================================
// Imports and Option
// =============================================================================

/// `Imports A.B` or `Imports Alias = A.B`
fn imports_statement(p: &mut VbParser<'_>) -> ParseResult {
    p.set_block_type(BlockType::Directive)?;
    p.accept_and_move_next();
    p.accept_while(spacing(false, false));

    if p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::KEYWORD) {
        p.accept_until(&[SyntaxKind::NEWLINE, SyntaxKind::COMMENT]);
    } else {
        let location = p.current_location();
        let length = p.current().map_or(1, |s| s.len().max(1));
        p.on_error(
            location,
            messages::namespace_or_type_alias_expected(),
            length,
            ErrorCode::MissingExpectedToken,
        );
    }

    let span = &mut p.cursor_mut().span;
    let keyword_length = span.symbols().first().map_or(0, |s| s.len());
    let namespace = content_of(span.symbols().get(1..).unwrap_or_default());
    span.chunk_generator = SpanChunkGenerator::AddImport {
        namespace: namespace.trim_end().to_string(),
        keyword_length,
    };
    complete(p)?;
    p.output_with(SpanKind::Code, AcceptedCharacters::ANY_EXCEPT_NEWLINE)
}

/// `Option Strict On`, `Option Explicit Off`; without a value the option is on.
fn option_statement(p: &mut VbParser<'_>) -> ParseResult {
    p.set_block_type(BlockType::Directive)?;
    p.accept_and_move_next();
    p.accept_while(spacing(false, false));

    let mut generator = SpanChunkGenerator::None;
    if p.required(SyntaxKind::IDENT, true, messages::expected_option_name) {
        let name = p.current_text().to_string();
        let start = p.current_location();
        p.accept_and_move_next();
        let known = KNOWN_OPTIONS
            .iter()
            .copied()
            .find(|option| option.eq_ignore_ascii_case(&name));
        if known.is_none() {
            p.on_error(
                start,
                messages::unknown_option(&name),
                name.len(),
                ErrorCode::InvalidDirectiveValue,
            );
        }

        p.accept_while(spacing(false, false));
        let mut value = Some(true);
        if p.ensure_current() && !p.at_newline() && !p.at(SyntaxKind::COMMENT) {
            let text = p.current_text().to_string();
            let start = p.current_location();
            p.accept_and_move_next();
            value = if text.eq_ignore_ascii_case("On") {
                Some(true)
            } else if text.eq_ignore_ascii_case("Off") {
                Some(false)
            } else {
                p.on_error(
                    start,
                    messages::invalid_option_value(&name, &text),
                    text.len(),
                    ErrorCode::InvalidDirectiveValue,
                );
                None
            };
        }

        if let (Some(name), Some(value)) = (known, value) {
            generator = SpanChunkGenerator::SetVbOption {
                name: name.to_string(),
                value,
            };
        }
    }

    p.accept_until(&[SyntaxKind::NEWLINE]);
    p.set_generator(generator);
    complete(p)?;
    p.output_with(SpanKind::Code, AcceptedCharacters::ANY_EXCEPT_NEWLINE)
}

// =============================================================================
// Inherits and reserved words
// =============================================================================

/// `Inherits Type`: the rest of the line names the base type.
fn inherits_statement(p: &mut VbParser<'_>) -> ParseResult {
    let keyword_start = p.current_location();
    let keyword = p.current_text().to_string();
    p.accept_and_move_next();
    p.set_block_type(BlockType::Directive)?;

    let remaining_whitespace = p.accept_single_whitespace_character();
    p.set_generator(SpanChunkGenerator::None);
    p.output(SpanKind::MetaCode)?;
    if let Some(whitespace) = remaining_whitespace {
        p.accept(whitespace);
    }
    p.accept_while(spacing(false, false));

    if p.eof() || p.at_newline() || p.at(SyntaxKind::COMMENT) {
        p.on_error(
            keyword_start,
            messages::inherits_requires_type_name(&keyword),
            keyword.len(),
            ErrorCode::MissingExpectedToken,
        );
    }

    p.accept_until(&[SyntaxKind::NEWLINE]);
    if !p.context().design_time {
        p.optional(SyntaxKind::NEWLINE);
    }

    let base_type = p.cursor().span.content();
    p.set_generator(SpanChunkGenerator::SetBaseType(base_type.trim().to_string()));
    complete(p)?;
    p.output_with(SpanKind::Code, AcceptedCharacters::ANY_EXCEPT_NEWLINE)
}

/// `Namespace` and `Class` cannot start a block.
fn reserved_directive(p: &mut VbParser<'_>) -> ParseResult {
    if let Some(current) = p.current().cloned() {
        p.on_error(
            current.start,
            messages::reserved_word(current.text()),
            current.len(),
            ErrorCode::ReservedWordUsed,
        );
    }
    p.accept_and_move_next();
    p.set_delimiter();
    p.set_block_type(BlockType::Directive)?;
    complete(p)?;
    p.output(SpanKind::MetaCode)
}
