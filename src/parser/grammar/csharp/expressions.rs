//! Implicit (`@a.b(c)`) and explicit (`@(a + b)`) expressions.

use super::{BlockInfo, CSharpParser, DEFAULT_KEYWORDS, EXPLICIT_EXPRESSION_NAME, complete_block};
use crate::parser::cursor::SpanConfig;
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::primitives::{BalancingModes, TokenParser};
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    AcceptedCharacters, BlockChunkGenerator, BlockType, EditHandler, SpanChunkGenerator, SpanKind,
};

/// Read a member-access chain: identifiers joined by `.`, `?.`, calls and indexers.
///
/// The chain stops at the first symbol that cannot continue it. A trailing
/// `.` is only kept when the expression is nested in code.
pub(super) fn implicit_expression(
    p: &mut CSharpParser<'_>,
    accepted: AcceptedCharacters,
) -> ParseResult {
    p.set_block_type(BlockType::Expression)?;
    p.set_block_generator(BlockChunkGenerator::Expression)?;

    let config = SpanConfig::new(
        SpanChunkGenerator::Expression,
        EditHandler::implicit_expression(DEFAULT_KEYWORDS, p.is_nested(), accepted),
    );
    p.with_span_config(Some(config), |p| {
        loop {
            if p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::KEYWORD) {
                p.accept_and_move_next();
            }
            if !method_call_or_array_index(p, accepted)? {
                break;
            }
        }
        p.put_current_back();
        p.output(SpanKind::Code)
    })
}

/// Extend the chain past the current symbol; `true` means an identifier follows.
fn method_call_or_array_index(
    p: &mut CSharpParser<'_>,
    accepted: AcceptedCharacters,
) -> ParseResult<bool> {
    if p.eof() {
        return Ok(false);
    }

    match p.current_kind() {
        Some(left @ (SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET)) => {
            // Whitespace is fine while inside the brackets.
            p.set_accepted(AcceptedCharacters::ANY);
            let right = p.language().flip_bracket(left);

            let mut config = p.span_config().cloned().unwrap_or_default();
            config.edit_handler.accepted_characters = AcceptedCharacters::ANY;
            let complete = p.with_span_config(Some(config), |p| {
                p.balance(
                    BalancingModes::BACKTRACK_ON_FAILURE
                        | BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES,
                )
            })?;

            if !complete {
                p.accept_until(&[SyntaxKind::L_ANGLE]);
            }
            if p.at(right) {
                p.accept_and_move_next();
                p.set_accepted(accepted);
            }
            method_call_or_array_index(p, accepted)
        }
        Some(SyntaxKind::QUESTION) => match p.lookahead(1).map(|s| s.kind) {
            Some(SyntaxKind::DOT) => {
                // `?.`
                p.accept_and_move_next();
                p.accept_and_move_next();
                Ok(p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::KEYWORD))
            }
            Some(SyntaxKind::L_BRACKET) => {
                // `?[`
                p.accept_and_move_next();
                method_call_or_array_index(p, accepted)
            }
            _ => Ok(false),
        },
        Some(SyntaxKind::DOT) => {
            let Some(dot) = p.current().cloned() else {
                return Ok(false);
            };
            if p.next_token() {
                if p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::KEYWORD) {
                    p.accept(dot);
                    return Ok(true);
                }
                p.put_current_back();
            }
            if p.is_nested() {
                p.accept(dot);
            } else {
                p.put_back(dot);
            }
            Ok(false)
        }
        Some(SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE) => Ok(false),
        _ => {
            p.put_current_back();
            Ok(false)
        }
    }
}

/// `@( ... )`: everything up to the balancing `)` is one expression.
pub(super) fn explicit_expression(p: &mut CSharpParser<'_>) -> ParseResult {
    let block = BlockInfo::new(EXPLICIT_EXPRESSION_NAME, p.current_location());
    p.accept_and_move_next();
    p.set_delimiter();
    p.output(SpanKind::MetaCode)?;

    let config = SpanConfig::new(SpanChunkGenerator::Expression, EditHandler::default());
    p.with_span_config(Some(config), |p| {
        let complete = p.balance_with(
            BalancingModes::BACKTRACK_ON_FAILURE
                | BalancingModes::NO_ERROR_ON_FAILURE
                | BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES,
            SyntaxKind::L_PAREN,
            SyntaxKind::R_PAREN,
            block.start,
        )?;

        if !complete {
            p.accept_until(&[SyntaxKind::L_ANGLE]);
            p.on_error(
                block.start,
                messages::expected_end_of_block_before_eof(&block.name, ")", "("),
                1,
                ErrorCode::UnterminatedConstruct,
            );
        }

        // `@()` still gets a content span.
        if p.cursor().span.is_empty() {
            let marker = p.language().marker_symbol(p.current_location());
            p.accept(marker);
        }
        p.output(SpanKind::Code)
    })?;

    p.optional(SyntaxKind::R_PAREN);
    if !p.eof() {
        p.put_current_back();
    }
    p.set_delimiter();
    complete_block(p, false, false)?;
    p.output(SpanKind::MetaCode)
}
