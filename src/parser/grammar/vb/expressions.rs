//! Implicit (`@a.b(c)`) and explicit (`@(a + b)`) expressions.
//!
//! Calls and indexers share `( )`, so the member chain only balances
//! parentheses.

use super::{
    BlockInfo, DEFAULT_KEYWORDS, EXPLICIT_EXPRESSION_NAME, VbParser, complete_block,
};
use crate::parser::cursor::SpanConfig;
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::primitives::{BalancingModes, TokenParser};
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    AcceptedCharacters, BlockChunkGenerator, BlockType, EditHandler, SpanChunkGenerator, SpanKind,
};

pub(super) fn implicit_expression(p: &mut VbParser<'_>, accepted: AcceptedCharacters) -> ParseResult {
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
            if !member_access_or_call(p, accepted)? {
                break;
            }
        }
        p.put_current_back();
        p.output(SpanKind::Code)
    })
}

/// Extend the chain past the current symbol; `true` means a member name follows.
fn member_access_or_call(p: &mut VbParser<'_>, accepted: AcceptedCharacters) -> ParseResult<bool> {
    if p.eof() {
        return Ok(false);
    }

    match p.current_kind() {
        Some(SyntaxKind::L_PAREN) => {
            p.set_accepted(AcceptedCharacters::ANY);
            let mut config = p.span_config().cloned().unwrap_or_default();
            config.edit_handler.accepted_characters = AcceptedCharacters::ANY;
            let complete = p.with_span_config(Some(config), |p| {
                p.balance(
                    BalancingModes::BACKTRACK_ON_FAILURE
                        | BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES
                        | BalancingModes::ALLOW_EMBEDDED_TRANSITIONS,
                )
            })?;

            if !complete {
                p.accept_until(&[SyntaxKind::L_ANGLE]);
            }
            if p.at(SyntaxKind::R_PAREN) {
                p.accept_and_move_next();
                p.set_accepted(accepted);
            }
            member_access_or_call(p, accepted)
        }
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

/// `@( ... )`
pub(super) fn explicit_expression(p: &mut VbParser<'_>) -> ParseResult {
    let block = BlockInfo::new(EXPLICIT_EXPRESSION_NAME, p.current_location());
    p.accept_and_move_next();
    p.set_delimiter();
    p.output(SpanKind::MetaCode)?;

    let config = SpanConfig::new(SpanChunkGenerator::Expression, EditHandler::default());
    p.with_span_config(Some(config), |p| {
        let complete = p.balance_with(
            BalancingModes::BACKTRACK_ON_FAILURE
                | BalancingModes::NO_ERROR_ON_FAILURE
                | BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES
                | BalancingModes::ALLOW_EMBEDDED_TRANSITIONS,
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
