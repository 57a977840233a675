//! Keyword statements: conditionals, loops, `try`, `using` and friends.

use super::{
    BlockInfo, CSharpParser, complete, expressions, skip_to_next_important_token, statements,
};
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::grammar::{content_of, spacing};
use crate::parser::keywords::{CSharpKeyword, Keyword};
use crate::parser::primitives::{BalancingModes, TokenParser};
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{AcceptedCharacters, BlockType, SpanChunkGenerator, SpanKind};

const ELSE_IF_NAME: &str = "else if";

/// Production run for a keyword at the start of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeywordHandler {
    /// `for`, `foreach`, `while`, `switch`, `lock`: `keyword (cond) { ... }`
    Conditional,
    /// `case x:` and `default:` labels
    Case,
    If,
    Try,
    Using,
    Do,
    /// `namespace`, `class`
    Reserved,
    Await,
}

fn handler_for(keyword: CSharpKeyword) -> Option<KeywordHandler> {
    use CSharpKeyword::*;

    let handler = match keyword {
        For | Foreach | While | Switch | Lock => KeywordHandler::Conditional,
        Case | Default => KeywordHandler::Case,
        If => KeywordHandler::If,
        Try => KeywordHandler::Try,
        Using => KeywordHandler::Using,
        Do => KeywordHandler::Do,
        Namespace | Class => KeywordHandler::Reserved,
        Await => KeywordHandler::Await,
        _ => return None,
    };
    Some(handler)
}

/// Run the production for the keyword under the cursor, or `fallback` when it has none.
pub(super) fn handle_keyword<'s>(
    p: &mut CSharpParser<'s>,
    top_level: bool,
    fallback: impl FnOnce(&mut CSharpParser<'s>) -> ParseResult,
) -> ParseResult {
    let handler = match p.current().and_then(|s| s.keyword) {
        Some(Keyword::CSharp(keyword)) => handler_for(keyword),
        _ => None,
    };
    match handler {
        Some(KeywordHandler::Conditional) => conditional_block(p, top_level),
        Some(KeywordHandler::Case) => case_statement(p),
        Some(KeywordHandler::If) => if_statement(p, top_level),
        Some(KeywordHandler::Try) => try_statement(p, top_level),
        Some(KeywordHandler::Using) => using_keyword(p, top_level),
        Some(KeywordHandler::Do) => do_statement(p, top_level),
        Some(KeywordHandler::Reserved) => reserved_directive(p),
        Some(KeywordHandler::Await) => await_expression(p, top_level),
        None => fallback(p),
    }
}

/// A keyword right after a transition in markup.
pub(super) fn keyword_block(p: &mut CSharpParser<'_>, top_level: bool) -> ParseResult {
    handle_keyword(p, top_level, |p| {
        expressions::implicit_expression(p, AcceptedCharacters::NON_WHITESPACE)
    })
}

// =============================================================================
// Conditionals and loops
// =============================================================================

fn conditional_block(p: &mut CSharpParser<'_>, top_level: bool) -> ParseResult {
    let block = p.current_block_info();
    conditional_block_with(p, &block)?;
    if top_level {
        complete(p)?;
    }
    Ok(())
}

fn conditional_block_with(p: &mut CSharpParser<'_>, block: &BlockInfo) -> ParseResult {
    p.accept_and_move_next();
    p.accept_while(spacing(true, true));

    // A missing condition is left for the compiler to report.
    if accept_condition(p)? {
        p.accept_while(spacing(true, true));
        expect_code_block(p, block)?;
    }
    Ok(())
}

/// `( ... )` if present. `false` when the parenthesis is never closed.
fn accept_condition(p: &mut CSharpParser<'_>) -> ParseResult<bool> {
    if !p.at(SyntaxKind::L_PAREN) {
        return Ok(true);
    }
    let complete = p.balance(
        BalancingModes::BACKTRACK_ON_FAILURE | BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES,
    )?;
    if complete {
        p.optional(SyntaxKind::R_PAREN);
    } else {
        p.accept_until(&[SyntaxKind::NEWLINE]);
    }
    Ok(complete)
}

/// The body of a control-flow statement. Anything but `{` is reported and
/// still parsed as a single statement.
fn expect_code_block(p: &mut CSharpParser<'_>, block: &BlockInfo) -> ParseResult {
    if p.eof() {
        return Ok(());
    }
    if !p.at(SyntaxKind::L_BRACE) {
        if let Some(current) = p.current().cloned() {
            let brace = p.language().sample(SyntaxKind::L_BRACE);
            p.on_error(
                current.start,
                messages::single_line_control_flow(brace, current.text()),
                current.len(),
                ErrorCode::MissingExpectedToken,
            );
        }
    }
    statements::statement(p, Some(block))
}

fn unconditional_block(p: &mut CSharpParser<'_>) -> ParseResult {
    let block = p.current_block_info();
    p.accept_and_move_next();
    p.accept_while(spacing(true, true));
    expect_code_block(p, &block)
}

fn case_statement(p: &mut CSharpParser<'_>) -> ParseResult {
    p.accept_until(&[SyntaxKind::COLON]);
    p.optional(SyntaxKind::COLON);
    Ok(())
}

fn do_statement(p: &mut CSharpParser<'_>, top_level: bool) -> ParseResult {
    unconditional_block(p)?;
    while_clause(p)?;
    if top_level {
        complete(p)?;
    }
    Ok(())
}

/// The `while (cond);` closing a `do` loop.
fn while_clause(p: &mut CSharpParser<'_>) -> ParseResult {
    p.set_accepted(AcceptedCharacters::ANY);
    let whitespace = skip_to_next_important_token(p)?;

    if p.at_keyword(CSharpKeyword::While) {
        p.accept_symbols(whitespace);
        p.accept_and_move_next();
        p.accept_while(spacing(true, true));
        if accept_condition(p)? && p.optional(SyntaxKind::SEMICOLON) {
            p.set_accepted(AcceptedCharacters::NONE);
        }
    } else {
        p.put_current_back();
        p.put_back_all(whitespace);
    }
    Ok(())
}

// =============================================================================
// if / else
// =============================================================================

fn if_statement(p: &mut CSharpParser<'_>, top_level: bool) -> ParseResult {
    conditional_block(p, false)?;
    after_if_clause(p)?;
    if top_level {
        complete(p)?;
    }
    Ok(())
}

fn after_if_clause(p: &mut CSharpParser<'_>) -> ParseResult {
    let whitespace = skip_to_next_important_token(p)?;

    if p.at_keyword(CSharpKeyword::Else) {
        p.accept_symbols(whitespace);
        else_clause(p)
    } else {
        p.put_current_back();
        p.put_back_all(whitespace);
        p.set_accepted(AcceptedCharacters::ANY);
        Ok(())
    }
}

fn else_clause(p: &mut CSharpParser<'_>) -> ParseResult {
    let mut block = p.current_block_info();
    p.accept_and_move_next();
    p.accept_while(spacing(true, true));

    if p.at_keyword(CSharpKeyword::If) {
        block.name = ELSE_IF_NAME.to_string();
        conditional_block_with(p, &block)?;
        after_if_clause(p)
    } else if !p.eof() {
        expect_code_block(p, &block)
    } else {
        Ok(())
    }
}

// =============================================================================
// try / catch / finally
// =============================================================================

fn try_statement(p: &mut CSharpParser<'_>, top_level: bool) -> ParseResult {
    unconditional_block(p)?;
    after_try_clause(p)?;
    if top_level {
        complete(p)?;
    }
    Ok(())
}

fn after_try_clause(p: &mut CSharpParser<'_>) -> ParseResult {
    loop {
        let whitespace = skip_to_next_important_token(p)?;

        if p.at_keyword(CSharpKeyword::Catch) {
            p.accept_symbols(whitespace);
            filterable_catch_block(p)?;
        } else if p.at_keyword(CSharpKeyword::Finally) {
            p.accept_symbols(whitespace);
            return unconditional_block(p);
        } else {
            p.put_current_back();
            p.put_back_all(whitespace);
            p.set_accepted(AcceptedCharacters::ANY);
            return Ok(());
        }
    }
}

/// `catch (E e) when (cond) { ... }`
fn filterable_catch_block(p: &mut CSharpParser<'_>) -> ParseResult {
    let block = p.current_block_info();
    p.accept_and_move_next();
    p.accept_while(spacing(true, true));

    if !accept_condition(p)? {
        return Ok(());
    }
    p.accept_while(spacing(true, true));

    if p.at_keyword(CSharpKeyword::When) {
        p.accept_and_move_next();
        p.accept_while(spacing(true, true));
        if !accept_condition(p)? {
            return Ok(());
        }
        p.accept_while(spacing(true, true));
    }
    expect_code_block(p, &block)
}

// =============================================================================
// using
// =============================================================================

/// `using (...) { }` statement, or a namespace import at top level.
fn using_keyword(p: &mut CSharpParser<'_>, top_level: bool) -> ParseResult {
    let block = p.current_block_info();
    p.accept_and_move_next();
    p.accept_while(spacing(false, true));

    if p.at(SyntaxKind::L_PAREN) {
        using_statement(p, &block)?;
    } else if p.at(SyntaxKind::IDENT) || p.at_keyword(CSharpKeyword::Static) {
        if top_level {
            using_declaration(p)?;
        } else {
            p.on_error(
                block.start,
                messages::import_within_code_block(),
                block.name.len(),
                ErrorCode::NestedConstructNotAllowed,
            );
            statements::standard_statement(p)?;
        }
    }

    if top_level {
        complete(p)?;
    }
    Ok(())
}

fn using_statement(p: &mut CSharpParser<'_>, block: &BlockInfo) -> ParseResult {
    if accept_condition(p)? {
        p.accept_while(spacing(true, true));
        expect_code_block(p, block)?;
    }
    Ok(())
}

/// `using A.B;`, `using X = A.B;` or `using static A.B;`
fn using_declaration(p: &mut CSharpParser<'_>) -> ParseResult {
    p.set_block_type(BlockType::Directive)?;

    if p.at(SyntaxKind::IDENT) {
        namespace_or_type_name(p)?;
        let whitespace = p.read_while(spacing(true, true));
        if p.at(SyntaxKind::EQ) {
            // Alias
            p.accept_symbols(whitespace);
            p.accept_and_move_next();
            p.accept_while(spacing(true, true));
            namespace_or_type_name(p)?;
        } else {
            p.put_current_back();
            p.put_back_all(whitespace);
        }
    } else if p.at_keyword(CSharpKeyword::Static) {
        p.accept_and_move_next();
        p.accept_while(spacing(false, true));
        namespace_or_type_name(p)?;
    }

    let span = &mut p.cursor_mut().span;
    span.edit_handler.accepted_characters = AcceptedCharacters::ANY_EXCEPT_NEWLINE;
    let keyword_length = span.symbols().first().map_or(0, |s| s.len());
    let namespace = content_of(span.symbols().get(1..).unwrap_or_default());
    span.chunk_generator = SpanChunkGenerator::AddImport {
        namespace,
        keyword_length,
    };

    if p.ensure_current() {
        p.optional(SyntaxKind::SEMICOLON);
    }
    Ok(())
}

/// A possibly qualified, generic, nullable or array type name.
fn namespace_or_type_name(p: &mut CSharpParser<'_>) -> ParseResult<bool> {
    if !(p.optional(SyntaxKind::IDENT) || p.optional(SyntaxKind::KEYWORD)) {
        return Ok(false);
    }

    // Nullable
    p.optional(SyntaxKind::QUESTION);
    if p.optional(SyntaxKind::COLON_COLON) && !p.optional(SyntaxKind::IDENT) {
        p.optional(SyntaxKind::KEYWORD);
    }
    if p.at(SyntaxKind::L_ANGLE) {
        type_argument_list(p)?;
    }
    if p.optional(SyntaxKind::DOT) {
        namespace_or_type_name(p)?;
    }
    while p.at(SyntaxKind::L_BRACKET) {
        p.balance(BalancingModes::NONE)?;
        p.optional(SyntaxKind::R_BRACKET);
    }
    Ok(true)
}

fn type_argument_list(p: &mut CSharpParser<'_>) -> ParseResult {
    p.balance(BalancingModes::NONE)?;
    p.optional(SyntaxKind::R_ANGLE);
    Ok(())
}

// =============================================================================
// Reserved words and expression keywords
// =============================================================================

/// `namespace` and `class` cannot start a block.
fn reserved_directive(p: &mut CSharpParser<'_>) -> ParseResult {
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

/// `await x`: inside markup this is an expression that may contain spaces.
fn await_expression(p: &mut CSharpParser<'_>, top_level: bool) -> ParseResult {
    p.accept_and_move_next();
    p.accept_while(spacing(false, true));
    if top_level {
        expressions::implicit_expression(p, AcceptedCharacters::ANY_EXCEPT_NEWLINE)?;
    }
    Ok(())
}
