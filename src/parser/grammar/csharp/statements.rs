//! Statements inside code blocks, and the `@{ ... }` block itself.

use super::{
    BlockInfo, CODE_BLOCK_NAME, CSharpParser, keywords, nested_block, other_parser_block, template,
};
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::grammar::markup::TEXT_TAG;
use crate::parser::primitives::{BalancingModes, TokenParser};
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{AcceptedCharacters, EditHandler, SpanChunkGenerator, SpanKind};

/// `@{ ... }`
pub(super) fn verbatim_block(p: &mut CSharpParser<'_>) -> ParseResult {
    let block = BlockInfo::new(CODE_BLOCK_NAME, p.current_location());
    p.accept_and_move_next();
    p.set_delimiter();
    p.output(SpanKind::MetaCode)?;

    p.cursor_mut().span.edit_handler = EditHandler::auto_complete(false);
    code_block(p, false, &block)?;

    p.set_generator(SpanChunkGenerator::Statement);
    p.add_marker_symbol_if_necessary();
    if !p.at(SyntaxKind::R_BRACE) {
        p.cursor_mut().span.edit_handler.set_auto_complete_string("}");
    }
    p.output(SpanKind::Code)?;

    if p.optional(SyntaxKind::R_BRACE) {
        p.set_delimiter();
    }

    if !p.is_nested() {
        p.ensure_current();
        let ends_line = p.at_newline()
            || (p.at_whitespace() && p.next_is(SyntaxKind::NEWLINE));
        if ends_line {
            // The rest of the line after `}` renders nothing.
            p.context_mut().null_generate_whitespace_and_newline = true;
        }
    }

    p.output(SpanKind::MetaCode)
}

/// Statements up to the `}` closing `block`, which is consumed when
/// `accept_terminating_brace` is set.
pub(super) fn code_block(
    p: &mut CSharpParser<'_>,
    accept_terminating_brace: bool,
    block: &BlockInfo,
) -> ParseResult {
    p.ensure_current();
    while !p.eof() && !p.at(SyntaxKind::R_BRACE) {
        statement(p, None)?;
        p.ensure_current();
    }

    if p.eof() {
        p.on_error(
            block.start,
            messages::expected_end_of_block_before_eof(&block.name, "}", "{"),
            1,
            ErrorCode::UnterminatedConstruct,
        );
    } else if accept_terminating_brace {
        p.set_accepted(AcceptedCharacters::NONE);
        p.accept_and_move_next();
    }
    Ok(())
}

/// One statement. Markup at the start of a statement goes to the markup parser.
pub(super) fn statement(p: &mut CSharpParser<'_>, block: Option<&BlockInfo>) -> ParseResult {
    p.set_accepted(AcceptedCharacters::ANY);

    let last_whitespace = p.accept_whitespace_in_lines();
    if p.eof() {
        if let Some(whitespace) = last_whitespace {
            p.accept(whitespace);
        }
        return Ok(());
    }

    let Some(kind) = p.current_kind() else {
        return Ok(());
    };
    let location = p.current_location();

    // `@:` and `@::` are both single-line markup; the second colon is text.
    let single_line_markup = kind == SyntaxKind::TRANSITION
        && p.next_is_any(&[SyntaxKind::COLON, SyntaxKind::COLON_COLON]);
    let markup = single_line_markup
        || kind == SyntaxKind::L_ANGLE
        || (kind == SyntaxKind::TRANSITION && p.next_is(SyntaxKind::L_ANGLE));

    // Indentation belongs to code, unless markup follows outside design time.
    if p.context().design_time || !markup {
        if let Some(whitespace) = last_whitespace {
            p.accept(whitespace);
        }
    } else {
        let next = p.lookahead(1);
        match last_whitespace {
            // `<text>` renders nothing, so its indentation stays with the code.
            Some(whitespace) if next.is_some_and(|n| n.text() == TEXT_TAG) => {
                p.accept(whitespace);
                p.put_current_back();
            }
            Some(whitespace) => {
                p.put_current_back();
                p.put_back(whitespace);
            }
            None => p.put_current_back(),
        }
    }

    if !markup {
        return handle_statement(p, block, kind);
    }

    if kind == SyntaxKind::TRANSITION && !single_line_markup {
        p.on_error(
            location,
            messages::at_in_code_must_be_followed(),
            1,
            ErrorCode::UnexpectedCharacter,
        );
    }
    p.output(SpanKind::Code)?;
    if p.context().design_time && p.at_any(&[SyntaxKind::L_ANGLE, SyntaxKind::TRANSITION]) {
        p.put_current_back();
    }
    other_parser_block(p)
}

fn handle_statement(
    p: &mut CSharpParser<'_>,
    block: Option<&BlockInfo>,
    kind: SyntaxKind,
) -> ParseResult {
    match kind {
        SyntaxKind::RAZOR_COMMENT_TRANSITION => {
            p.output(SpanKind::Code)?;
            p.razor_comment()?;
            statement(p, block)
        }
        SyntaxKind::L_BRACE => {
            let block = block
                .cloned()
                .unwrap_or_else(|| BlockInfo::new(CODE_BLOCK_NAME, p.current_location()));
            p.accept_and_move_next();
            code_block(p, true, &block)
        }
        SyntaxKind::KEYWORD => keywords::handle_keyword(p, false, standard_statement),
        SyntaxKind::TRANSITION => embedded_expression(p),
        // End of the enclosing block; the caller takes it.
        SyntaxKind::R_BRACE => Ok(()),
        SyntaxKind::COMMENT => {
            p.accept_and_move_next();
            Ok(())
        }
        _ => standard_statement(p),
    }
}

/// `@` inside code: `@@` escapes it, anything else nests an expression.
fn embedded_expression(p: &mut CSharpParser<'_>) -> ParseResult {
    let Some(transition) = p.current().cloned() else {
        return Ok(());
    };
    p.next_token();

    if p.at(SyntaxKind::TRANSITION) {
        p.output(SpanKind::Code)?;
        p.accept(transition);
        p.set_generator(SpanChunkGenerator::None);
        p.output(SpanKind::Code)?;
        p.expected(SyntaxKind::TRANSITION);
        return standard_statement(p);
    }

    if p.at(SyntaxKind::L_BRACE) {
        let location = p.current_location();
        p.on_error(
            location,
            messages::unexpected_nested_code_block(),
            1,
            ErrorCode::NestedConstructNotAllowed,
        );
    }

    p.put_current_back();
    p.put_back(transition);
    p.add_marker_symbol_if_necessary();
    nested_block(p)
}

/// Any other statement: up to `;`, a balanced bracket group or the end of the block.
pub(super) fn standard_statement(p: &mut CSharpParser<'_>) -> ParseResult {
    while !p.eof() {
        let bookmark = p.current_location().absolute;
        let read = p.read_while(|s| {
            !matches!(
                s.kind,
                SyntaxKind::SEMICOLON
                    | SyntaxKind::RAZOR_COMMENT_TRANSITION
                    | SyntaxKind::TRANSITION
                    | SyntaxKind::L_BRACE
                    | SyntaxKind::L_PAREN
                    | SyntaxKind::L_BRACKET
                    | SyntaxKind::R_BRACE
            )
        });

        if p.at_any(&[SyntaxKind::L_BRACE, SyntaxKind::L_PAREN, SyntaxKind::L_BRACKET]) {
            p.accept_symbols(read);
            let complete = p.balance(
                BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES | BalancingModes::BACKTRACK_ON_FAILURE,
            )?;
            if complete {
                p.optional(SyntaxKind::R_BRACE);
            } else {
                p.accept_until(&[SyntaxKind::L_ANGLE, SyntaxKind::R_BRACE]);
                return Ok(());
            }
        } else if p.at(SyntaxKind::TRANSITION)
            && p.next_is_any(&[SyntaxKind::L_ANGLE, SyntaxKind::COLON])
        {
            p.accept_symbols(read);
            p.output(SpanKind::Code)?;
            template(p)?;
        } else if p.at(SyntaxKind::RAZOR_COMMENT_TRANSITION) {
            p.accept_symbols(read);
            p.razor_comment()?;
        } else if p.at(SyntaxKind::SEMICOLON) {
            p.accept_symbols(read);
            p.accept_and_move_next();
            return Ok(());
        } else if p.at(SyntaxKind::R_BRACE) {
            p.accept_symbols(read);
            return Ok(());
        } else {
            p.seek(bookmark);
            p.next_token();
            p.accept_until(&[SyntaxKind::L_ANGLE, SyntaxKind::L_BRACE, SyntaxKind::R_BRACE]);
            return Ok(());
        }
    }
    Ok(())
}
