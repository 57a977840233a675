//! Code lines inside word-terminated blocks.
//!
//! A body is read symbol by symbol until its terminator words show up.
//! Block keywords at the start of a statement open a nested body with its
//! own terminator, so an inner `End If` never closes an outer one.

use super::{
    VbParser, accept_words, at_markup_transition, at_words, keywords, nested_block,
    other_parser_block, report_unterminated, template,
};
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::grammar::spacing;
use crate::parser::keywords::{Keyword, VbKeyword};
use crate::parser::primitives::TokenParser;
use crate::parser::symbol::Symbol;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{SpanChunkGenerator, SpanKind};

/// Code up to the words in `end`, which are left current.
///
/// Returns whether they were found before the end of input. `line_start`
/// says whether the first symbol begins a statement.
pub(super) fn statement_body(
    p: &mut VbParser<'_>,
    end: &[&str],
    line_start: bool,
) -> ParseResult<bool> {
    let mut statement_start = line_start;
    // `x.Next` is a member, not a terminator
    let mut after_dot = false;
    // `_` at the end of a line joins it with the next one
    let mut continued = false;
    loop {
        if statement_start {
            let whitespace = p.accept_whitespace_in_lines();
            if at_markup_transition(p) {
                markup_statement(p, whitespace)?;
                continue;
            }
            if let Some(whitespace) = whitespace {
                p.accept(whitespace);
            }
        }

        if !p.ensure_current() {
            return Ok(false);
        }
        if !after_dot && at_words(p, end) {
            return Ok(true);
        }

        let Some(kind) = p.current_kind() else {
            return Ok(false);
        };
        after_dot = kind == SyntaxKind::DOT;
        let was_continued = continued;
        if kind != SyntaxKind::WHITESPACE {
            continued = kind == SyntaxKind::LINE_CONTINUATION;
        }
        let was_statement_start = statement_start;
        statement_start = false;
        match kind {
            SyntaxKind::NEWLINE => {
                p.accept_and_move_next();
                statement_start = !was_continued;
            }
            // `:` separates statements, `:=` names an argument
            SyntaxKind::COLON if !p.next_is(SyntaxKind::EQ) => {
                p.accept_and_move_next();
                statement_start = true;
            }
            SyntaxKind::TRANSITION => embedded_transition(p)?,
            SyntaxKind::RAZOR_COMMENT_TRANSITION => p.razor_comment()?,
            SyntaxKind::KEYWORD if was_statement_start => statement_keyword(p)?,
            _ => {
                p.accept_and_move_next();
            }
        }
    }
}

/// `@<tag>` or `@:` opening a statement: the markup parser takes the line or element.
fn markup_statement(p: &mut VbParser<'_>, whitespace: Option<Symbol>) -> ParseResult {
    if p.context().design_time {
        if let Some(whitespace) = whitespace {
            p.accept(whitespace);
        }
        p.put_current_back();
    } else {
        // Indentation renders with the markup.
        p.put_current_back();
        if let Some(whitespace) = whitespace {
            p.put_back(whitespace);
        }
    }
    p.output(SpanKind::Code)?;
    other_parser_block(p)
}

/// `@` in the middle of a statement.
fn embedded_transition(p: &mut VbParser<'_>) -> ParseResult {
    if at_markup_transition(p) {
        return template(p);
    }

    if p.next_is(SyntaxKind::TRANSITION) {
        // `@@`: the first one is dropped from the output
        p.output(SpanKind::Code)?;
        p.accept_and_move_next();
        p.set_generator(SpanChunkGenerator::None);
        p.output(SpanKind::Code)?;
        p.accept_and_move_next();
        return Ok(());
    }

    p.put_current_back();
    p.add_marker_symbol_if_necessary();
    nested_block(p)
}

/// A keyword starting a statement inside a body.
fn statement_keyword(p: &mut VbParser<'_>) -> ParseResult {
    let keyword = match p.current().and_then(|s| s.keyword) {
        Some(Keyword::Vb(keyword)) => keyword,
        _ => {
            p.accept_and_move_next();
            return Ok(());
        }
    };

    if let Some(end) = keywords::block_end(keyword) {
        let block = p.current_block_info();
        if !keyword_statement(p, end)? {
            report_unterminated(p, &block, end);
        }
        return Ok(());
    }

    match keyword {
        // `Exit For` and `Continue Do` name a block without opening one.
        VbKeyword::Exit | VbKeyword::Continue => {
            p.accept_and_move_next();
            p.accept_while_kinds(&[SyntaxKind::WHITESPACE]);
            p.optional(SyntaxKind::KEYWORD);
        }
        VbKeyword::Imports => {
            let block = p.current_block_info();
            p.on_error(
                block.start,
                messages::import_within_code_block(),
                block.name.len(),
                ErrorCode::NestedConstructNotAllowed,
            );
            p.accept_and_move_next();
        }
        _ => {
            p.accept_and_move_next();
        }
    }
    Ok(())
}

/// A block keyword's statement through its terminator.
///
/// Returns `false` when the input ended first.
pub(super) fn keyword_statement(p: &mut VbParser<'_>, end: &[&str]) -> ParseResult<bool> {
    let is_if = p.at_keyword(VbKeyword::If);
    p.accept_and_move_next();
    if is_if && single_line_if(p) {
        return Ok(true);
    }

    if !statement_body(p, end, false)? {
        return Ok(false);
    }
    accept_words(p, end);
    if end.len() == 1 {
        // `Next i`, `Loop Until done`
        p.accept_until(&[SyntaxKind::NEWLINE]);
    }
    Ok(true)
}

/// `If x Then y` has no `End If`. Reads the condition, and for the
/// single-line form the rest of the line.
fn single_line_if(p: &mut VbParser<'_>) -> bool {
    while p.ensure_current()
        && !p.at_newline()
        && !p.at_keyword(VbKeyword::Then)
        && !p.at(SyntaxKind::TRANSITION)
    {
        p.accept_and_move_next();
    }
    if !p.optional_keyword(VbKeyword::Then) {
        return false;
    }

    p.accept_while(spacing(false, true));
    if p.eof() || p.at_newline() {
        return false;
    }
    p.accept_until(&[SyntaxKind::NEWLINE]);
    true
}
