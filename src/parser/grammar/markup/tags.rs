//! Tags inside markup blocks owned by the code parser.
//!
//! A markup block started from code runs until every start tag it opened is
//! closed again, so the parser keeps a stack of open tags here. `<text>` is a
//! pseudo-tag: it delimits markup without being rendered.

use super::{
    MarkupParser, OpenTag, SCRIPT_TAG, TEXT_TAG, attributes, is_void_element,
    optional_bang_escape, report_missing_end_tag, report_unexpected_end_tag, skip_to,
};
use crate::base::SourceLocation;
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::grammar::spacing;
use crate::parser::primitives::TokenParser;
use crate::parser::symbol::Symbol;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{AcceptedCharacters, BlockType, SpanChunkGenerator, SpanKind};

/// Parse tags until the stack of open tags is empty again.
pub(super) fn tag_block(p: &mut MarkupParser<'_>, tags: &mut Vec<OpenTag>) -> ParseResult {
    let mut complete = false;
    loop {
        skip_to(p, SyntaxKind::L_ANGLE)?;
        p.output(SpanKind::Markup)?;

        let at_special = at_special_tag(p);
        let mut open = false;
        if !p.eof() && !at_special {
            p.context_mut().start_block(Some(BlockType::Tag))?;
            open = true;
        }

        if p.eof() {
            end_tag_block(p, tags, true)?;
        } else {
            p.last_tag_start = p.current_location();
            p.buffered_open_angle = p.current().cloned();
            let tag_start = p.current_location();
            if !p.next_token() {
                p.accept_buffered_open_angle();
                end_tag_block(p, tags, false)?;
            } else {
                complete = after_tag_start(p, tag_start, tags, at_special, &mut open)?;
            }
        }

        if complete {
            p.cursor_mut().span.edit_handler.accepted_characters = AcceptedCharacters::NONE;
        }
        p.output(SpanKind::Markup)?;
        if open {
            p.context_mut().end_block()?;
        }

        if tags.is_empty() {
            break;
        }
    }
    end_tag_block(p, tags, complete)
}

fn after_tag_start(
    p: &mut MarkupParser<'_>,
    tag_start: SourceLocation,
    tags: &mut Vec<OpenTag>,
    at_special: bool,
    open: &mut bool,
) -> ParseResult<bool> {
    match p.current_kind() {
        Some(SyntaxKind::SLASH) => end_tag(p, tag_start, tags, open),
        Some(SyntaxKind::BANG) if at_special => {
            p.accept_buffered_open_angle();
            bang_tag(p)
        }
        Some(SyntaxKind::QUESTION) => {
            p.accept_buffered_open_angle();
            xml_pi(p)
        }
        Some(_) => start_tag(p, tags, open),
        None => {
            if tags.is_empty() {
                let location = p.current_location();
                p.on_error(
                    location,
                    messages::outer_tag_missing_name(),
                    1,
                    ErrorCode::UnexpectedEndOfFile,
                );
            }
            Ok(false)
        }
    }
}

// =============================================================================
// Special tags: <? ?>, <!-- -->, <![CDATA[ ]]>, <!DOCTYPE>
// =============================================================================

/// `<!--`, `<!DOCTYPE`, `<![CDATA[` and `<?`; a bang followed by a tag
/// name is an escaped tag instead.
pub(super) fn at_special_tag(p: &mut MarkupParser<'_>) -> bool {
    if !p.at(SyntaxKind::L_ANGLE) {
        return false;
    }
    if p.next_is(SyntaxKind::BANG) {
        return !super::is_bang_escape(p, 1);
    }
    p.next_is(SyntaxKind::QUESTION)
}

pub(super) fn xml_pi(p: &mut MarkupParser<'_>) -> ParseResult<bool> {
    p.expected(SyntaxKind::QUESTION);
    accept_until_all(p, &[SyntaxKind::QUESTION, SyntaxKind::R_ANGLE])
}

pub(super) fn bang_tag(p: &mut MarkupParser<'_>) -> ParseResult<bool> {
    if !p.accept_and_move_next() {
        return Ok(false);
    }

    if p.at(SyntaxKind::DOUBLE_HYPHEN) {
        p.accept_and_move_next();
        p.cursor_mut().span.edit_handler.accepted_characters = AcceptedCharacters::ANY;
        while !p.eof() {
            skip_to(p, SyntaxKind::DOUBLE_HYPHEN)?;
            if p.at(SyntaxKind::DOUBLE_HYPHEN) {
                p.accept_while_kinds(&[SyntaxKind::DOUBLE_HYPHEN]);
                if p.at(SyntaxKind::TEXT) && p.current_text() == "-" {
                    p.accept_and_move_next();
                }
                if p.at(SyntaxKind::R_ANGLE) {
                    p.accept_and_move_next();
                    return Ok(true);
                }
            }
        }
        Ok(false)
    } else if p.at(SyntaxKind::L_BRACKET) {
        if p.accept_and_move_next() {
            return cdata(p);
        }
        Ok(false)
    } else {
        p.accept_and_move_next();
        accept_until_all(p, &[SyntaxKind::R_ANGLE])
    }
}

fn cdata(p: &mut MarkupParser<'_>) -> ParseResult<bool> {
    if p.at(SyntaxKind::TEXT)
        && p.current_text().eq_ignore_ascii_case("cdata")
        && p.accept_and_move_next()
        && p.at(SyntaxKind::L_BRACKET)
    {
        return accept_until_all(
            p,
            &[SyntaxKind::R_BRACKET, SyntaxKind::R_BRACKET, SyntaxKind::R_ANGLE],
        );
    }
    Ok(false)
}

/// Accept up to and including `sequence`, parsing code on the way.
fn accept_until_all(p: &mut MarkupParser<'_>, sequence: &[SyntaxKind]) -> ParseResult<bool> {
    while !p.eof() {
        skip_to(p, sequence[0])?;
        if p.accept_all(sequence) {
            return Ok(true);
        }
    }
    p.cursor_mut().span.edit_handler.accepted_characters = AcceptedCharacters::ANY;
    Ok(false)
}

// =============================================================================
// End tags
// =============================================================================

fn end_tag(
    p: &mut MarkupParser<'_>,
    tag_start: SourceLocation,
    tags: &mut Vec<OpenTag>,
    open: &mut bool,
) -> ParseResult<bool> {
    let Some(solidus) = p.current().cloned() else {
        return Ok(false);
    };
    if !p.next_token() {
        p.accept_buffered_open_angle();
        p.accept(solidus);
        return Ok(false);
    }

    let tag_name = if p.at(SyntaxKind::BANG) {
        match p.lookahead(1) {
            Some(next) if next.kind == SyntaxKind::TEXT => format!("!{}", next.text()),
            _ => String::new(),
        }
    } else if p.at(SyntaxKind::TEXT) {
        p.current_text().to_string()
    } else {
        String::new()
    };

    let matched = remove_tag(p, tags, &tag_name, tag_start);

    // `</!text>` keeps its bang, so only the bare pseudo-tag ends here.
    if tags.is_empty() && matched && tag_name.eq_ignore_ascii_case(TEXT_TAG) {
        return end_text_tag(p, solidus, open);
    }

    p.accept_buffered_open_angle();
    p.accept(solidus);
    optional_bang_escape(p)?;
    p.accept_until(&[SyntaxKind::R_ANGLE]);
    Ok(p.optional(SyntaxKind::R_ANGLE))
}

fn end_text_tag(p: &mut MarkupParser<'_>, solidus: Symbol, open: &mut bool) -> ParseResult<bool> {
    p.accept_buffered_open_angle();
    p.accept(solidus);

    let text_location = p.current_location();
    p.expected(SyntaxKind::TEXT);

    let seen_close = p.optional(SyntaxKind::R_ANGLE);
    if seen_close {
        p.cursor_mut().span.edit_handler.accepted_characters = AcceptedCharacters::NONE;
    } else {
        p.on_error(
            text_location,
            messages::text_tag_cannot_contain_attributes(),
            TEXT_TAG.len(),
            ErrorCode::UnexpectedCharacter,
        );
        p.cursor_mut().span.edit_handler.accepted_characters = AcceptedCharacters::ANY;
        recover_text_tag(p);
    }

    p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
    let accepted = p.cursor().span.edit_handler.accepted_characters;
    complete_tag_block_with_span(p, open, accepted, SpanKind::Transition)?;
    Ok(seen_close)
}

/// A `<text>` tag has no attributes; skip whatever was written there.
fn recover_text_tag(p: &mut MarkupParser<'_>) {
    p.accept_until(&[SyntaxKind::R_ANGLE, SyntaxKind::NEWLINE]);
    p.optional(SyntaxKind::R_ANGLE);
}

/// Pop the stack down to `name`.
///
/// Every tag popped on the way was never closed. An end tag that matches
/// nothing closes everything still open, or is itself reported when the
/// stack is already empty.
fn remove_tag(
    p: &mut MarkupParser<'_>,
    tags: &mut Vec<OpenTag>,
    name: &str,
    tag_start: SourceLocation,
) -> bool {
    if let Some(index) = tags.iter().rposition(|t| t.name.eq_ignore_ascii_case(name)) {
        for unclosed in tags.drain(index + 1..).rev() {
            report_missing_end_tag(p, &unclosed);
        }
        tags.pop();
        return true;
    }

    if tags.is_empty() {
        report_unexpected_end_tag(p, name, tag_start);
    } else {
        for unclosed in tags.drain(..).rev() {
            report_missing_end_tag(p, &unclosed);
        }
    }
    false
}

// =============================================================================
// Start tags
// =============================================================================

fn start_tag(
    p: &mut MarkupParser<'_>,
    tags: &mut Vec<OpenTag>,
    open: &mut bool,
) -> ParseResult<bool> {
    let bang = p.at(SyntaxKind::BANG);
    let candidate = if bang { p.lookahead(1) } else { p.current().cloned() };
    let name = match candidate {
        Some(s) if s.kind == SyntaxKind::TEXT && bang => format!("!{}", s.text()),
        Some(s) if s.kind == SyntaxKind::TEXT => s.text().to_string(),
        _ => String::new(),
    };
    let tag = OpenTag {
        name,
        start: p.last_tag_start,
    };

    if tags.is_empty() && tag.name.eq_ignore_ascii_case(TEXT_TAG) {
        return text_tag(p, tag, tags, open);
    }

    p.accept_buffered_open_angle();
    optional_bang_escape(p)?;
    p.optional(SyntaxKind::TEXT);
    rest_of_tag(p, tag, tags, open)
}

/// `<text>` and `<text/>`: a transition into markup that renders nothing.
fn text_tag(
    p: &mut MarkupParser<'_>,
    tag: OpenTag,
    tags: &mut Vec<OpenTag>,
    open: &mut bool,
) -> ParseResult<bool> {
    p.output(SpanKind::Markup)?;
    p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;

    p.accept_buffered_open_angle();
    let text_location = p.current_location();
    p.expected(SyntaxKind::TEXT);

    let mut bookmark = p.current_location().absolute;
    let mut padding = p.read_while(spacing(true, false));
    let empty = p.at(SyntaxKind::SLASH);
    if empty {
        p.accept_symbols(padding);
        p.expected(SyntaxKind::SLASH);
        bookmark = p.current_location().absolute;
        padding = p.read_while(spacing(true, false));
    }

    if p.at(SyntaxKind::R_ANGLE) {
        p.accept_symbols(padding);
        p.expected(SyntaxKind::R_ANGLE);
        p.cursor_mut().span.edit_handler.accepted_characters = AcceptedCharacters::NONE;
    } else {
        p.seek(bookmark);
        p.next_token();
        p.on_error(
            text_location,
            messages::text_tag_cannot_contain_attributes(),
            TEXT_TAG.len(),
            ErrorCode::UnexpectedCharacter,
        );
        recover_text_tag(p);
    }

    if !empty {
        tags.push(tag);
    }

    let accepted = p.cursor().span.edit_handler.accepted_characters;
    complete_tag_block_with_span(p, open, accepted, SpanKind::Transition)?;
    Ok(true)
}

fn rest_of_tag(
    p: &mut MarkupParser<'_>,
    tag: OpenTag,
    tags: &mut Vec<OpenTag>,
    open: &mut bool,
) -> ParseResult<bool> {
    attributes::tag_content(p)?;

    // Another '<' abandons this tag.
    if p.at(SyntaxKind::L_ANGLE) {
        return Ok(false);
    }

    let self_closing = p.at(SyntaxKind::SLASH);
    if self_closing {
        p.accept_and_move_next();
    }

    let seen_close = p.optional(SyntaxKind::R_ANGLE);
    if !seen_close {
        p.on_error(
            tag.start.advance("<"),
            messages::unfinished_tag(&tag.name),
            tag.name.len().max(1),
            ErrorCode::UnterminatedConstruct,
        );
        return Ok(false);
    }
    if self_closing {
        return Ok(true);
    }

    let tag_name = tag.name.trim().to_string();
    if is_void_element(&tag_name) {
        complete_tag_block_with_span(p, open, AcceptedCharacters::NONE, SpanKind::Markup)?;
        if let Some(complete) = stray_void_end_tag(p, &tag_name)? {
            return Ok(complete);
        }
    } else if tag_name.eq_ignore_ascii_case(SCRIPT_TAG) {
        if attributes::current_script_tag_expects_html(p)? {
            tags.push(tag);
        } else {
            complete_tag_block_with_span(p, open, AcceptedCharacters::NONE, SpanKind::Markup)?;
            skip_to_end_script_and_parse_code(p, AcceptedCharacters::NONE)?;
        }
    } else {
        tags.push(tag);
    }
    Ok(true)
}

/// Void elements have no end tag, but one written anyway is taken into its
/// own tag block. Returns `None` (with the cursor restored) when none follows.
fn stray_void_end_tag(p: &mut MarkupParser<'_>, tag_name: &str) -> ParseResult<Option<bool>> {
    let bookmark = p.current_location().absolute;
    let whitespace = p.read_while(spacing(true, false));

    if p.at(SyntaxKind::L_ANGLE) && p.next_is(SyntaxKind::SLASH) {
        let open_angle = p.current().cloned();
        p.next_token();
        let solidus = p.current().cloned();
        p.next_token();
        if p.at(SyntaxKind::TEXT) && p.current_text().eq_ignore_ascii_case(tag_name) {
            p.accept_symbols(whitespace);
            p.output(SpanKind::Markup)?;

            let complete = p.with_block(Some(BlockType::Tag), |p| {
                p.accept_symbols(open_angle.into_iter().chain(solidus).collect());
                p.accept_and_move_next();
                p.accept_until(&[SyntaxKind::R_ANGLE, SyntaxKind::L_ANGLE]);
                let complete = p.optional(SyntaxKind::R_ANGLE);
                if complete {
                    p.cursor_mut().span.edit_handler.accepted_characters =
                        AcceptedCharacters::NONE;
                }
                p.output(SpanKind::Markup)?;
                Ok(complete)
            })?;
            return Ok(Some(complete));
        }
    }

    p.seek(bookmark);
    p.next_token();
    Ok(None)
}

/// Script content is not markup: skip to `</script>`, still parsing code.
pub(super) fn skip_to_end_script_and_parse_code(
    p: &mut MarkupParser<'_>,
    end_tag_accepted: AcceptedCharacters,
) -> ParseResult {
    let mut seen_end_script = false;
    while !seen_end_script && !p.eof() {
        skip_to(p, SyntaxKind::L_ANGLE)?;
        let tag_start = p.current_location();

        if p.next_is(SyntaxKind::SLASH) {
            if let Some(open_angle) = p.current().cloned() {
                p.next_token();
                let solidus = p.current().cloned();
                p.next_token();
                seen_end_script = p.at(SyntaxKind::TEXT)
                    && p.current_text().eq_ignore_ascii_case(SCRIPT_TAG);

                p.put_current_back();
                if let Some(solidus) = solidus {
                    p.put_back(solidus);
                }
                p.put_back(open_angle);
                p.next_token();
            }
        }

        if seen_end_script {
            p.output(SpanKind::Markup)?;
            p.with_block(Some(BlockType::Tag), |p| {
                p.cursor_mut().span.edit_handler.accepted_characters = end_tag_accepted;
                p.accept_and_move_next();
                p.accept_and_move_next();
                skip_to(p, SyntaxKind::R_ANGLE)?;
                if !p.optional(SyntaxKind::R_ANGLE) {
                    p.on_error(
                        tag_start.advance("</"),
                        messages::unfinished_tag(SCRIPT_TAG),
                        SCRIPT_TAG.len(),
                        ErrorCode::UnterminatedConstruct,
                    );
                }
                p.output(SpanKind::Markup)
            })?;
        } else {
            p.accept_and_move_next();
        }
    }
    Ok(())
}

// =============================================================================
// Block completion
// =============================================================================

/// Emit the pending span into the tag block and close it.
fn complete_tag_block_with_span(
    p: &mut MarkupParser<'_>,
    open: &mut bool,
    accepted: AcceptedCharacters,
    kind: SpanKind,
) -> ParseResult {
    p.cursor_mut().span.edit_handler.accepted_characters = accepted;
    p.output(kind)?;
    if std::mem::take(open) {
        p.context_mut().end_block()?;
    }
    Ok(())
}

/// Report what is still open and take the rest of the line.
///
/// Trailing whitespace and one newline belong to the markup block, unless
/// the block was a `<text>` region followed by more code on the next line.
fn end_tag_block(p: &mut MarkupParser<'_>, tags: &mut Vec<OpenTag>, complete: bool) -> ParseResult {
    if tags.is_empty() {
        if complete {
            p.cursor_mut().span.edit_handler.accepted_characters = AcceptedCharacters::NONE;
        }
    } else {
        for unclosed in tags.drain(..).rev() {
            report_missing_end_tag(p, &unclosed);
        }
    }

    let take_trailing = if p.context().design_time {
        p.cursor().span.edit_handler.accepted_characters == AcceptedCharacters::ANY
    } else if p.context().last_span_kind() == Some(SpanKind::Transition) {
        let padding = p.read_while(spacing(true, false));
        let markup_follows = p.at(SyntaxKind::L_ANGLE)
            || (p.at(SyntaxKind::TRANSITION)
                && p.lookahead(1).is_some_and(|s| s.text().starts_with(':')));
        p.put_current_back();
        p.put_back_all(padding);
        p.ensure_current();
        markup_follows
    } else {
        true
    };

    if take_trailing {
        p.accept_while_kinds(&[SyntaxKind::WHITESPACE]);
        p.optional(SyntaxKind::NEWLINE);
    }
    p.put_current_back();

    if !complete {
        p.add_marker_symbol_if_necessary();
    }
    p.output(SpanKind::Markup)
}
