//! Document and section productions.
//!
//! At document level tags do not delimit blocks: each tag is scanned into
//! its own `Tag` block and the text between tags stays flat. Start and end
//! tags are still matched against each other so that unbalanced markup is
//! reported.

use super::{
    MarkupParser, OpenTag, SCRIPT_TAG, SectionEnd, attributes, is_bang_escape, is_void_element,
    optional_bang_escape, report_missing_end_tag, report_unexpected_end_tag, skip_to,
    skip_to_and_parse_code, tags,
};
use crate::base::SourceLocation;
use crate::parser::cursor::SpanConfig;
use crate::parser::errors::ParseResult;
use crate::parser::grammar::spacing;
use crate::parser::primitives::TokenParser;
use crate::parser::symbol::Symbol;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{AcceptedCharacters, BlockType, SpanKind};

/// Parse the whole source as the root markup block.
pub(crate) fn parse_document(p: &mut MarkupParser<'_>) -> ParseResult {
    p.with_span_config(Some(SpanConfig::markup()), |p| {
        p.with_block(Some(BlockType::Markup), |p| {
            let mut open_tags = Vec::new();
            p.next_token();
            while !p.eof() {
                skip_to(p, SyntaxKind::L_ANGLE)?;
                scan_tag_in_document_context(p, &mut open_tags)?;
            }
            report_unclosed(p, &mut open_tags);
            p.add_marker_symbol_if_necessary();
            p.output(SpanKind::Markup)
        })
    })
}

/// Parse a section body up to (not including) its terminator.
pub(crate) fn parse_section(
    p: &mut MarkupParser<'_>,
    end: SectionEnd,
    case_sensitive: bool,
) -> ParseResult {
    p.with_span_config(Some(SpanConfig::markup()), |p| {
        p.with_block(Some(BlockType::Markup), |p| {
            let mut open_tags = Vec::new();
            p.next_token();
            p.case_sensitive = case_sensitive;
            match end {
                SectionEnd::Nesting { open, close } => {
                    nesting_section(p, open, close, &mut open_tags)?
                }
                SectionEnd::Terminator(words) => non_nesting_section(p, words, &mut open_tags)?,
            }
            report_unclosed(p, &mut open_tags);
            p.add_marker_symbol_if_necessary();
            p.output(SpanKind::Markup)
        })
    })
}

fn report_unclosed(p: &mut MarkupParser<'_>, open_tags: &mut Vec<OpenTag>) {
    for unclosed in open_tags.drain(..).rev() {
        report_missing_end_tag(p, &unclosed);
    }
}

/// Scan one tag, if the cursor is on one, into its own block.
fn scan_tag_in_document_context(
    p: &mut MarkupParser<'_>,
    open_tags: &mut Vec<OpenTag>,
) -> ParseResult {
    if !p.at(SyntaxKind::L_ANGLE) {
        return Ok(());
    }

    if p.next_is(SyntaxKind::BANG) {
        if !is_bang_escape(p, 1) {
            p.accept_and_move_next();
            tags::bang_tag(p)?;
            return Ok(());
        }
    } else if p.next_is(SyntaxKind::QUESTION) {
        p.accept_and_move_next();
        tags::xml_pi(p)?;
        return Ok(());
    }

    p.output(SpanKind::Markup)?;
    let tag_start = p.current_location();

    let raw_script = p.with_block(Some(BlockType::Tag), |p| {
        p.accept_and_move_next();

        if p.at(SyntaxKind::SLASH) {
            // End tag; whitespace before '>' is tolerated.
            p.optional(SyntaxKind::SLASH);
            optional_bang_escape(p)?;
            let name = p.current().filter(|s| s.kind == SyntaxKind::TEXT).cloned();
            p.optional(SyntaxKind::TEXT);
            p.optional(SyntaxKind::WHITESPACE);
            p.optional(SyntaxKind::R_ANGLE);
            if let Some(name) = name {
                close_document_tag(p, open_tags, name.text(), tag_start);
            }
            p.output(SpanKind::Markup)?;
            return Ok(false);
        }

        optional_bang_escape(p)?;
        let name = p.current().filter(|s| s.kind == SyntaxKind::TEXT).cloned();
        p.optional(SyntaxKind::TEXT);
        attributes::tag_content(p)?;
        let self_closing = p.optional(SyntaxKind::SLASH);
        p.optional(SyntaxKind::R_ANGLE);

        let Some(name) = name else {
            p.output(SpanKind::Markup)?;
            return Ok(false);
        };
        let is_script = name.text().eq_ignore_ascii_case(SCRIPT_TAG);
        // A script holding code is scanned raw so that "<" in it is not a tag.
        let raw_script = is_script && !attributes::current_script_tag_expects_html(p)?;
        if !self_closing && !raw_script && !is_void_element(name.text()) {
            open_tags.push(OpenTag {
                name: name.text().to_string(),
                start: tag_start,
            });
        }
        p.output(SpanKind::Markup)?;
        Ok(raw_script)
    })?;

    if raw_script {
        tags::skip_to_end_script_and_parse_code(p, AcceptedCharacters::ANY)?;
    }
    Ok(())
}

/// Match an end tag against the open tags of the document.
fn close_document_tag(
    p: &mut MarkupParser<'_>,
    open_tags: &mut Vec<OpenTag>,
    name: &str,
    tag_start: SourceLocation,
) {
    if is_void_element(name) {
        return;
    }
    match open_tags
        .iter()
        .rposition(|t| t.name.eq_ignore_ascii_case(name))
    {
        Some(index) => {
            for unclosed in open_tags.drain(index + 1..).rev() {
                report_missing_end_tag(p, &unclosed);
            }
            open_tags.pop();
        }
        None => report_unexpected_end_tag(p, name, tag_start),
    }
}

// =============================================================================
// Sections
// =============================================================================

/// A section ended by a keyword sequence, such as `End Section`.
fn non_nesting_section(
    p: &mut MarkupParser<'_>,
    words: &[&str],
    open_tags: &mut Vec<OpenTag>,
) -> ParseResult {
    loop {
        skip_to_and_parse_code(p, |p, s| s.kind == SyntaxKind::L_ANGLE || at_end(p, words))?;
        scan_tag_in_document_context(p, open_tags)?;
        if p.eof() || at_end(p, words) {
            break;
        }
    }
    p.put_current_back();
    Ok(())
}

/// A section ended by the `close` that balances its opening `open`.
///
/// Markup text is not split at braces by the tokenizer, so text symbols are
/// searched for the sequences and carved up where they occur.
fn nesting_section(
    p: &mut MarkupParser<'_>,
    open: &str,
    close: &str,
    open_tags: &mut Vec<OpenTag>,
) -> ParseResult {
    let mut nesting = 1i32;
    while nesting > 0 && !p.eof() {
        skip_to_and_parse_code(p, |_, s| {
            s.kind == SyntaxKind::TEXT || s.kind == SyntaxKind::L_ANGLE
        })?;
        if p.at(SyntaxKind::TEXT) {
            nesting += process_text_token(p, open, close, nesting);
            if p.current().is_some() {
                p.accept_and_move_next();
            } else if nesting > 0 {
                p.next_token();
            }
        } else {
            scan_tag_in_document_context(p, open_tags)?;
        }
    }
    Ok(())
}

/// Whether the cursor is on the keyword sequence `words`, separated by any
/// whitespace. The cursor is left where it was.
fn at_end(p: &mut MarkupParser<'_>, words: &[&str]) -> bool {
    p.ensure_current();
    let Some(first) = p.current().cloned() else {
        return false;
    };
    let Some(head) = words.first() else {
        return false;
    };
    if !p.text_eq(first.text(), head) {
        return false;
    }

    let mut matched = true;
    for word in words {
        if !p.eof() && !p.text_eq(p.current_text(), word) {
            matched = false;
            break;
        }
        p.next_token();
        while !p.eof() && p.current().is_some_and(spacing(true, false)) {
            p.next_token();
        }
    }

    p.seek(first.start.absolute);
    p.next_token();
    matched
}

/// Find the first `open` or `close` inside the current text symbol.
///
/// Returns +1 or -1 for a match and 0 otherwise. On a match, the text before
/// the sequence has been accepted and the cursor has moved: past the
/// sequence normally, or onto it when it closes the section.
fn process_text_token(p: &mut MarkupParser<'_>, open: &str, close: &str, nesting: i32) -> i32 {
    let Some(symbol) = p.current().cloned() else {
        return 0;
    };
    for (position, _) in symbol.text().char_indices() {
        let delta = match handle_nesting_sequence(p, &symbol, open, position, nesting, 1) {
            0 => handle_nesting_sequence(p, &symbol, close, position, nesting, -1),
            delta => delta,
        };
        if delta != 0 {
            return delta;
        }
    }
    0
}

fn handle_nesting_sequence(
    p: &mut MarkupParser<'_>,
    symbol: &Symbol,
    sequence: &str,
    position: usize,
    nesting: i32,
    delta: i32,
) -> i32 {
    let text = symbol.text();
    let Some(candidate) = text.get(position..position + sequence.len()) else {
        return 0;
    };
    if !p.text_eq(candidate, sequence) {
        return 0;
    }

    let (before, rest) = p.language().split_symbol(symbol, position, SyntaxKind::TEXT);
    let Some(rest) = rest else {
        return 0;
    };
    let (found, after) = p.language().split_symbol(&rest, sequence.len(), SyntaxKind::TEXT);

    p.put_current_back();
    if !before.is_empty() {
        p.accept(before);
    }

    if nesting + delta == 0 {
        // The section ends here; the caller takes the closing sequence.
        p.seek(found.start.absolute);
    } else {
        p.accept(found);
        p.seek(after.map_or(symbol.end(), |a| a.start.absolute));
    }
    delta
}
