//! Markup dialect parser
//!
//! Markup is scanned symbol by symbol until a tag or a transition shows up.
//! A transition hands the source to the code parser for one block; a tag is
//! parsed into a `Tag` block with its attributes. Three entry points exist:
//! the whole document, one markup block requested by the code parser (an
//! inline tag or `@:` line), and a section body.

mod attributes;
mod document;
mod tags;

pub(crate) use document::{parse_document, parse_section};

use super::spacing;
use crate::base::SourceLocation;
use crate::parser::context::ParserContext;
use crate::parser::cursor::{SpanConfig, TokenCursor};
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::primitives::TokenParser;
use crate::parser::session::Session;
use crate::parser::symbol::Symbol;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{AcceptedCharacters, BlockType, EditHandler, SpanChunkGenerator, SpanKind};

/// Elements that never have content or an end tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

const SCRIPT_TAG: &str = "script";
pub(crate) const TEXT_TAG: &str = "text";

pub(crate) fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// How a section body ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionEnd {
    /// Ends at the `close` that balances the already consumed `open`
    Nesting {
        open: &'static str,
        close: &'static str,
    },
    /// Ends at a keyword sequence such as `End Section`
    Terminator(&'static [&'static str]),
}

/// A start tag waiting for its end tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenTag {
    pub name: String,
    /// Location of the `<`
    pub start: SourceLocation,
}

pub(crate) struct MarkupParser<'s> {
    session: &'s mut Session,
    last_tag_start: SourceLocation,
    buffered_open_angle: Option<Symbol>,
    case_sensitive: bool,
}

impl<'s> MarkupParser<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self {
            session,
            last_tag_start: SourceLocation::ZERO,
            buffered_open_angle: None,
            case_sensitive: true,
        }
    }

    fn text_eq(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    }

    fn accept_buffered_open_angle(&mut self) {
        if let Some(open_angle) = self.buffered_open_angle.clone() {
            self.accept(open_angle);
        }
    }
}

impl TokenParser for MarkupParser<'_> {
    fn parts(&mut self) -> (&mut ParserContext, &mut TokenCursor) {
        (&mut self.session.ctx, &mut self.session.markup)
    }

    fn cursor(&self) -> &TokenCursor {
        &self.session.markup
    }

    fn context(&self) -> &ParserContext {
        &self.session.ctx
    }

    fn output_span_before_razor_comment(&mut self) -> ParseResult {
        self.output(SpanKind::Markup)
    }
}

/// Parse one markup block on behalf of the code parser.
///
/// The block is either a tag (with everything up to its matching end tag),
/// a `@:` line, or an `@<tag>` template body.
pub(crate) fn parse_block(p: &mut MarkupParser<'_>) -> ParseResult {
    p.with_span_config(Some(SpanConfig::markup()), |p| {
        p.with_block(Some(BlockType::Markup), |p| {
            if !p.next_token() {
                return Ok(());
            }
            p.accept_while(spacing(true, false));

            match p.current_kind() {
                Some(SyntaxKind::L_ANGLE) => tags::tag_block(p, &mut Vec::new())?,
                Some(SyntaxKind::TRANSITION) => {
                    p.output(SpanKind::Markup)?;
                    p.expected(SyntaxKind::TRANSITION);
                    let span = &mut p.cursor_mut().span;
                    span.edit_handler.accepted_characters = AcceptedCharacters::NONE;
                    span.chunk_generator = SpanChunkGenerator::None;
                    p.output(SpanKind::Transition)?;
                    if p.at(SyntaxKind::TRANSITION) {
                        p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
                        p.accept_and_move_next();
                        p.output(SpanKind::MetaCode)?;
                    }
                    after_transition(p)?;
                }
                Some(_) => {
                    if let Some(current) = p.current().cloned() {
                        p.on_error(
                            current.start,
                            messages::markup_block_must_start_with_tag(),
                            current.len(),
                            ErrorCode::UnexpectedCharacter,
                        );
                    }
                }
                None => {}
            }
            p.output(SpanKind::Markup)
        })
    })
}

fn after_transition(p: &mut MarkupParser<'_>) -> ParseResult {
    let single_line = p
        .current()
        .filter(|s| s.kind == SyntaxKind::TEXT && s.text().starts_with(':'))
        .cloned();
    if let Some(current) = single_line {
        // "@:" => the rest of the line is markup
        let (colon, rest) = p.language().split_symbol(&current, 1, SyntaxKind::COLON);
        p.accept(colon);
        p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
        p.output(SpanKind::MetaCode)?;
        if let Some(rest) = rest {
            p.accept(rest);
        }
        p.next_token();
        single_line_markup(p)
    } else if p.at(SyntaxKind::L_ANGLE) {
        tags::tag_block(p, &mut Vec::new())
    } else {
        Ok(())
    }
}

fn single_line_markup(p: &mut MarkupParser<'_>) -> ParseResult {
    let old = p.context().whitespace_is_significant_to_ancestor_block;
    p.context_mut().whitespace_is_significant_to_ancestor_block = true;
    p.cursor_mut().span.edit_handler = EditHandler::default();

    skip_to(p, SyntaxKind::NEWLINE)?;
    if !p.eof() && p.at_newline() {
        p.accept_and_move_next();
        p.cursor_mut().span.edit_handler.accepted_characters = AcceptedCharacters::NONE;
    }
    p.put_current_back();

    p.context_mut().whitespace_is_significant_to_ancestor_block = old;
    p.output(SpanKind::Markup)
}

// =============================================================================
// Scanning
// =============================================================================

pub(crate) fn skip_to(p: &mut MarkupParser<'_>, kind: SyntaxKind) -> ParseResult {
    skip_to_and_parse_code(p, |_, s| s.kind == kind)
}

/// Accept markup until `stop` holds for the current symbol, handing every
/// transition to the code parser on the way.
///
/// Indentation in front of a transition at the start of a line is given to
/// the code block rather than left in the markup (except at design time).
pub(crate) fn skip_to_and_parse_code<'s>(
    p: &mut MarkupParser<'s>,
    mut stop: impl FnMut(&mut MarkupParser<'s>, &Symbol) -> bool,
) -> ParseResult {
    let mut last: Option<Symbol> = None;
    let mut start_of_line = false;

    while p.ensure_current() {
        let Some(current) = p.current().cloned() else {
            break;
        };
        if stop(p, &current) {
            break;
        }

        if p.context().null_generate_whitespace_and_newline {
            p.context_mut().null_generate_whitespace_and_newline = false;
            p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
            p.accept_while(spacing(false, false));
            if p.at_newline() {
                p.accept_and_move_next();
            }
            p.output(SpanKind::Markup)?;
        } else if current.kind == SyntaxKind::NEWLINE {
            if let Some(last) = last.take() {
                p.accept(last);
            }
            start_of_line = true;
            p.accept_and_move_next();
        } else if current.kind == SyntaxKind::TRANSITION {
            p.next_token();
            if p.at(SyntaxKind::TRANSITION) {
                // "@@" => a literal "@"; the first one renders nothing
                if let Some(last) = last.take() {
                    p.accept(last);
                }
                p.output(SpanKind::Markup)?;
                p.accept(current);
                p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
                p.output(SpanKind::Markup)?;
                p.accept_and_move_next();
                continue;
            }
            p.put_current_back();
            p.put_back(current);

            if let Some(whitespace) = last.take() {
                if !p.context().design_time
                    && whitespace.kind == SyntaxKind::WHITESPACE
                    && start_of_line
                {
                    start_of_line = false;
                    p.put_back(whitespace);
                } else {
                    p.accept(whitespace);
                }
            }
            other_parser_block(p)?;
        } else if current.kind == SyntaxKind::RAZOR_COMMENT_TRANSITION {
            if let Some(whitespace) = last.take() {
                // Indentation in front of a comment renders nothing.
                if start_of_line && whitespace.kind == SyntaxKind::WHITESPACE {
                    p.add_marker_symbol_if_necessary();
                    p.output(SpanKind::Markup)?;
                    p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
                }
                p.accept(whitespace);
            }
            p.add_marker_symbol_if_necessary();
            p.output(SpanKind::Markup)?;

            p.razor_comment()?;

            let line_ends = p.at_newline()
                || (p.at_whitespace() && p.next_is(SyntaxKind::NEWLINE));
            if start_of_line && line_ends {
                p.accept_while(spacing(false, false));
                p.accept_and_move_next();
                p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
                p.output(SpanKind::Markup)?;
            }
        } else {
            start_of_line &= current.kind == SyntaxKind::WHITESPACE;
            if let Some(last) = last.take() {
                p.accept(last);
            }
            last = Some(current);
            p.next_token();
        }
    }

    if let Some(last) = last {
        p.accept(last);
    }
    Ok(())
}

/// Hand the source to the code parser for one block and resume after it.
pub(crate) fn other_parser_block(p: &mut MarkupParser<'_>) -> ParseResult {
    p.add_marker_symbol_if_necessary();
    p.output(SpanKind::Markup)?;
    p.with_span_config(None, |p| p.session.code_block())?;
    p.initialize_span();
    p.next_token();
    Ok(())
}

// =============================================================================
// Bang escapes: `<!p>` is a `p` tag that is not a tag helper
// =============================================================================

fn is_bang_escape(p: &mut MarkupParser<'_>, lookahead: usize) -> bool {
    match p.lookahead(lookahead) {
        Some(bang) if bang.kind == SyntaxKind::BANG => p
            .lookahead(lookahead + 1)
            .is_some_and(|after| {
                after.kind == SyntaxKind::TEXT && !after.text().eq_ignore_ascii_case("DOCTYPE")
            }),
        _ => false,
    }
}

fn optional_bang_escape(p: &mut MarkupParser<'_>) -> ParseResult {
    if is_bang_escape(p, 0) {
        p.output(SpanKind::Markup)?;
        p.expected(SyntaxKind::BANG);
        p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
        p.output_with(SpanKind::MetaCode, AcceptedCharacters::NONE)?;
    }
    Ok(())
}

fn report_missing_end_tag(p: &mut MarkupParser<'_>, tag: &OpenTag) {
    p.on_error(
        tag.start.advance("<"),
        messages::missing_end_tag(&tag.name),
        tag.name.len(),
        ErrorCode::MissingEndTag,
    );
}

fn report_unexpected_end_tag(p: &mut MarkupParser<'_>, name: &str, tag_start: SourceLocation) {
    p.on_error(
        tag_start.advance("</"),
        messages::unexpected_end_tag(name),
        name.len(),
        ErrorCode::UnexpectedEndTag,
    );
}
