//! C-family code parser
//!
//! Entered at a transition. The symbol after `@` picks the construct:
//!
//! - `(` - explicit expression
//! - a directive name (`inherits`, `section`, `helper`, ...) - its directive
//! - a keyword - the keyword's statement, or an implicit expression
//! - another identifier - implicit expression
//! - `{` - verbatim code block
//!
//! Code blocks hand markup (`<tag>`, `@:`, `@<tag>`) back to the markup
//! parser and resume once it returns.

mod directives;
mod expressions;
mod keywords;
mod statements;

use super::spacing;
use crate::base::SourceLocation;
use crate::parser::context::ParserContext;
use crate::parser::cursor::{SpanConfig, TokenCursor};
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::grammar::markup::SectionEnd;
use crate::parser::primitives::TokenParser;
use crate::parser::session::Session;
use crate::parser::symbol::Symbol;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    AcceptedCharacters, BlockChunkGenerator, BlockType, EditHandler, SpanChunkGenerator, SpanKind,
    SyntaxTreeNode,
};

pub(crate) use directives::Directive;

/// Words an editor must not treat as the continuation of an implicit expression.
pub(crate) const DEFAULT_KEYWORDS: &[&str] = &[
    "if",
    "do",
    "try",
    "for",
    "foreach",
    "while",
    "switch",
    "lock",
    "using",
    "section",
    "inherits",
    "helper",
    "functions",
    "layout",
    "sessionstate",
    "namespace",
    "class",
];

const CODE_BLOCK_NAME: &str = "code";
const EXPLICIT_EXPRESSION_NAME: &str = "explicit expression";

/// Name and start of a construct, for "missing terminator" diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockInfo {
    name: String,
    start: SourceLocation,
}

impl BlockInfo {
    fn new(name: impl Into<String>, start: SourceLocation) -> Self {
        Self {
            name: name.into(),
            start,
        }
    }

    fn from_symbol(symbol: &Symbol) -> Self {
        let name = match symbol.keyword {
            Some(keyword) => keyword.as_str().to_string(),
            None => symbol.text().to_string(),
        };
        Self::new(name, symbol.start)
    }
}

pub(crate) struct CSharpParser<'s> {
    session: &'s mut Session,
}

impl<'s> CSharpParser<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self { session }
    }

    fn is_nested(&self) -> bool {
        self.session.is_nested
    }

    /// The construct starting at the current symbol.
    fn current_block_info(&self) -> BlockInfo {
        match self.current() {
            Some(symbol) => BlockInfo::from_symbol(symbol),
            None => BlockInfo::new("", self.current_location()),
        }
    }

    fn set_accepted(&mut self, accepted: AcceptedCharacters) {
        self.cursor_mut().span.edit_handler.accepted_characters = accepted;
    }

    fn set_generator(&mut self, generator: SpanChunkGenerator) {
        self.cursor_mut().span.chunk_generator = generator;
    }

    /// Mark the in-progress span as a delimiter: nothing rendered, nothing accepted.
    fn set_delimiter(&mut self) {
        self.set_accepted(AcceptedCharacters::NONE);
        self.set_generator(SpanChunkGenerator::None);
    }
}

impl TokenParser for CSharpParser<'_> {
    fn parts(&mut self) -> (&mut ParserContext, &mut TokenCursor) {
        (&mut self.session.ctx, &mut self.session.code)
    }

    fn cursor(&self) -> &TokenCursor {
        &self.session.code
    }

    fn context(&self) -> &ParserContext {
        &self.session.ctx
    }

    fn output_span_before_razor_comment(&mut self) -> ParseResult {
        self.add_marker_symbol_if_necessary();
        self.output(SpanKind::Code)
    }

    fn is_at_embedded_transition(
        &mut self,
        allow_templates_and_comments: bool,
        _allow_transitions: bool,
    ) -> bool {
        if !allow_templates_and_comments {
            return false;
        }
        let Some(current) = self.current().cloned() else {
            return false;
        };
        let language = self.language();
        (language.is_transition(&current)
            && self.next_is_any(&[
                SyntaxKind::L_ANGLE,
                SyntaxKind::COLON,
                SyntaxKind::COLON_COLON,
            ]))
            || language.is_comment_start(&current)
    }

    fn handle_embedded_transition(&mut self) -> ParseResult {
        let Some(current) = self.current().cloned() else {
            return Ok(());
        };
        if self.language().is_transition(&current) {
            self.put_current_back();
            template(self)
        } else if self.language().is_comment_start(&current) {
            self.razor_comment()
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// Entry
// =============================================================================

/// Parse one code block, starting at (or just after) its transition.
pub(crate) fn parse_block(p: &mut CSharpParser<'_>) -> ParseResult {
    p.with_span_config(Some(SpanConfig::statement()), |p| {
        p.with_block(Some(BlockType::Statement), |p| {
            p.next_token();
            p.accept_while(spacing(true, true));

            let mut transition = None;
            let verbatim = p
                .current()
                .filter(|s| s.kind == SyntaxKind::STRING_LITERAL && s.text().starts_with('@'))
                .cloned();
            if let Some(literal) = verbatim {
                // `@"..."` after a transition: the `@` is the transition.
                let (head, tail) = p.language().split_symbol(&literal, 1, SyntaxKind::TRANSITION);
                transition = Some(head);
                if let Some(tail) = tail {
                    p.seek(tail.start.absolute);
                }
                p.next_token();
            } else if p.at(SyntaxKind::TRANSITION) {
                transition = p.current().cloned();
                p.next_token();
            }

            match transition {
                Some(transition) => {
                    if !p.cursor().span.is_empty() {
                        p.output(SpanKind::Code)?;
                    }
                    at_transition(p, transition)?;
                }
                None => after_transition(p)?,
            }
            p.output(SpanKind::Code)
        })
    })
}

fn at_transition(p: &mut CSharpParser<'_>, transition: Symbol) -> ParseResult {
    p.accept(transition);
    p.set_delimiter();
    p.output(SpanKind::Transition)?;
    after_transition(p)
}

fn after_transition(p: &mut CSharpParser<'_>) -> ParseResult {
    p.with_span_config(Some(SpanConfig::statement()), |p| {
        p.ensure_current();
        let result = classify_block(p);
        // The symbol that ended the block belongs to whoever runs next.
        p.put_current_back();
        result
    })
}

fn classify_block(p: &mut CSharpParser<'_>) -> ParseResult {
    match p.current_kind() {
        Some(SyntaxKind::L_PAREN) => {
            p.set_block_type(BlockType::Expression)?;
            p.set_block_generator(BlockChunkGenerator::Expression)?;
            return expressions::explicit_expression(p);
        }
        Some(SyntaxKind::IDENT) => {
            if let Some(directive) = Directive::lookup(p.current_text()) {
                p.set_generator(SpanChunkGenerator::None);
                return directives::parse_directive(p, directive);
            }
            return expressions::implicit_expression(p, AcceptedCharacters::NON_WHITESPACE);
        }
        Some(SyntaxKind::KEYWORD) => return keywords::keyword_block(p, true),
        Some(SyntaxKind::L_BRACE) => return statements::verbatim_block(p),
        _ => {}
    }

    // Nothing valid follows the transition.
    p.set_block_type(BlockType::Expression)?;
    p.set_block_generator(BlockChunkGenerator::Expression)?;
    p.add_marker_symbol_if_necessary();
    let nested = p.is_nested();
    let span = &mut p.cursor_mut().span;
    span.chunk_generator = SpanChunkGenerator::Expression;
    span.edit_handler = EditHandler::implicit_expression(
        DEFAULT_KEYWORDS,
        nested,
        AcceptedCharacters::NON_WHITESPACE,
    );

    let location = p.current_location();
    match p.current().cloned() {
        Some(current) if matches!(current.kind, SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE) => {
            p.on_error(
                location,
                messages::whitespace_at_start_of_code_block(),
                current.len(),
                ErrorCode::UnexpectedWhitespace,
            );
        }
        Some(current) => {
            p.on_error(
                location,
                messages::unexpected_character_at_start_of_code_block(current.text()),
                current.len(),
                ErrorCode::UnexpectedCharacter,
            );
        }
        None => {
            p.on_error(
                location,
                messages::end_of_file_at_start_of_code_block(),
                1,
                ErrorCode::UnexpectedEndOfFile,
            );
        }
    }
    Ok(())
}

// =============================================================================
// Block completion
// =============================================================================

/// Finish a statement-like block, optionally taking the rest of a code-only line.
fn complete_block(
    p: &mut CSharpParser<'_>,
    insert_marker: bool,
    capture_whitespace: bool,
) -> ParseResult {
    if insert_marker && p.context().last_accepted_characters() != AcceptedCharacters::ANY {
        p.add_marker_symbol_if_necessary();
    }
    p.ensure_current();

    let ctx = p.context();
    let in_expression = ctx.current_block()?.block_type == Some(BlockType::Expression);
    if !ctx.whitespace_is_significant_to_ancestor_block
        && !in_expression
        && capture_whitespace
        && !ctx.design_time
        && !p.is_nested()
    {
        capture_whitespace_at_end_of_code_only_line(p);
    } else {
        p.put_current_back();
    }
    Ok(())
}

fn complete(p: &mut CSharpParser<'_>) -> ParseResult {
    complete_block(p, true, true)
}

fn capture_whitespace_at_end_of_code_only_line(p: &mut CSharpParser<'_>) {
    let whitespace = p.read_while(|s| s.kind == SyntaxKind::WHITESPACE);
    if p.at_newline() {
        p.accept_symbols(whitespace);
        p.accept_and_move_next();
        p.put_current_back();
    } else {
        p.put_current_back();
        p.put_back_all(whitespace);
    }
}

/// Skip spacing and razor comments; the spacing before the next symbol is returned unread.
fn skip_to_next_important_token(p: &mut CSharpParser<'_>) -> ParseResult<Vec<Symbol>> {
    while !p.eof() {
        let whitespace = p.read_while(spacing(true, true));
        if p.at(SyntaxKind::RAZOR_COMMENT_TRANSITION) {
            p.accept_symbols(whitespace);
            p.set_accepted(AcceptedCharacters::ANY);
            p.razor_comment()?;
        } else {
            return Ok(whitespace);
        }
    }
    Ok(Vec::new())
}

/// Record the delimiter an editor should insert on an already emitted span.
fn set_auto_complete_on_child(
    p: &mut CSharpParser<'_>,
    index: usize,
    value: &'static str,
) -> ParseResult {
    if let Some(SyntaxTreeNode::Span(span)) =
        p.context_mut().current_block_mut()?.children.get_mut(index)
    {
        span.edit_handler.set_auto_complete_string(value);
    }
    Ok(())
}

// =============================================================================
// Hand-offs
// =============================================================================

/// `@<tag>...</tag>` inside code: a markup template.
fn template(p: &mut CSharpParser<'_>) -> ParseResult {
    if p.context().is_within(BlockType::Template) {
        let location = p.current_location();
        p.on_error(
            location,
            messages::nested_inline_markup(),
            1,
            ErrorCode::NestedConstructNotAllowed,
        );
    }
    p.output(SpanKind::Code)?;
    p.with_block(Some(BlockType::Template), |p| {
        p.set_block_generator(BlockChunkGenerator::Template)?;
        p.put_current_back();
        other_parser_block(p)
    })
}

fn other_parser_block(p: &mut CSharpParser<'_>) -> ParseResult {
    with_other_parser(p, Session::markup_block)
}

fn section_block(p: &mut CSharpParser<'_>, end: SectionEnd, case_sensitive: bool) -> ParseResult {
    with_other_parser(p, |session| session.markup_section(end, case_sensitive))
}

/// Run the markup parser. Markup is never nested code, so a trailing `.`
/// inside it stays markup.
fn with_other_parser(
    p: &mut CSharpParser<'_>,
    parse: impl FnOnce(&mut Session) -> ParseResult,
) -> ParseResult {
    let was_nested = p.is_nested();
    p.session.is_nested = false;
    p.with_span_config(None, |p| parse(&mut *p.session))?;
    p.initialize_span();
    p.session.is_nested = was_nested;
    p.next_token();
    Ok(())
}

/// `@x` or `@(x)` inside a code block: a nested code block.
fn nested_block(p: &mut CSharpParser<'_>) -> ParseResult {
    p.output(SpanKind::Code)?;
    let was_nested = p.is_nested();
    p.session.is_nested = true;
    p.with_span_config(None, parse_block)?;
    p.initialize_span();
    p.session.is_nested = was_nested;
    p.next_token();
    Ok(())
}
