//! BASIC-family code parser
//!
//! Blocks are closed by words, not braces: `Code` by `End Code`, `If` by
//! `End If`, `For` by `Next`, `Do` by `Loop`. Inside code a bare `<` is
//! code (an XML literal), so markup has to be introduced with `@<tag>` or
//! `@:`. Keywords and directive names match ignoring case.

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
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    AcceptedCharacters, BlockChunkGenerator, BlockType, EditHandler, SpanChunkGenerator, SpanKind,
    SyntaxTreeNode,
};

pub(crate) use directives::Directive;

/// Words an editor must not treat as the continuation of an implicit expression.
pub(crate) const DEFAULT_KEYWORDS: &[&str] = &[
    "code",
    "functions",
    "section",
    "helper",
    "layout",
    "sessionstate",
    "if",
    "do",
    "try",
    "for",
    "while",
    "select",
    "with",
    "synclock",
    "using",
    "imports",
    "inherits",
    "option",
    "namespace",
    "class",
];

const EXPLICIT_EXPRESSION_NAME: &str = "explicit expression";

/// Source text and start of the word opening a construct.
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
}

pub(crate) struct VbParser<'s> {
    session: &'s mut Session,
}

impl<'s> VbParser<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self { session }
    }

    fn is_nested(&self) -> bool {
        self.session.is_nested
    }

    fn current_block_info(&self) -> BlockInfo {
        match self.current() {
            Some(symbol) => BlockInfo::new(symbol.text(), symbol.start),
            None => BlockInfo::new("", self.current_location()),
        }
    }

    fn set_accepted(&mut self, accepted: AcceptedCharacters) {
        self.cursor_mut().span.edit_handler.accepted_characters = accepted;
    }

    fn set_generator(&mut self, generator: SpanChunkGenerator) {
        self.cursor_mut().span.chunk_generator = generator;
    }

    fn set_delimiter(&mut self) {
        self.set_accepted(AcceptedCharacters::NONE);
        self.set_generator(SpanChunkGenerator::None);
    }
}

impl TokenParser for VbParser<'_> {
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
        allow_transitions: bool,
    ) -> bool {
        let Some(current) = self.current().cloned() else {
            return false;
        };
        let language = self.language();
        if allow_templates_and_comments
            && ((language.is_transition(&current) && at_markup_transition(self))
                || language.is_comment_start(&current))
        {
            return true;
        }
        // both halves of `@@` stay inside the count
        allow_transitions
            && language.is_transition(&current)
            && !self.was(SyntaxKind::TRANSITION)
            && !self.next_is(SyntaxKind::TRANSITION)
    }

    fn handle_embedded_transition(&mut self) -> ParseResult {
        let Some(current) = self.current().cloned() else {
            return Ok(());
        };
        if self.language().is_comment_start(&current) {
            self.razor_comment()
        } else if at_markup_transition(self) {
            template(self)
        } else if self.language().is_transition(&current) {
            self.put_current_back();
            self.add_marker_symbol_if_necessary();
            nested_block(self)
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// Entry
// =============================================================================

/// Parse one code block, starting at (or just after) its transition.
pub(crate) fn parse_block(p: &mut VbParser<'_>) -> ParseResult {
    p.with_span_config(Some(SpanConfig::statement()), |p| {
        p.with_block(Some(BlockType::Statement), |p| {
            p.next_token();
            p.accept_while(spacing(true, true));

            if p.at(SyntaxKind::TRANSITION) {
                if !p.cursor().span.is_empty() {
                    p.output(SpanKind::Code)?;
                }
                p.accept_and_move_next();
                p.set_delimiter();
                p.output(SpanKind::Transition)?;
            }
            after_transition(p)?;
            p.output(SpanKind::Code)
        })
    })
}

fn after_transition(p: &mut VbParser<'_>) -> ParseResult {
    p.with_span_config(Some(SpanConfig::statement()), |p| {
        p.ensure_current();
        let result = classify_block(p);
        p.put_current_back();
        result
    })
}

fn classify_block(p: &mut VbParser<'_>) -> ParseResult {
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
        Some(SyntaxKind::KEYWORD) => return keywords::keyword_block(p),
        _ => {}
    }

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
// Terminators
// =============================================================================

/// Whether the next symbols spell `words`, separated by whitespace.
/// Nothing is consumed.
fn at_words(p: &mut VbParser<'_>, words: &[&str]) -> bool {
    p.ensure_current();
    let Some((head, rest)) = words.split_first() else {
        return false;
    };
    if !p.current().is_some_and(|s| s.text().eq_ignore_ascii_case(head)) {
        return false;
    }

    let mut offset = 1;
    for word in rest {
        let mut next = p.lookahead(offset);
        while next.as_ref().is_some_and(|s| s.kind == SyntaxKind::WHITESPACE) {
            offset += 1;
            next = p.lookahead(offset);
        }
        if !next.is_some_and(|s| s.text().eq_ignore_ascii_case(word)) {
            return false;
        }
        offset += 1;
    }
    true
}

/// Accept `words` and the whitespace between them; [`at_words`] must hold.
fn accept_words(p: &mut VbParser<'_>, words: &[&str]) {
    for index in 0..words.len() {
        if index > 0 {
            p.accept_while_kinds(&[SyntaxKind::WHITESPACE]);
        }
        p.accept_and_move_next();
    }
}

fn report_unterminated(p: &mut VbParser<'_>, block: &BlockInfo, end: &[&str]) {
    p.on_error(
        block.start,
        messages::block_not_terminated(&block.name, &end.join(" ")),
        block.name.len().max(1),
        ErrorCode::UnterminatedConstruct,
    );
}

/// `@<tag>` or `@:` with the cursor on the `@`.
fn at_markup_transition(p: &mut VbParser<'_>) -> bool {
    p.at(SyntaxKind::TRANSITION) && p.next_is_any(&[SyntaxKind::L_ANGLE, SyntaxKind::COLON])
}

// =============================================================================
// Block completion
// =============================================================================

fn complete_block(p: &mut VbParser<'_>, insert_marker: bool, capture_whitespace: bool) -> ParseResult {
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
        let whitespace = p.read_while(|s| s.kind == SyntaxKind::WHITESPACE);
        if p.at_newline() {
            p.accept_symbols(whitespace);
            p.accept_and_move_next();
            p.put_current_back();
        } else {
            p.put_current_back();
            p.put_back_all(whitespace);
        }
    } else {
        p.put_current_back();
    }
    Ok(())
}

fn complete(p: &mut VbParser<'_>) -> ParseResult {
    complete_block(p, true, true)
}

fn set_auto_complete_on_child(p: &mut VbParser<'_>, index: usize, value: &'static str) -> ParseResult {
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

/// `@<tag>` or `@:` in the middle of a statement: a markup template.
fn template(p: &mut VbParser<'_>) -> ParseResult {
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

fn other_parser_block(p: &mut VbParser<'_>) -> ParseResult {
    with_other_parser(p, Session::markup_block)
}

fn section_block(p: &mut VbParser<'_>, end: SectionEnd) -> ParseResult {
    with_other_parser(p, |session| session.markup_section(end, false))
}

fn with_other_parser(
    p: &mut VbParser<'_>,
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

/// `@x` or `@(x)` inside code, with the `@` put back.
fn nested_block(p: &mut VbParser<'_>) -> ParseResult {
    p.output(SpanKind::Code)?;
    let was_nested = p.is_nested();
    p.session.is_nested = true;
    p.with_span_config(None, parse_block)?;
    p.initialize_span();
    p.session.is_nested = was_nested;
    p.next_token();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::RazorDiagnostic;
    use crate::parser::language::CodeDialect;
    use crate::parser::source::SourceReader;
    use crate::syntax::Block;

    pub(super) fn parse(text: &str) -> (Block, Vec<RazorDiagnostic>) {
        let mut session = Session::new(SourceReader::new(text), CodeDialect::VisualBasic, false);
        session.parse_document().unwrap();
        session.ctx.complete_parse().unwrap()
    }

    pub(super) fn first_code_block(root: &Block) -> &Block {
        root.child_blocks()
            .find(|b| b.block_type != BlockType::Markup && b.block_type != BlockType::Tag)
            .expect("no code block")
    }

    #[test]
    fn test_implicit_expression() {
        let (root, errors) = parse("<p>@Model.Items(0).Name</p>");
        assert!(errors.is_empty(), "{errors:?}");
        let block = root
            .descendant_blocks()
            .into_iter()
            .find(|b| b.block_type == BlockType::Expression)
            .unwrap();
        assert_eq!(block.content(), "@Model.Items(0).Name");
    }

    #[test]
    fn test_keyword_as_expression() {
        let (root, errors) = parse("@Me.Title x");
        assert!(errors.is_empty());
        let block = first_code_block(&root);
        assert_eq!(block.block_type, BlockType::Expression);
        assert_eq!(block.content(), "@Me.Title");
    }

    #[test]
    fn test_whitespace_after_transition() {
        let (_, errors) = parse("@ x");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::UnexpectedWhitespace);
    }

    #[test]
    fn test_directive_names_ignore_case() {
        let (root, errors) = parse("@code\nx = 1\nend code\n");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(first_code_block(&root).block_type, BlockType::Statement);
        assert_eq!(root.content(), "@code\nx = 1\nend code\n");
    }
}
