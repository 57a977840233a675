//! Parse session state shared by the markup and code parsers.
//!
//! One [`ParserContext`] exists per parse. It owns the source, the stack of
//! open block builders and the diagnostics. Finished spans are appended to
//! the builder on top of the stack; finished blocks are appended to the
//! builder below them.

use super::errors::{ErrorCode, ParseResult, ParserError, RazorDiagnostic};
use super::language::CodeDialect;
use super::source::SourceReader;
use crate::base::SourceLocation;
use crate::syntax::{AcceptedCharacters, Block, BlockBuilder, BlockType, Span, SpanKind};

/// Which parser currently owns the token cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveParser {
    Markup,
    Code(CodeDialect),
}

#[derive(Debug)]
pub struct ParserContext {
    pub source: SourceReader,
    pub design_time: bool,
    /// Set while a `@:` line or a section body owns its surrounding whitespace.
    pub whitespace_is_significant_to_ancestor_block: bool,
    /// Set while a code construct is parsed that must not emit trailing whitespace.
    pub null_generate_whitespace_and_newline: bool,
    dialect: CodeDialect,
    active_parser: ActiveParser,
    block_stack: Vec<BlockBuilder>,
    errors: Vec<RazorDiagnostic>,
    last_span_kind: Option<SpanKind>,
    last_accepted_characters: AcceptedCharacters,
    terminated: bool,
}

impl ParserContext {
    pub fn new(source: SourceReader, dialect: CodeDialect, design_time: bool) -> Self {
        Self {
            source,
            design_time,
            whitespace_is_significant_to_ancestor_block: false,
            null_generate_whitespace_and_newline: false,
            dialect,
            active_parser: ActiveParser::Markup,
            block_stack: Vec::new(),
            errors: Vec::new(),
            last_span_kind: None,
            last_accepted_characters: AcceptedCharacters::NONE,
            terminated: false,
        }
    }

    pub fn dialect(&self) -> CodeDialect {
        self.dialect
    }

    pub fn active_parser(&self) -> ActiveParser {
        self.active_parser
    }

    #[cfg(test)]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[RazorDiagnostic] {
        &self.errors
    }

    pub fn last_span_kind(&self) -> Option<SpanKind> {
        self.last_span_kind
    }

    pub fn last_accepted_characters(&self) -> AcceptedCharacters {
        self.last_accepted_characters
    }

    fn ensure_not_terminated(&self) -> ParseResult {
        if self.terminated {
            Err(ParserError::SessionTerminated)
        } else {
            Ok(())
        }
    }

    /// Push a new builder; its type may be set later through [`Self::current_block_mut`].
    pub fn start_block(&mut self, block_type: Option<BlockType>) -> ParseResult {
        self.ensure_not_terminated()?;
        self.block_stack.push(BlockBuilder::new(block_type));
        Ok(())
    }

    /// Close the top builder.
    ///
    /// Closing the root marks the session terminated and leaves the root in
    /// place for [`Self::complete_parse`].
    pub fn end_block(&mut self) -> ParseResult {
        self.ensure_not_terminated()?;
        match self.block_stack.len() {
            0 => Err(ParserError::EndBlockWithoutStartBlock),
            1 => {
                self.terminated = true;
                Ok(())
            }
            _ => {
                let builder = self
                    .block_stack
                    .pop()
                    .ok_or(ParserError::EndBlockWithoutStartBlock)?;
                let block = builder.build()?;
                self.current_block_mut()?.children.push(block.into());
                Ok(())
            }
        }
    }

    pub fn add_span(&mut self, span: Span) -> ParseResult {
        self.ensure_not_terminated()?;
        self.last_span_kind = Some(span.kind);
        self.last_accepted_characters = span.edit_handler.accepted_characters;
        self.current_block_mut()?.children.push(span.into());
        Ok(())
    }

    pub fn current_block(&self) -> ParseResult<&BlockBuilder> {
        self.block_stack.last().ok_or(ParserError::NoCurrentBlock)
    }

    pub fn current_block_mut(&mut self) -> ParseResult<&mut BlockBuilder> {
        self.block_stack.last_mut().ok_or(ParserError::NoCurrentBlock)
    }

    /// Whether any open builder has the given type.
    pub fn is_within(&self, block_type: BlockType) -> bool {
        self.block_stack
            .iter()
            .any(|builder| builder.block_type == Some(block_type))
    }

    pub fn switch_active_parser(&mut self) {
        self.active_parser = match self.active_parser {
            ActiveParser::Markup => ActiveParser::Code(self.dialect),
            ActiveParser::Code(_) => ActiveParser::Markup,
        };
    }

    pub fn on_error(
        &mut self,
        location: SourceLocation,
        message: impl Into<String>,
        length: usize,
        code: ErrorCode,
    ) {
        self.errors
            .push(RazorDiagnostic::new(message, location, length, code));
    }

    pub fn push_error(&mut self, error: RazorDiagnostic) {
        self.errors.push(error);
    }

    /// Build the root block and hand back the diagnostics.
    pub fn complete_parse(self) -> ParseResult<(Block, Vec<RazorDiagnostic>)> {
        let mut stack = self.block_stack;
        match stack.len() {
            0 => Err(ParserError::NoRootBlock),
            1 => {
                let root = stack.pop().ok_or(ParserError::NoRootBlock)?;
                Ok((root.build()?, self.errors))
            }
            n => Err(ParserError::OutstandingBlocks(n - 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Symbol, SyntaxKind};
    use crate::syntax::SpanBuilder;

    fn context() -> ParserContext {
        ParserContext::new(SourceReader::new("abc"), CodeDialect::CSharp, false)
    }

    fn span(text: &str) -> Span {
        let mut builder = SpanBuilder::new(SourceLocation::ZERO);
        builder.accept(Symbol::new(SyntaxKind::TEXT, text, SourceLocation::ZERO));
        builder.build()
    }

    #[test]
    fn test_nested_blocks_attach_to_parent() {
        let mut ctx = context();
        ctx.start_block(Some(BlockType::Markup)).unwrap();
        ctx.start_block(Some(BlockType::Expression)).unwrap();
        assert!(ctx.is_within(BlockType::Markup));
        ctx.add_span(span("abc")).unwrap();
        ctx.end_block().unwrap();
        assert!(!ctx.is_within(BlockType::Expression));
        ctx.end_block().unwrap();
        assert!(ctx.is_terminated());

        let (root, errors) = ctx.complete_parse().unwrap();
        assert!(errors.is_empty());
        assert_eq!(root.block_type, BlockType::Markup);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.content(), "abc");
    }

    #[test]
    fn test_mutating_terminated_session_fails() {
        let mut ctx = context();
        ctx.start_block(Some(BlockType::Markup)).unwrap();
        ctx.end_block().unwrap();
        assert_eq!(ctx.add_span(span("a")), Err(ParserError::SessionTerminated));
        assert_eq!(
            ctx.start_block(Some(BlockType::Markup)),
            Err(ParserError::SessionTerminated)
        );
    }

    #[test]
    fn test_complete_parse_with_open_blocks_fails() {
        let mut ctx = context();
        ctx.start_block(Some(BlockType::Markup)).unwrap();
        ctx.start_block(Some(BlockType::Statement)).unwrap();
        assert_eq!(
            ctx.complete_parse().unwrap_err(),
            ParserError::OutstandingBlocks(1)
        );
    }

    #[test]
    fn test_protocol_misuse() {
        let mut ctx = context();
        assert_eq!(ctx.end_block(), Err(ParserError::EndBlockWithoutStartBlock));
        assert_eq!(ctx.add_span(span("a")), Err(ParserError::NoCurrentBlock));
        assert_eq!(context().complete_parse().unwrap_err(), ParserError::NoRootBlock);

        let mut ctx = context();
        ctx.start_block(Some(BlockType::Markup)).unwrap();
        ctx.start_block(None).unwrap();
        assert_eq!(ctx.end_block(), Err(ParserError::BlockTypeNotSpecified));
    }

    #[test]
    fn test_switch_active_parser_toggles() {
        let mut ctx = ParserContext::new(SourceReader::new(""), CodeDialect::VisualBasic, false);
        assert_eq!(ctx.active_parser(), ActiveParser::Markup);
        ctx.switch_active_parser();
        assert_eq!(
            ctx.active_parser(),
            ActiveParser::Code(CodeDialect::VisualBasic)
        );
        ctx.switch_active_parser();
        assert_eq!(ctx.active_parser(), ActiveParser::Markup);
    }

    #[test]
    fn test_errors_are_recorded_in_order() {
        let mut ctx = context();
        ctx.on_error(SourceLocation::ZERO, "first", 1, ErrorCode::UnexpectedCharacter);
        ctx.on_error(SourceLocation::new(2, 0, 2), "second", 1, ErrorCode::MissingExpectedToken);
        let messages: Vec<_> = ctx.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
    }
}
