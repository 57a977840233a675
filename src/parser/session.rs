//! One parse: the shared context plus a cursor for each parser.

use tracing::trace;

use super::context::{ActiveParser, ParserContext};
use super::cursor::TokenCursor;
use super::errors::ParseResult;
use super::grammar::csharp::CSharpParser;
use super::grammar::markup::{MarkupParser, SectionEnd};
use super::grammar::vb::VbParser;
use super::grammar::{csharp, markup, vb};
use super::language::{CodeDialect, Language};
use super::source::SourceReader;

#[derive(Debug)]
pub(crate) struct Session {
    pub ctx: ParserContext,
    pub markup: TokenCursor,
    pub code: TokenCursor,
    /// Set while the code parser runs inside another code block
    pub is_nested: bool,
}

impl Session {
    pub fn new(source: SourceReader, dialect: CodeDialect, design_time: bool) -> Self {
        Self {
            ctx: ParserContext::new(source, dialect, design_time),
            markup: TokenCursor::new(Language::Html),
            code: TokenCursor::new(dialect.language()),
            is_nested: false,
        }
    }

    /// Parse the whole document with the markup parser.
    pub fn parse_document(&mut self) -> ParseResult {
        markup::parse_document(&mut MarkupParser::new(self))
    }

    /// Hand the source from the markup parser to the code parser for one block.
    pub fn code_block(&mut self) -> ParseResult {
        debug_assert_eq!(self.ctx.active_parser(), ActiveParser::Markup);
        self.markup.flush(&mut self.ctx.source);
        self.ctx.switch_active_parser();
        trace!(position = self.ctx.source.position(), "markup -> code");
        match self.ctx.dialect() {
            CodeDialect::CSharp => csharp::parse_block(&mut CSharpParser::new(self))?,
            CodeDialect::VisualBasic => vb::parse_block(&mut VbParser::new(self))?,
        }
        self.code.flush(&mut self.ctx.source);
        self.ctx.switch_active_parser();
        trace!(position = self.ctx.source.position(), "code -> markup");
        Ok(())
    }

    /// Hand the source from the code parser to the markup parser for one block.
    pub fn markup_block(&mut self) -> ParseResult {
        self.with_markup(|p| markup::parse_block(p))
    }

    /// Hand the source to the markup parser for a section body.
    pub fn markup_section(&mut self, end: SectionEnd, case_sensitive: bool) -> ParseResult {
        self.with_markup(|p| markup::parse_section(p, end, case_sensitive))
    }

    fn with_markup(&mut self, f: impl FnOnce(&mut MarkupParser<'_>) -> ParseResult) -> ParseResult {
        debug_assert_eq!(
            self.ctx.active_parser(),
            ActiveParser::Code(self.ctx.dialect())
        );
        self.code.flush(&mut self.ctx.source);
        self.ctx.switch_active_parser();
        trace!(position = self.ctx.source.position(), "code -> markup");
        f(&mut MarkupParser::new(self))?;
        self.markup.flush(&mut self.ctx.source);
        self.ctx.switch_active_parser();
        trace!(position = self.ctx.source.position(), "markup -> code");
        Ok(())
    }
}
