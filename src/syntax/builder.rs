//! Mutable builders for spans and blocks.
//!
//! A parser accumulates symbols in a [`SpanBuilder`] and, when a span is
//! complete, turns it into an immutable [`Span`]. Blocks are built the same
//! way from a [`BlockBuilder`] once every child has been added.

use super::block::{Block, SyntaxTreeNode};
use super::edit::EditHandler;
use super::generators::{BlockChunkGenerator, SpanChunkGenerator};
use super::kinds::{BlockType, SpanKind};
use super::span::Span;
use crate::base::SourceLocation;
use crate::parser::errors::{ParseResult, ParserError};
use crate::parser::Symbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanBuilder {
    pub kind: SpanKind,
    pub start: SourceLocation,
    pub chunk_generator: SpanChunkGenerator,
    pub edit_handler: EditHandler,
    symbols: Vec<Symbol>,
}

impl SpanBuilder {
    pub fn new(start: SourceLocation) -> Self {
        Self {
            kind: SpanKind::Markup,
            start,
            chunk_generator: SpanChunkGenerator::None,
            edit_handler: EditHandler::default(),
            symbols: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Appends a symbol; the first symbol fixes the span start.
    pub fn accept(&mut self, symbol: Symbol) {
        if self.symbols.is_empty() {
            self.start = symbol.start;
        }
        self.symbols.push(symbol);
    }

    pub fn content(&self) -> String {
        self.symbols.iter().map(|s| s.text.as_str()).collect()
    }

    /// Location one past the last accepted symbol.
    pub fn end(&self) -> SourceLocation {
        match self.symbols.last() {
            Some(last) => last.start.advance(&last.text),
            None => self.start,
        }
    }

    pub fn clear_symbols(&mut self) {
        self.symbols.clear();
    }

    /// Clears symbols and metadata, keeping the start at the current end.
    pub fn reset(&mut self) {
        self.start = self.end();
        self.symbols.clear();
        self.chunk_generator = SpanChunkGenerator::None;
        self.edit_handler = EditHandler::default();
    }

    /// Builds the span and resets the builder for the next one.
    pub fn build(&mut self) -> Span {
        let span = Span {
            kind: self.kind,
            content: self.content(),
            symbols: std::mem::take(&mut self.symbols),
            start: self.start,
            chunk_generator: self.chunk_generator.clone(),
            edit_handler: self.edit_handler.clone(),
        };
        self.start = span.start.advance(&span.content);
        self.chunk_generator = SpanChunkGenerator::None;
        self.edit_handler = EditHandler::default();
        span
    }
}

impl From<&Span> for SpanBuilder {
    fn from(span: &Span) -> Self {
        Self {
            kind: span.kind,
            start: span.start,
            chunk_generator: span.chunk_generator.clone(),
            edit_handler: span.edit_handler.clone(),
            symbols: span.symbols.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockBuilder {
    pub block_type: Option<BlockType>,
    pub children: Vec<SyntaxTreeNode>,
    pub chunk_generator: BlockChunkGenerator,
}

impl BlockBuilder {
    pub fn new(block_type: Option<BlockType>) -> Self {
        Self {
            block_type,
            ..Self::default()
        }
    }

    pub fn build(self) -> ParseResult<Block> {
        let block_type = self.block_type.ok_or(ParserError::BlockTypeNotSpecified)?;
        Ok(Block {
            block_type,
            children: self.children,
            chunk_generator: self.chunk_generator,
        })
    }
}

impl From<&Block> for BlockBuilder {
    fn from(block: &Block) -> Self {
        Self {
            block_type: Some(block.block_type),
            children: block.children.clone(),
            chunk_generator: block.chunk_generator.clone(),
        }
    }
}
