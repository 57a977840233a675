//! Shared parse helpers for the integration tests.

#![allow(dead_code)]

use razor::syntax::{Block, BlockType, Span, SpanKind, SyntaxTreeNode};
use razor::{CodeDialect, ParserOptions, ParserResults, RazorParser};

pub fn parse_csharp(source: &str) -> ParserResults {
    RazorParser::new(ParserOptions::new(CodeDialect::CSharp))
        .parse(source)
        .expect("parse session failed")
}

pub fn parse_vb(source: &str) -> ParserResults {
    RazorParser::new(ParserOptions::new(CodeDialect::VisualBasic))
        .parse(source)
        .expect("parse session failed")
}

pub fn parse_design_time(source: &str, dialect: CodeDialect) -> ParserResults {
    RazorParser::new(ParserOptions::new(dialect).design_time(true))
        .parse(source)
        .expect("parse session failed")
}

/// Every block of the tree, parents first.
pub fn blocks_of_type(root: &Block, block_type: BlockType) -> Vec<&Block> {
    root.descendant_blocks()
        .into_iter()
        .filter(|b| b.block_type == block_type)
        .collect()
}

/// The first block below the root that holds code.
pub fn first_code_block(root: &Block) -> &Block {
    root.descendant_blocks()
        .into_iter()
        .skip(1)
        .find(|b| !matches!(b.block_type, BlockType::Markup | BlockType::Tag))
        .expect("no code block")
}

/// `(kind, content)` for every span of `block`.
pub fn span_summary(block: &Block) -> Vec<(SpanKind, String)> {
    block
        .spans()
        .map(|s: &Span| (s.kind, s.content.clone()))
        .collect()
}

/// Spans are contiguous and each starts where the previous one ended.
pub fn assert_contiguous(root: &Block) {
    let mut expected = 0;
    for span in root.spans() {
        assert_eq!(
            span.start.absolute, expected,
            "span {span} does not continue at {expected}"
        );
        expected = span.end();
    }
}

/// Number of direct children that are blocks of `block_type`.
pub fn child_count(block: &Block, block_type: BlockType) -> usize {
    block
        .children
        .iter()
        .filter_map(SyntaxTreeNode::as_block)
        .filter(|b| b.block_type == block_type)
        .count()
}
