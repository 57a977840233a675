//! Collapses conditional attributes that turned out to be fully literal.

use super::{Rewriter, markup_span};
use crate::syntax::{
    BlockChunkGenerator, LiteralAttributeValue, SpanChunkGenerator, SyntaxTreeNode,
};

/// Replaces an attribute block whose every child is literal text with one
/// markup span. Nothing in such an attribute can be null at runtime, so it
/// is always rendered as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionalAttributeCollapser;

fn is_literal_attribute_value(node: &SyntaxTreeNode) -> bool {
    let Some(span) = node.as_span() else {
        return false;
    };
    match &span.chunk_generator {
        SpanChunkGenerator::LiteralAttribute { value, .. } => {
            matches!(value, LiteralAttributeValue::Text(_))
        }
        SpanChunkGenerator::None | SpanChunkGenerator::Markup => true,
        _ => false,
    }
}

impl Rewriter for ConditionalAttributeCollapser {
    fn name(&self) -> &'static str {
        "conditional-attribute"
    }

    fn can_rewrite(&self, _: &[SyntaxTreeNode], node: &SyntaxTreeNode) -> bool {
        node.as_block().is_some_and(|block| {
            matches!(block.chunk_generator, BlockChunkGenerator::Attribute { .. })
                && !block.is_empty()
                && block.children.iter().all(is_literal_attribute_value)
        })
    }

    fn rewrite(&self, _: &mut Vec<SyntaxTreeNode>, node: SyntaxTreeNode) -> Option<SyntaxTreeNode> {
        let SyntaxTreeNode::Block(block) = node else {
            return Some(node);
        };
        markup_span(block.children.iter().filter_map(SyntaxTreeNode::as_span))
            .map(SyntaxTreeNode::Span)
    }
}
