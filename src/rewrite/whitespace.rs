//! Moves leading whitespace out of expression blocks.

use super::{Rewriter, markup_span};
use crate::syntax::{Block, BlockType, SyntaxTreeNode};

/// Hands a whitespace-only first span of an expression block to the
/// enclosing block as markup, so the whitespace is rendered as text rather
/// than as part of the expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceRewriter;

fn leading_whitespace(block: &Block) -> bool {
    block.block_type == BlockType::Expression
        && block
            .children
            .first()
            .and_then(SyntaxTreeNode::as_span)
            .is_some_and(|span| span.is_whitespace_only())
}

impl Rewriter for WhitespaceRewriter {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn can_rewrite(&self, _: &[SyntaxTreeNode], node: &SyntaxTreeNode) -> bool {
        node.as_block().is_some_and(leading_whitespace)
    }

    fn rewrite(
        &self,
        preceding: &mut Vec<SyntaxTreeNode>,
        node: SyntaxTreeNode,
    ) -> Option<SyntaxTreeNode> {
        let SyntaxTreeNode::Block(mut block) = node else {
            return Some(node);
        };
        if let SyntaxTreeNode::Span(whitespace) = block.children.remove(0) {
            preceding.extend(markup_span([&whitespace]).map(SyntaxTreeNode::Span));
        }
        // An expression made only of whitespace leaves nothing behind.
        (!block.is_empty()).then_some(SyntaxTreeNode::Block(block))
    }
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use super::super::rewrite;
    use super::super::tests::{markup, span_at};
    use super::*;
    use crate::syntax::{BlockChunkGenerator, SpanChunkGenerator, SpanKind};

    fn expression(children: Vec<SyntaxTreeNode>) -> SyntaxTreeNode {
        let mut block = Block::new(BlockType::Expression, children);
        block.chunk_generator = BlockChunkGenerator::Expression;
        block.into()
    }

    fn code(offset: usize, text: &str) -> SyntaxTreeNode {
        span_at(SpanKind::Code, SpanChunkGenerator::Expression, offset, text).into()
    }

    fn run(root: Block) -> Block {
        rewrite(&WhitespaceRewriter, root, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn test_leading_whitespace_moves_to_parent() {
        let root = Block::new(
            BlockType::Markup,
            vec![
                markup(0, "<p>"),
                expression(vec![code(3, "  "), code(5, "foo")]),
            ],
        );
        let content = root.content();
        let rewritten = run(root);

        assert_eq!(rewritten.content(), content);
        assert_eq!(rewritten.children.len(), 3);
        let moved = rewritten.children[1].as_span().unwrap();
        assert_eq!(moved.kind, SpanKind::Markup);
        assert_eq!(moved.chunk_generator, SpanChunkGenerator::Markup);
        assert_eq!(moved.start.absolute, 3);
        assert_eq!(rewritten.children[2].content(), "foo");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let root = Block::new(
            BlockType::Markup,
            vec![expression(vec![code(0, " "), code(1, "x")])],
        );
        let once = run(root);
        assert_eq!(run(once.clone()), once);
    }

    #[test]
    fn test_whitespace_only_expression_is_removed() {
        let root = Block::new(BlockType::Markup, vec![expression(vec![code(0, "\t")])]);
        let rewritten = run(root);
        assert_eq!(rewritten.children.len(), 1);
        assert!(rewritten.children[0].as_span().is_some());
    }

    #[test]
    fn test_other_blocks_untouched() {
        let statement = Block::new(BlockType::Statement, vec![code(0, " ")]);
        let root = Block::new(BlockType::Markup, vec![statement.into()]);
        assert_eq!(run(root.clone()), root);
    }
}
