//! Merges runs of plain markup spans.

use super::{Rewriter, markup_span};
use crate::syntax::{SpanChunkGenerator, SpanKind, SyntaxTreeNode};

/// Joins a plain markup span with a plain markup span right before it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupCollapser;

fn is_plain_markup(node: &SyntaxTreeNode) -> bool {
    node.as_span().is_some_and(|span| {
        span.kind == SpanKind::Markup && span.chunk_generator == SpanChunkGenerator::Markup
    })
}

impl Rewriter for MarkupCollapser {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn can_rewrite(&self, preceding: &[SyntaxTreeNode], node: &SyntaxTreeNode) -> bool {
        is_plain_markup(node) && preceding.last().is_some_and(is_plain_markup)
    }

    fn rewrite(
        &self,
        preceding: &mut Vec<SyntaxTreeNode>,
        node: SyntaxTreeNode,
    ) -> Option<SyntaxTreeNode> {
        let SyntaxTreeNode::Span(span) = &node else {
            return Some(node);
        };
        match preceding.pop() {
            Some(SyntaxTreeNode::Span(previous)) => {
                markup_span([&previous, span]).map(SyntaxTreeNode::Span)
            }
            previous => {
                preceding.extend(previous);
                Some(node)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use super::super::rewrite;
    use super::super::tests::{markup, span_at};
    use super::*;
    use crate::syntax::{Block, BlockType};

    fn run(root: Block) -> Block {
        rewrite(&MarkupCollapser, root, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn test_adjacent_markup_merges() {
        let root = Block::new(
            BlockType::Markup,
            vec![markup(0, "<p>"), markup(3, "hi"), markup(5, "</p>")],
        );
        let rewritten = run(root);
        assert_eq!(rewritten.children.len(), 1);
        let span = rewritten.children[0].as_span().unwrap();
        assert_eq!(span.content, "<p>hi</p>");
        assert_eq!(span.symbols.len(), 3);
        assert_eq!(span.start.absolute, 0);
    }

    #[test]
    fn test_escape_and_blocks_break_runs() {
        let escape = span_at(SpanKind::Markup, SpanChunkGenerator::None, 1, "@");
        let inner = Block::new(BlockType::Expression, Vec::new());
        let root = Block::new(
            BlockType::Markup,
            vec![
                markup(0, "a"),
                escape.into(),
                markup(2, "@"),
                markup(3, "b"),
                inner.into(),
                markup(4, "c"),
            ],
        );
        let rewritten = run(root);
        let contents: Vec<_> = rewritten.children.iter().map(|c| c.content()).collect();
        assert_eq!(contents, ["a", "@", "@b", "", "c"]);
        assert_eq!(run(rewritten.clone()), rewritten);
    }
}
