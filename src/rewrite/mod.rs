//! Tree-to-tree passes run after the grammar has balanced the document.
//!
//! A pass rebuilds the tree bottom-up: the children of a block are
//! rewritten before the block itself is offered to the pass. The root is
//! never replaced. Every pass is idempotent, and none of them change the
//! text the tree covers.

mod attributes;
mod markup;
mod whitespace;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::parser::errors::ParseResult;
use crate::syntax::visitor::check_cancelled;
use crate::syntax::{Block, EditHandler, Span, SpanBuilder, SpanChunkGenerator, SpanKind, SyntaxTreeNode};

pub use attributes::ConditionalAttributeCollapser;
pub use markup::MarkupCollapser;
pub use whitespace::WhitespaceRewriter;

/// A structural normalization of the syntax tree.
pub trait Rewriter {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Whether `node` should be replaced, given the already rewritten
    /// siblings in front of it.
    fn can_rewrite(&self, preceding: &[SyntaxTreeNode], node: &SyntaxTreeNode) -> bool;

    /// The replacement for `node`, or `None` to delete it.
    ///
    /// Only called when [`Rewriter::can_rewrite`] returned `true`. A pass may
    /// push nodes onto `preceding` or pop them off.
    fn rewrite(
        &self,
        preceding: &mut Vec<SyntaxTreeNode>,
        node: SyntaxTreeNode,
    ) -> Option<SyntaxTreeNode>;
}

/// The passes a parse runs, in order.
pub fn default_rewriters() -> [&'static dyn Rewriter; 3] {
    [
        &WhitespaceRewriter,
        &ConditionalAttributeCollapser,
        &MarkupCollapser,
    ]
}

/// Run one pass over `root`. Cancellation is checked once per visited node.
pub fn rewrite<R: Rewriter + ?Sized>(
    rewriter: &R,
    root: Block,
    cancel: &CancellationToken,
) -> ParseResult<Block> {
    let mut changes = 0;
    let root = rewrite_block(rewriter, root, cancel, &mut changes)?;
    if changes > 0 {
        debug!(rewriter = rewriter.name(), changes, "rewrote syntax tree");
    }
    Ok(root)
}

/// Run every default pass over `root`.
pub fn rewrite_all(root: Block, cancel: &CancellationToken) -> ParseResult<Block> {
    default_rewriters()
        .into_iter()
        .try_fold(root, |root, rewriter| rewrite(rewriter, root, cancel))
}

fn rewrite_block<R: Rewriter + ?Sized>(
    rewriter: &R,
    block: Block,
    cancel: &CancellationToken,
    changes: &mut usize,
) -> ParseResult<Block> {
    let Block {
        block_type,
        children,
        chunk_generator,
    } = block;

    let mut rebuilt = Vec::with_capacity(children.len());
    for child in children {
        check_cancelled(cancel)?;
        let child = match child {
            SyntaxTreeNode::Block(inner) => {
                SyntaxTreeNode::Block(rewrite_block(rewriter, inner, cancel, changes)?)
            }
            span => span,
        };

        if rewriter.can_rewrite(&rebuilt, &child) {
            *changes += 1;
            if let Some(replacement) = rewriter.rewrite(&mut rebuilt, child) {
                rebuilt.push(replacement);
            }
        } else {
            rebuilt.push(child);
        }
    }

    Ok(Block {
        block_type,
        children: rebuilt,
        chunk_generator,
    })
}

/// A plain markup span holding the symbols of `spans`, in order.
pub(crate) fn markup_span<'a>(spans: impl IntoIterator<Item = &'a Span>) -> Option<Span> {
    let mut spans = spans.into_iter().peekable();
    let mut builder = SpanBuilder::new(spans.peek()?.start);
    for span in spans {
        for symbol in &span.symbols {
            builder.accept(symbol.clone());
        }
    }
    builder.kind = SpanKind::Markup;
    builder.chunk_generator = SpanChunkGenerator::Markup;
    builder.edit_handler = EditHandler::default();
    Some(builder.build())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::base::SourceLocation;
    use crate::parser::errors::ParserError;
    use crate::parser::{Symbol, SyntaxKind};
    use crate::syntax::BlockType;

    /// A span of one symbol starting at `offset` on the first line.
    pub(crate) fn span_at(
        kind: SpanKind,
        generator: SpanChunkGenerator,
        offset: usize,
        text: &str,
    ) -> Span {
        let start = SourceLocation::new(offset, 0, offset);
        let symbol_kind = if text.chars().all(char::is_whitespace) {
            SyntaxKind::WHITESPACE
        } else {
            SyntaxKind::TEXT
        };
        let mut builder = SpanBuilder::new(start);
        builder.accept(Symbol::new(symbol_kind, text, start));
        builder.kind = kind;
        builder.chunk_generator = generator;
        builder.build()
    }

    pub(crate) fn markup(offset: usize, text: &str) -> SyntaxTreeNode {
        span_at(SpanKind::Markup, SpanChunkGenerator::Markup, offset, text).into()
    }

    /// Deletes every comment span.
    struct DropComments;

    impl Rewriter for DropComments {
        fn name(&self) -> &'static str {
            "drop-comments"
        }

        fn can_rewrite(&self, _: &[SyntaxTreeNode], node: &SyntaxTreeNode) -> bool {
            node.as_span().is_some_and(|s| s.kind == SpanKind::Comment)
        }

        fn rewrite(&self, _: &mut Vec<SyntaxTreeNode>, _: SyntaxTreeNode) -> Option<SyntaxTreeNode> {
            None
        }
    }

    fn sample() -> Block {
        let comment = span_at(SpanKind::Comment, SpanChunkGenerator::None, 1, "c");
        let inner = Block::new(BlockType::Comment, vec![comment.clone().into()]);
        Block::new(
            BlockType::Markup,
            vec![markup(0, "a"), inner.into(), comment.into()],
        )
    }

    #[test]
    fn test_none_deletes_node() {
        let root = rewrite(&DropComments, sample(), &CancellationToken::new()).unwrap();
        assert_eq!(root.children.len(), 2);
        assert!(root.children[1].as_block().is_some_and(Block::is_empty));
    }

    #[test]
    fn test_cancelled_rewrite_fails() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(
            rewrite(&DropComments, sample(), &cancel),
            Err(ParserError::Cancelled)
        );
    }

    #[test]
    fn test_markup_span_concatenates_symbols() {
        let a = span_at(SpanKind::Markup, SpanChunkGenerator::None, 0, "<a");
        let b = span_at(SpanKind::Code, SpanChunkGenerator::None, 2, " ");
        let merged = markup_span([&a, &b]).unwrap();
        assert_eq!(merged.content, "<a ");
        assert_eq!(merged.kind, SpanKind::Markup);
        assert_eq!(merged.chunk_generator, SpanChunkGenerator::Markup);
        assert_eq!(merged.start, a.start);
        assert!(markup_span([]).is_none());
    }
}
