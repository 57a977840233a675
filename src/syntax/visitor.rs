//! Visitor pattern for syntax tree traversal.

use tokio_util::sync::CancellationToken;

use super::block::{Block, SyntaxTreeNode};
use super::span::Span;
use crate::parser::errors::{ParseResult, ParserError};

/// Visitor trait for syntax tree nodes.
///
/// Default implementations are no-ops; [`walk_block`] drives the traversal.
pub trait SyntaxVisitor {
    fn visit_start_block(&mut self, _block: &Block) {}
    fn visit_end_block(&mut self, _block: &Block) {}
    fn visit_span(&mut self, _span: &Span) {}
}

/// Visit `block` and everything below it in document order.
///
/// `cancel` is checked once per visited node.
pub fn walk_block<V: SyntaxVisitor + ?Sized>(
    visitor: &mut V,
    block: &Block,
    cancel: &CancellationToken,
) -> ParseResult {
    check_cancelled(cancel)?;
    visitor.visit_start_block(block);
    for child in &block.children {
        match child {
            SyntaxTreeNode::Block(inner) => walk_block(visitor, inner, cancel)?,
            SyntaxTreeNode::Span(span) => {
                check_cancelled(cancel)?;
                visitor.visit_span(span);
            }
        }
    }
    visitor.visit_end_block(block);
    Ok(())
}

pub(crate) fn check_cancelled(cancel: &CancellationToken) -> ParseResult {
    if cancel.is_cancelled() {
        Err(ParserError::Cancelled)
    } else {
        Ok(())
    }
}
