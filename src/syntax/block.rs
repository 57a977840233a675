use std::fmt;

use super::generators::BlockChunkGenerator;
use super::kinds::BlockType;
use super::span::Span;
use crate::base::SourceLocation;

/// Composite node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    pub block_type: BlockType,
    pub children: Vec<SyntaxTreeNode>,
    pub chunk_generator: BlockChunkGenerator,
}

/// A child of a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxTreeNode {
    Span(Span),
    Block(Block),
}

impl Block {
    pub fn new(block_type: BlockType, children: Vec<SyntaxTreeNode>) -> Self {
        Self {
            block_type,
            children,
            chunk_generator: BlockChunkGenerator::None,
        }
    }

    /// Start of the first span, or zero for a block without spans.
    pub fn start(&self) -> SourceLocation {
        self.find_first_descendent_span()
            .map(|span| span.start)
            .unwrap_or_default()
    }

    pub fn length(&self) -> usize {
        self.spans().map(Span::length).sum()
    }

    /// Source text covered by the block.
    pub fn content(&self) -> String {
        self.spans().map(|span| span.content.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Every span below this block in document order.
    pub fn spans(&self) -> Spans<'_> {
        Spans {
            stack: vec![self.children.iter()],
        }
    }

    pub fn find_first_descendent_span(&self) -> Option<&Span> {
        self.spans().next()
    }

    pub fn find_last_descendent_span(&self) -> Option<&Span> {
        self.spans().last()
    }

    /// Blocks directly below this one.
    pub fn child_blocks(&self) -> impl Iterator<Item = &Block> {
        self.children.iter().filter_map(SyntaxTreeNode::as_block)
    }

    /// This block and every block below it, parents first.
    pub fn descendant_blocks(&self) -> Vec<&Block> {
        fn collect<'a>(block: &'a Block, out: &mut Vec<&'a Block>) {
            out.push(block);
            for child in block.child_blocks() {
                collect(child, out);
            }
        }

        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }
}

impl SyntaxTreeNode {
    pub fn is_block(&self) -> bool {
        matches!(self, SyntaxTreeNode::Block(_))
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            SyntaxTreeNode::Block(block) => Some(block),
            SyntaxTreeNode::Span(_) => None,
        }
    }

    pub fn as_span(&self) -> Option<&Span> {
        match self {
            SyntaxTreeNode::Span(span) => Some(span),
            SyntaxTreeNode::Block(_) => None,
        }
    }

    pub fn start(&self) -> SourceLocation {
        match self {
            SyntaxTreeNode::Span(span) => span.start,
            SyntaxTreeNode::Block(block) => block.start(),
        }
    }

    pub fn length(&self) -> usize {
        match self {
            SyntaxTreeNode::Span(span) => span.length(),
            SyntaxTreeNode::Block(block) => block.length(),
        }
    }

    pub fn content(&self) -> String {
        match self {
            SyntaxTreeNode::Span(span) => span.content.clone(),
            SyntaxTreeNode::Block(block) => block.content(),
        }
    }
}

impl From<Span> for SyntaxTreeNode {
    fn from(span: Span) -> Self {
        SyntaxTreeNode::Span(span)
    }
}

impl From<Block> for SyntaxTreeNode {
    fn from(block: Block) -> Self {
        SyntaxTreeNode::Block(block)
    }
}

/// Depth-first iterator over the spans of a block.
pub struct Spans<'a> {
    stack: Vec<std::slice::Iter<'a, SyntaxTreeNode>>,
}

impl<'a> Iterator for Spans<'a> {
    type Item = &'a Span;

    fn next(&mut self) -> Option<&'a Span> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(SyntaxTreeNode::Span(span)) => return Some(span),
                Some(SyntaxTreeNode::Block(block)) => self.stack.push(block.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, self, 0)
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
    writeln!(f, "{:indent$}{} Block", "", block.block_type, indent = depth * 4)?;
    for child in &block.children {
        match child {
            SyntaxTreeNode::Span(span) => {
                writeln!(f, "{:indent$}{}", "", span, indent = (depth + 1) * 4)?
            }
            SyntaxTreeNode::Block(inner) => write_block(f, inner, depth + 1)?,
        }
    }
    Ok(())
}
