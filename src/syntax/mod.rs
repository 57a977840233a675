//! The syntax tree: spans, blocks and the metadata the parser records on them.
//!
//! A [`Block`] is a composite node and a [`Span`] a leaf holding the
//! symbols it was built from. Concatenating the spans of a tree in order
//! gives back the source text exactly.

mod block;
mod builder;
mod edit;
mod generators;
mod kinds;
mod span;
pub mod visitor;

pub use block::{Block, Spans, SyntaxTreeNode};
pub use builder::{BlockBuilder, SpanBuilder};
pub use edit::{EditHandler, EditHandlerKind};
pub use generators::{BlockChunkGenerator, LiteralAttributeValue, SpanChunkGenerator};
pub use kinds::{AcceptedCharacters, BlockType, SpanKind};
pub use span::Span;
pub use visitor::{SyntaxVisitor, walk_block};
