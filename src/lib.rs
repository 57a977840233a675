//! # razor-syntax
//!
//! Lossless parser for Razor-style templates: HTML-like markup with
//! embedded code regions in a C-family or a BASIC-family dialect.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! driver    → RazorParser: options in, tree and diagnostics out
//!   ↓
//! rewrite   → post-parse tree normalization
//!   ↓
//! parser    → Logos lexers, markup and code grammars, diagnostics
//!   ↓
//! syntax    → Span, Block, chunk generators, edit handlers, visitor
//!   ↓
//! base      → SourceLocation, LineIndex, LocationTagged
//! ```
//!
//! ```
//! use razor::{CodeDialect, ParserOptions, RazorParser};
//!
//! let parser = RazorParser::new(ParserOptions::new(CodeDialect::CSharp));
//! let results = parser.parse("<p>Hello @name!</p>").unwrap();
//! assert!(results.success());
//! assert_eq!(results.root.content(), "<p>Hello @name!</p>");
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → parser → rewrite → driver)
// ============================================================================

/// Foundation types: SourceLocation, LineIndex, TextRange
pub mod base;

/// Syntax tree: spans, blocks, generators and the visitor
pub mod syntax;

/// Parser: Logos lexers, recursive-descent grammars, diagnostics
pub mod parser;

/// Post-parse rewriters
pub mod rewrite;

mod driver;

pub use driver::{ParserOptions, ParserResults, RazorParser};

// Re-export commonly needed items
pub use parser::keywords;
pub use parser::{CodeDialect, ErrorCode, ParseResult, ParserError, RazorDiagnostic};

// Re-export foundation types
pub use base::{LineIndex, LocationTagged, SourceLocation, TextRange, TextSize};
pub use syntax::{Block, BlockType, Span, SpanKind, SyntaxTreeNode};

/// Cancellation token accepted by [`RazorParser::parse_with_cancellation`]
pub use tokio_util::sync::CancellationToken;
