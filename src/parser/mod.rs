//! Markup and code parsers for Razor-style templates.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → one Symbol at a time, per dialect
//!     ↓
//! TokenCursor → put-back buffer and span under construction
//!     ↓
//! Markup parser ⇄ code parser (C-family or BASIC-family)
//!     ↓
//! ParserContext → block stack, diagnostics
//!     ↓
//! Block tree (lossless)
//! ```
//!
//! The markup parser owns the document. At each transition it hands the
//! source to the code parser for one block, and the code parser hands it
//! back to the markup parser for embedded markup. Both share a single
//! [`ParserContext`](context::ParserContext), so the tree they build is one
//! tree.

pub(crate) mod context;
pub(crate) mod cursor;
pub mod errors;
pub(crate) mod grammar;
pub mod keywords;
pub mod language;
pub mod lexer;
pub(crate) mod primitives;
pub(crate) mod session;
pub(crate) mod source;
pub mod symbol;
pub mod syntax_kind;

pub use errors::{ErrorCode, ParseResult, ParserError, RazorDiagnostic};
pub use language::{CodeDialect, Language};
pub use lexer::tokenize;
pub use symbol::Symbol;
pub use syntax_kind::SyntaxKind;
