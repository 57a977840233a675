//! Foundation types for the template parser.
//!
//! - [`SourceLocation`] - absolute offset plus zero-based line/column
//! - [`LineIndex`] - offset to line/column conversion for one document
//! - [`LocationTagged`] - a value paired with where it starts in the source
//! - [`TextRange`], [`TextSize`] - byte ranges, re-exported from `text-size`
//!
//! This module has NO dependencies on other modules of the crate.

mod line_index;
mod location;

pub use line_index::LineIndex;
pub use location::{LocationTagged, SourceLocation, is_newline_char, is_whitespace_char};

pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
