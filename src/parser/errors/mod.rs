//! Parser error handling module
//!
//! - Categorized error codes for filtering and documentation
//! - Recoverable diagnostics with source locations
//! - Fatal errors for session misuse and cancellation

mod codes;
mod error;
pub(crate) mod messages;

pub use codes::ErrorCode;
pub use error::{ParseResult, ParserError, RazorDiagnostic, RazorDiagnosticBuilder};
