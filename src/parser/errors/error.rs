//! Diagnostic and fatal error types
//!
//! Provides:
//! - [`RazorDiagnostic`]: a recoverable problem found in the document
//! - [`ParserError`]: misuse of the parse session API or cancellation

use std::fmt;

use thiserror::Error;

use super::codes::ErrorCode;
use crate::base::{SourceLocation, TextRange, TextSize};

/// A recoverable problem found while parsing.
///
/// `length` is the number of source bytes the problem covers, starting at
/// `location`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RazorDiagnostic {
    /// Human-readable error message
    pub message: String,
    /// Where the problem starts
    pub location: SourceLocation,
    /// Number of bytes covered
    pub length: usize,
    /// Categorized error code
    pub code: ErrorCode,
}

impl RazorDiagnostic {
    pub fn new(
        message: impl Into<String>,
        location: SourceLocation,
        length: usize,
        code: ErrorCode,
    ) -> Self {
        Self {
            message: message.into(),
            location,
            length,
            code,
        }
    }

    /// Create a builder for errors assembled in several steps
    pub fn builder(code: ErrorCode) -> RazorDiagnosticBuilder {
        RazorDiagnosticBuilder::new(code)
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.location.offset(), TextSize::new(self.length as u32))
    }

    /// Format the error for display
    pub fn format(&self) -> String {
        format!(
            "{} ({}:{}): {}",
            self.code,
            self.location.line + 1,
            self.location.column + 1,
            self.message
        )
    }
}

impl fmt::Display for RazorDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Builder for [`RazorDiagnostic`]
pub struct RazorDiagnosticBuilder {
    code: ErrorCode,
    message: Option<String>,
    location: SourceLocation,
    length: usize,
}

impl RazorDiagnosticBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            location: SourceLocation::ZERO,
            length: 0,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Build the diagnostic, falling back to the code's default message
    pub fn build(self) -> RazorDiagnostic {
        RazorDiagnostic {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            location: self.location,
            length: self.length,
            code: self.code,
        }
    }
}

/// Fatal failures: the session API was used out of protocol, or the caller
/// cancelled a tree walk. Malformed documents never produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("cannot add a span: no block is open")]
    NoCurrentBlock,
    #[error("end_block called without a matching start_block")]
    EndBlockWithoutStartBlock,
    #[error("the parse session has already terminated")]
    SessionTerminated,
    #[error("cannot complete the tree: no root block")]
    NoRootBlock,
    #[error("cannot complete the tree: {0} block(s) still open")]
    OutstandingBlocks(usize),
    #[error("block was closed before its type was set")]
    BlockTypeNotSpecified,
    #[error("operation was cancelled")]
    Cancelled,
}

/// Result of every grammar production and session mutation.
pub type ParseResult<T = ()> = Result<T, ParserError>;
