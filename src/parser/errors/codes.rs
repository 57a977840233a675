//! Error code definitions for parser diagnostics
//!
//! Codes follow the naming convention RZ1{category}{number}:
//! - RZ10xx: Unterminated constructs (brackets, blocks, tags, literals)
//! - RZ11xx: Unexpected input (characters, whitespace, end of file)
//! - RZ12xx: Missing or invalid directive/construct parts
//! - RZ13xx: Illegal nesting and reserved words

use std::fmt;

/// Error codes for parser diagnostics
///
/// Every diagnostic is recoverable: the parser records it and keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // RZ10xx: Unterminated constructs
    // =========================================================================
    /// Closing bracket, brace or keyword missing before end of file
    UnterminatedConstruct,
    /// An element was opened and never closed
    MissingEndTag,
    /// An end tag that closes nothing
    UnexpectedEndTag,
    /// A string, character or comment literal runs to end of file
    UnterminatedLiteral,

    // =========================================================================
    // RZ11xx: Unexpected input
    // =========================================================================
    UnexpectedCharacter,
    UnexpectedWhitespace,
    UnexpectedEndOfFile,

    // =========================================================================
    // RZ12xx: Missing or invalid parts
    // =========================================================================
    /// A required delimiter or name was absent
    MissingExpectedToken,
    /// A directive value that is not one of the accepted values
    InvalidDirectiveValue,

    // =========================================================================
    // RZ13xx: Nesting and reserved words
    // =========================================================================
    NestedConstructNotAllowed,
    ReservedWordUsed,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        Self::UnterminatedConstruct,
        Self::MissingEndTag,
        Self::UnexpectedEndTag,
        Self::UnterminatedLiteral,
        Self::UnexpectedCharacter,
        Self::UnexpectedWhitespace,
        Self::UnexpectedEndOfFile,
        Self::MissingExpectedToken,
        Self::InvalidDirectiveValue,
        Self::NestedConstructNotAllowed,
        Self::ReservedWordUsed,
    ];

    /// Get the string representation of the error code (e.g., "RZ1001")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnterminatedConstruct => "RZ1001",
            Self::MissingEndTag => "RZ1002",
            Self::UnexpectedEndTag => "RZ1003",
            Self::UnterminatedLiteral => "RZ1004",
            Self::UnexpectedCharacter => "RZ1101",
            Self::UnexpectedWhitespace => "RZ1102",
            Self::UnexpectedEndOfFile => "RZ1103",
            Self::MissingExpectedToken => "RZ1201",
            Self::InvalidDirectiveValue => "RZ1202",
            Self::NestedConstructNotAllowed => "RZ1301",
            Self::ReservedWordUsed => "RZ1302",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::UnterminatedConstruct
            | Self::MissingEndTag
            | Self::UnexpectedEndTag
            | Self::UnterminatedLiteral => "unterminated construct",
            Self::UnexpectedCharacter | Self::UnexpectedWhitespace | Self::UnexpectedEndOfFile => {
                "unexpected input"
            }
            Self::MissingExpectedToken | Self::InvalidDirectiveValue => "missing or invalid token",
            Self::NestedConstructNotAllowed => "illegal nesting",
            Self::ReservedWordUsed => "reserved word",
        }
    }

    /// True for codes that refine [`ErrorCode::UnterminatedConstruct`].
    pub fn is_unterminated(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedConstruct
                | Self::MissingEndTag
                | Self::UnexpectedEndTag
                | Self::UnterminatedLiteral
        )
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::UnterminatedConstruct => "construct is not terminated",
            Self::MissingEndTag => "element was not closed",
            Self::UnexpectedEndTag => "end tag has no matching start tag",
            Self::UnterminatedLiteral => "literal is not terminated",
            Self::UnexpectedCharacter => "unexpected character",
            Self::UnexpectedWhitespace => "unexpected whitespace",
            Self::UnexpectedEndOfFile => "unexpected end of file",
            Self::MissingExpectedToken => "expected token is missing",
            Self::InvalidDirectiveValue => "invalid directive value",
            Self::NestedConstructNotAllowed => "construct cannot be nested",
            Self::ReservedWordUsed => "reserved word used",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
