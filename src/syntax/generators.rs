//! Code-generation strategies attached to spans and blocks.
//!
//! The parser only records these; a backend turning the tree into output
//! source reads them. Each variant carries the data the parser extracted
//! for it (a base type name, an attribute prefix, a section name).

use crate::base::{LocationTagged, SourceLocation};

/// How a span is rendered by a code generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SpanChunkGenerator {
    /// Produces no output (transitions, delimiters, escapes)
    #[default]
    None,
    Markup,
    Statement,
    Expression,
    TypeMember,
    /// `inherits`: the base type name
    SetBaseType(String),
    /// `using` / `Imports`: the imported namespace
    AddImport {
        namespace: String,
        keyword_length: usize,
    },
    /// `layout`: the layout path
    SetLayout(String),
    /// `Option Strict On` and friends
    SetVbOption { name: String, value: bool },
    /// `sessionstate` and other page attributes
    RazorDirectiveAttribute { name: String, value: String },
    /// One literal piece of a conditional attribute value
    LiteralAttribute {
        prefix: LocationTagged<String>,
        value: LiteralAttributeValue,
    },
    /// The end of a helper body
    HelperFooter,
    /// The delimiters and body of a `@* *@` comment
    RazorComment,
}

/// Value part of [`SpanChunkGenerator::LiteralAttribute`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralAttributeValue {
    Text(LocationTagged<String>),
    /// `~/path` resolved against the application root at runtime
    ResolveUrl(SourceLocation),
}

/// How a block is rendered by a code generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum BlockChunkGenerator {
    #[default]
    None,
    Expression,
    Template,
    Section(String),
    Helper {
        signature: LocationTagged<String>,
        header_complete: bool,
    },
    /// A conditional attribute: rendered only when a value is non-null
    Attribute {
        name: String,
        prefix: LocationTagged<String>,
        suffix: LocationTagged<String>,
    },
    /// A code value inside a conditional attribute
    DynamicAttribute {
        prefix: LocationTagged<String>,
        value_start: SourceLocation,
    },
    RazorComment,
}

impl SpanChunkGenerator {
    pub fn is_none(&self) -> bool {
        matches!(self, SpanChunkGenerator::None)
    }

    pub fn is_literal_attribute(&self) -> bool {
        matches!(self, SpanChunkGenerator::LiteralAttribute { .. })
    }
}

impl BlockChunkGenerator {
    pub fn is_none(&self) -> bool {
        matches!(self, BlockChunkGenerator::None)
    }
}
