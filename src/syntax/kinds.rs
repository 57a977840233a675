use std::fmt;
use std::ops::BitOr;

/// What a span holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Transition,
    MetaCode,
    Comment,
    Code,
    Markup,
}

/// What construct a block represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Statement,
    Directive,
    Functions,
    Expression,
    Helper,
    Markup,
    Section,
    Template,
    Comment,
    Tag,
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Which characters an editor may type into a span without reparsing.
///
/// Only editor tooling reads this; the parser records it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AcceptedCharacters(u8);

impl AcceptedCharacters {
    pub const NONE: Self = Self(0);
    pub const NEWLINE: Self = Self(1);
    pub const WHITESPACE: Self = Self(2);
    pub const NON_WHITESPACE: Self = Self(4);
    pub const ANY_EXCEPT_NEWLINE: Self = Self(4 | 2);
    pub const ANY: Self = Self(4 | 2 | 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AcceptedCharacters {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
