use std::fmt;

use text_size::TextSize;

/// Characters that end a line. `\r\n` counts as one break.
pub fn is_newline_char(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Unicode whitespace that does not end a line.
pub fn is_whitespace_char(c: char) -> bool {
    c.is_whitespace() && !is_newline_char(c)
}

/// A position in a source document.
///
/// `absolute` is a byte offset; `line` and `column` are zero-based, with
/// `column` counted in characters from the start of the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub absolute: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub const ZERO: SourceLocation = SourceLocation {
        absolute: 0,
        line: 0,
        column: 0,
    };

    pub fn new(absolute: usize, line: usize, column: usize) -> Self {
        Self {
            absolute,
            line,
            column,
        }
    }

    pub fn offset(&self) -> TextSize {
        TextSize::new(self.absolute as u32)
    }

    /// The location reached after reading `text` starting here.
    ///
    /// `\r\n`, a lone `\r` and every other [`is_newline_char`] end a line.
    pub fn advance(self, text: &str) -> SourceLocation {
        let mut location = self;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            location.absolute += c.len_utf8();
            match c {
                '\r' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    location.absolute += 1;
                    location.line += 1;
                    location.column = 0;
                }
                c if is_newline_char(c) => {
                    location.line += 1;
                    location.column = 0;
                }
                _ => location.column += 1,
            }
        }
        location
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{},{})", self.absolute, self.line, self.column)
    }
}

/// A value together with the location it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationTagged<T> {
    pub value: T,
    pub location: SourceLocation,
}

impl<T> LocationTagged<T> {
    pub fn new(value: T, location: SourceLocation) -> Self {
        Self { value, location }
    }
}

impl LocationTagged<String> {
    pub fn empty(location: SourceLocation) -> Self {
        Self::new(String::new(), location)
    }
}

impl<T: fmt::Display> fmt::Display for LocationTagged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.location)
    }
}
