use super::{SourceLocation, is_newline_char};

/// Maps byte offsets of one document to [`SourceLocation`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
                line_starts.push(i + 2);
            } else if is_newline_char(c) {
                line_starts.push(i + c.len_utf8());
            }
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Location of `offset` in `text`; `text` must be the indexed document.
    pub fn location(&self, text: &str, offset: usize) -> SourceLocation {
        let offset = offset.min(text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = text
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);
        SourceLocation::new(offset, line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_on_first_line() {
        let text = "hello world";
        let index = LineIndex::new(text);
        assert_eq!(index.location(text, 6), SourceLocation::new(6, 0, 6));
    }

    #[test]
    fn test_location_after_crlf() {
        let text = "ab\r\ncd\ne";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.location(text, 4), SourceLocation::new(4, 1, 0));
        assert_eq!(index.location(text, 5), SourceLocation::new(5, 1, 1));
        assert_eq!(index.location(text, 7), SourceLocation::new(7, 2, 0));
    }

    #[test]
    fn test_location_agrees_with_advance() {
        let text = "<p>\r\n  @x\rdone\n";
        let index = LineIndex::new(text);
        for offset in 0..=text.len() {
            // Offsets inside a CRLF pair never start a symbol.
            if text[..offset].ends_with('\r') && text[offset..].starts_with('\n') {
                continue;
            }
            let expected = SourceLocation::ZERO.advance(&text[..offset]);
            assert_eq!(index.location(text, offset), expected, "offset {offset}");
        }
    }

    #[test]
    fn test_unicode_line_breaks() {
        let text = "a\u{2028}b\u{85}c\u{2029}\u{A0}d";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 4);
        let boundaries = text.char_indices().map(|(i, _)| i).chain([text.len()]);
        for offset in boundaries {
            let expected = SourceLocation::ZERO.advance(&text[..offset]);
            assert_eq!(index.location(text, offset), expected, "offset {offset}");
        }
    }

    #[test]
    fn test_location_past_end_is_clamped() {
        let text = "ab";
        let index = LineIndex::new(text);
        assert_eq!(index.location(text, 10), SourceLocation::new(2, 0, 2));
    }
}
