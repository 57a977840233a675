//! Token position and in-progress span of one parser.
//!
//! The markup parser and the code parser each own a [`TokenCursor`] and read
//! from the same [`SourceReader`]. Symbols that were read ahead and handed
//! back sit on a put-back stack; they are replayed before the source is
//! lexed again. When control passes to the other parser the stack is
//! flushed so the shared source position is where this parser logically is.

use super::language::Language;
use super::lexer;
use super::source::SourceReader;
use super::symbol::Symbol;
use crate::base::SourceLocation;
use crate::syntax::{EditHandler, SpanBuilder, SpanChunkGenerator};

/// Chunk generator and edit handler given to every span a parser starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SpanConfig {
    pub chunk_generator: SpanChunkGenerator,
    pub edit_handler: EditHandler,
}

impl SpanConfig {
    pub fn new(chunk_generator: SpanChunkGenerator, edit_handler: EditHandler) -> Self {
        Self {
            chunk_generator,
            edit_handler,
        }
    }

    pub fn markup() -> Self {
        Self::new(SpanChunkGenerator::Markup, EditHandler::default())
    }

    pub fn statement() -> Self {
        Self::new(SpanChunkGenerator::Statement, EditHandler::default())
    }

    pub fn comment() -> Self {
        Self::new(SpanChunkGenerator::RazorComment, EditHandler::default())
    }

    pub fn apply(&self, span: &mut SpanBuilder) {
        span.chunk_generator = self.chunk_generator.clone();
        span.edit_handler = self.edit_handler.clone();
    }
}

#[derive(Debug)]
pub(crate) struct TokenCursor {
    pub language: Language,
    pub current: Option<Symbol>,
    pub previous: Option<Symbol>,
    /// Set when the last read found nothing
    pub eof: bool,
    pub span: SpanBuilder,
    pub span_config: Option<SpanConfig>,
    put_back: Vec<Symbol>,
}

impl TokenCursor {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            current: None,
            previous: None,
            eof: false,
            span: SpanBuilder::new(SourceLocation::ZERO),
            span_config: None,
            put_back: Vec::new(),
        }
    }

    /// Advance to the next symbol, replaying put-back symbols first.
    pub fn next(&mut self, source: &mut SourceReader) -> bool {
        self.previous = self.current.take();
        let next = match self.put_back.pop() {
            Some(symbol) => Some(symbol),
            None => {
                let symbol = lexer::symbol_at(self.language, source, source.position());
                if let Some(symbol) = &symbol {
                    source.set_position(symbol.end());
                }
                symbol
            }
        };
        self.eof = next.is_none();
        self.current = next;
        !self.eof
    }

    /// Queue `symbol` to be read again; the current symbol is cleared.
    pub fn put_back(&mut self, symbol: Symbol) {
        self.put_back.push(symbol);
        self.current = None;
        self.eof = false;
    }

    /// Drop everything buffered and continue reading at `position`.
    pub fn seek(&mut self, source: &mut SourceReader, position: usize) {
        self.put_back.clear();
        source.set_position(position);
        self.current = None;
        self.eof = source.is_at_end();
    }

    /// Rewind the source to the first buffered symbol and empty the buffer.
    pub fn flush(&mut self, source: &mut SourceReader) {
        if let Some(start) = self.put_back.iter().map(|s| s.start.absolute).min() {
            source.set_position(start);
        }
        self.put_back.clear();
    }

    /// Where the next unconsumed symbol starts.
    pub fn location(&self, source: &SourceReader) -> SourceLocation {
        match (&self.current, self.put_back.last()) {
            (Some(current), _) if !self.eof => current.start,
            (None, Some(next)) => next.start,
            _ => source.location(),
        }
    }

    /// Apply the active span configuration to the span being built.
    pub fn initialize_span(&mut self) {
        if let Some(config) = &self.span_config {
            config.apply(&mut self.span);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SyntaxKind;

    fn read_all(cursor: &mut TokenCursor, source: &mut SourceReader) -> Vec<String> {
        let mut out = Vec::new();
        while cursor.next(source) {
            out.push(cursor.current.as_ref().unwrap().text.to_string());
        }
        out
    }

    #[test]
    fn test_put_back_replays_in_read_order() {
        let mut source = SourceReader::new("a b");
        let mut cursor = TokenCursor::new(Language::CSharp);
        cursor.next(&mut source);
        let a = cursor.current.clone().unwrap();
        cursor.next(&mut source);
        let ws = cursor.current.clone().unwrap();
        cursor.put_back(ws);
        cursor.put_back(a);
        assert!(cursor.current.is_none());
        assert_eq!(read_all(&mut cursor, &mut source), ["a", " ", "b"]);
        assert!(cursor.eof);
    }

    #[test]
    fn test_split_symbol_replays_from_buffer() {
        let mut source = SourceReader::new(":hello");
        let mut cursor = TokenCursor::new(Language::Html);
        cursor.next(&mut source);
        let text = cursor.current.clone().unwrap();
        assert_eq!(text.kind, SyntaxKind::TEXT);
        let (_, tail) = text.split(1, SyntaxKind::COLON);
        cursor.put_back(tail.unwrap());
        cursor.next(&mut source);
        assert_eq!(cursor.current.as_ref().unwrap().text(), "hello");
        assert!(!cursor.next(&mut source));
    }

    #[test]
    fn test_flush_rewinds_source() {
        let mut source = SourceReader::new("ab cd");
        let mut cursor = TokenCursor::new(Language::CSharp);
        cursor.next(&mut source);
        cursor.next(&mut source);
        let ws = cursor.current.clone().unwrap();
        cursor.put_back(ws);
        assert_eq!(cursor.location(&source).absolute, 2);
        cursor.flush(&mut source);
        assert_eq!(source.position(), 2);
        assert!(cursor.put_back.is_empty());
    }

    #[test]
    fn test_seek_clears_buffer() {
        let mut source = SourceReader::new("one two");
        let mut cursor = TokenCursor::new(Language::CSharp);
        cursor.next(&mut source);
        let one = cursor.current.clone().unwrap();
        cursor.put_back(one);
        cursor.seek(&mut source, 4);
        assert_eq!(read_all(&mut cursor, &mut source), ["two"]);
    }
}
