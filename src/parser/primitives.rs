//! Parsing primitives shared by the markup and code parsers.
//!
//! Every parser implements [`TokenParser`] by exposing its context and its
//! cursor; the rest of the trait (accepting, putting back, emitting spans,
//! balancing brackets, razor comments) is written once here. Grammar
//! productions are plain functions over a concrete parser type.

use std::ops::BitOr;

use super::context::ParserContext;
use super::cursor::{SpanConfig, TokenCursor};
use super::errors::{ErrorCode, ParseResult, messages};
use super::keywords::Keyword;
use super::language::Language;
use super::symbol::Symbol;
use super::syntax_kind::SyntaxKind;
use crate::base::SourceLocation;
use crate::syntax::{AcceptedCharacters, BlockChunkGenerator, BlockType, SpanKind};

/// Policy bits for [`TokenParser::balance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct BalancingModes(u8);

impl BalancingModes {
    pub const NONE: Self = Self(0);
    /// Rewind to the start position when the closing bracket is never found.
    pub const BACKTRACK_ON_FAILURE: Self = Self(1);
    /// Leave reporting the missing bracket to the caller.
    pub const NO_ERROR_ON_FAILURE: Self = Self(2);
    /// Razor comments and inline templates interrupt the count.
    pub const ALLOW_COMMENTS_AND_TEMPLATES: Self = Self(4);
    /// Any transition interrupts the count.
    pub const ALLOW_EMBEDDED_TRANSITIONS: Self = Self(8);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for BalancingModes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Shared cursor operations of every parser.
pub(crate) trait TokenParser: Sized {
    fn parts(&mut self) -> (&mut ParserContext, &mut TokenCursor);
    fn cursor(&self) -> &TokenCursor;
    fn context(&self) -> &ParserContext;

    /// Emit whatever is pending before a razor comment starts.
    fn output_span_before_razor_comment(&mut self) -> ParseResult;

    fn is_at_embedded_transition(
        &mut self,
        _allow_templates_and_comments: bool,
        _allow_transitions: bool,
    ) -> bool {
        false
    }

    fn handle_embedded_transition(&mut self) -> ParseResult {
        Ok(())
    }

    fn cursor_mut(&mut self) -> &mut TokenCursor {
        self.parts().1
    }

    fn context_mut(&mut self) -> &mut ParserContext {
        self.parts().0
    }

    fn language(&self) -> Language {
        self.cursor().language
    }

    // =========================================================================
    // READING
    // =========================================================================

    fn current(&self) -> Option<&Symbol> {
        self.cursor().current.as_ref()
    }

    fn current_kind(&self) -> Option<SyntaxKind> {
        self.current().map(|s| s.kind)
    }

    fn current_text(&self) -> &str {
        self.current().map(Symbol::text).unwrap_or("")
    }

    fn previous(&self) -> Option<&Symbol> {
        self.cursor().previous.as_ref()
    }

    fn eof(&self) -> bool {
        self.cursor().eof
    }

    fn current_location(&self) -> SourceLocation {
        self.cursor().location(&self.context().source)
    }

    fn next_token(&mut self) -> bool {
        let (ctx, cursor) = self.parts();
        cursor.next(&mut ctx.source)
    }

    fn ensure_current(&mut self) -> bool {
        if self.current().is_none() {
            return self.next_token();
        }
        true
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        self.current_kind().is_some_and(|k| kinds.contains(&k))
    }

    fn at_keyword(&self, keyword: impl Into<Keyword>) -> bool {
        let keyword = keyword.into();
        self.current().is_some_and(|s| s.keyword == Some(keyword))
    }

    fn at_whitespace(&self) -> bool {
        self.at(SyntaxKind::WHITESPACE)
    }

    fn at_newline(&self) -> bool {
        self.at(SyntaxKind::NEWLINE)
    }

    fn was(&self, kind: SyntaxKind) -> bool {
        self.previous().is_some_and(|s| s.kind == kind)
    }

    /// Continue reading at `position`, dropping any put-back symbols.
    fn seek(&mut self, position: usize) {
        let (ctx, cursor) = self.parts();
        cursor.seek(&mut ctx.source, position);
    }

    fn put_back(&mut self, symbol: Symbol) {
        self.cursor_mut().put_back(symbol);
    }

    /// Put back symbols given in the order they were read.
    fn put_back_all(&mut self, symbols: Vec<Symbol>) {
        for symbol in symbols.into_iter().rev() {
            self.put_back(symbol);
        }
    }

    fn put_current_back(&mut self) {
        if !self.eof() {
            if let Some(current) = self.cursor_mut().current.take() {
                self.put_back(current);
            }
        }
    }

    /// The symbol `count` positions ahead, without consuming anything.
    fn lookahead(&mut self, count: usize) -> Option<Symbol> {
        if count == 0 {
            return self.current().cloned();
        }
        let previous = self.cursor().previous.clone();
        let mut seen = Vec::with_capacity(count + 1);
        seen.push(self.current().cloned());
        for _ in 0..count {
            self.next_token();
            seen.push(self.current().cloned());
        }
        let target = seen[count].clone();
        for symbol in seen.into_iter().rev().flatten() {
            self.put_back(symbol);
        }
        self.ensure_current();
        self.cursor_mut().previous = previous;
        target
    }

    fn next_is(&mut self, kind: SyntaxKind) -> bool {
        self.next_is_with(|next| next.is_some_and(|s| s.kind == kind))
    }

    fn next_is_any(&mut self, kinds: &[SyntaxKind]) -> bool {
        self.next_is_with(|next| next.is_some_and(|s| kinds.contains(&s.kind)))
    }

    fn next_is_with(&mut self, condition: impl FnOnce(Option<&Symbol>) -> bool) -> bool {
        match self.lookahead(1) {
            Some(next) => condition(Some(&next)),
            None => condition(None),
        }
    }

    /// Read symbols while `condition` holds; the first failing symbol stays current.
    fn read_while(&mut self, condition: impl Fn(&Symbol) -> bool) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        while self.ensure_current() {
            match self.current() {
                Some(symbol) if condition(symbol) => symbols.push(symbol.clone()),
                _ => break,
            }
            self.next_token();
        }
        symbols
    }

    /// Like [`Self::read_while`], with a condition that may look ahead.
    fn read_while_with(&mut self, mut condition: impl FnMut(&mut Self) -> bool) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        while self.ensure_current() && condition(self) {
            if let Some(symbol) = self.current().cloned() {
                symbols.push(symbol);
            }
            self.next_token();
        }
        symbols
    }

    // =========================================================================
    // ACCEPTING
    // =========================================================================

    /// Add `symbol` to the span being built and surface its lexical errors.
    fn accept(&mut self, symbol: Symbol) {
        let (ctx, cursor) = self.parts();
        for error in &symbol.errors {
            ctx.push_error(error.clone());
        }
        cursor.span.accept(symbol);
    }

    fn accept_symbols(&mut self, symbols: Vec<Symbol>) {
        for symbol in symbols {
            self.accept(symbol);
        }
    }

    fn accept_and_move_next(&mut self) -> bool {
        if let Some(current) = self.current().cloned() {
            self.accept(current);
        }
        self.next_token()
    }

    /// Accept the given kinds in sequence, stopping at the first mismatch.
    fn accept_all(&mut self, kinds: &[SyntaxKind]) -> bool {
        for &kind in kinds {
            if !self.at(kind) {
                return false;
            }
            self.accept_and_move_next();
        }
        true
    }

    fn accept_while(&mut self, condition: impl Fn(&Symbol) -> bool) {
        let symbols = self.read_while(condition);
        self.accept_symbols(symbols);
    }

    fn accept_while_kinds(&mut self, kinds: &[SyntaxKind]) {
        self.accept_while(|s| kinds.contains(&s.kind));
    }

    fn accept_until(&mut self, kinds: &[SyntaxKind]) {
        self.accept_while(|s| !kinds.contains(&s.kind));
    }

    fn optional(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.accept_and_move_next();
            return true;
        }
        false
    }

    fn optional_keyword(&mut self, keyword: impl Into<Keyword>) -> bool {
        if self.at_keyword(keyword) {
            self.accept_and_move_next();
            return true;
        }
        false
    }

    fn expected(&mut self, kind: SyntaxKind) {
        debug_assert!(self.at(kind), "expected {kind:?}, found {:?}", self.current_kind());
        self.accept_and_move_next();
    }

    /// Check for `kind` without consuming it, reporting what was found instead.
    fn required(
        &mut self,
        kind: SyntaxKind,
        error_if_not_found: bool,
        error_base: impl FnOnce(&str) -> String,
    ) -> bool {
        let found = self.at(kind);
        if !found && error_if_not_found {
            let component = match self.current() {
                Some(s) if s.kind == SyntaxKind::NEWLINE => messages::component_newline(),
                Some(s) if s.kind == SyntaxKind::WHITESPACE => messages::component_whitespace(),
                Some(s) => messages::component_character(s.text()),
                None => messages::component_end_of_file(),
            };
            let length = self.current().map_or(1, |s| s.len().max(1));
            let location = self.current_location();
            let code = match self.current() {
                None => ErrorCode::UnexpectedEndOfFile,
                _ => ErrorCode::MissingExpectedToken,
            };
            self.on_error(location, error_base(&component), length, code);
        }
        found
    }

    /// Accept the first character of a whitespace symbol and return the rest.
    fn accept_single_whitespace_character(&mut self) -> Option<Symbol> {
        let current = self.current().filter(|s| s.kind == SyntaxKind::WHITESPACE)?.clone();
        let (head, tail) = current.split(1, SyntaxKind::WHITESPACE);
        self.accept(head);
        self.cursor_mut().span.edit_handler.accepted_characters = AcceptedCharacters::NONE;
        self.next_token();
        tail
    }

    /// Accept blank lines, holding back the indentation of the last line.
    fn accept_whitespace_in_lines(&mut self) -> Option<Symbol> {
        let mut last_whitespace = None;
        while self.at_whitespace() || self.at_newline() {
            if let Some(whitespace) = last_whitespace.take() {
                self.accept(whitespace);
            }
            if self.at_whitespace() {
                last_whitespace = self.current().cloned();
            } else if let Some(newline) = self.current().cloned() {
                self.accept(newline);
            }
            let (ctx, cursor) = self.parts();
            let previous = cursor.previous.take();
            cursor.next(&mut ctx.source);
            cursor.previous = previous;
        }
        last_whitespace
    }

    // =========================================================================
    // SPANS AND BLOCKS
    // =========================================================================

    /// Close the span being built, if it has symbols, and start the next one.
    fn output(&mut self, kind: SpanKind) -> ParseResult {
        self.cursor_mut().span.kind = kind;
        self.output_pending()
    }

    fn output_with(&mut self, kind: SpanKind, accepted: AcceptedCharacters) -> ParseResult {
        let span = &mut self.cursor_mut().span;
        span.kind = kind;
        span.edit_handler.accepted_characters = accepted;
        self.output_pending()
    }

    #[doc(hidden)]
    fn output_pending(&mut self) -> ParseResult {
        let (ctx, cursor) = self.parts();
        if cursor.span.is_empty() {
            return Ok(());
        }
        let span = cursor.span.build();
        ctx.add_span(span)?;
        cursor.initialize_span();
        Ok(())
    }

    fn initialize_span(&mut self) {
        self.cursor_mut().initialize_span();
    }

    fn span_config(&self) -> Option<&SpanConfig> {
        self.cursor().span_config.as_ref()
    }

    /// Replace the span configuration and apply it to the span being built.
    fn configure_span(&mut self, config: Option<SpanConfig>) {
        let cursor = self.cursor_mut();
        cursor.span_config = config;
        cursor.initialize_span();
    }

    /// Run `f` under `config`, restoring the previous configuration afterwards.
    fn with_span_config<R>(
        &mut self,
        config: Option<SpanConfig>,
        f: impl FnOnce(&mut Self) -> ParseResult<R>,
    ) -> ParseResult<R> {
        let old = self.cursor().span_config.clone();
        self.configure_span(config);
        let result = f(self)?;
        self.cursor_mut().span_config = old;
        Ok(result)
    }

    /// Ensure an empty span still produces a node when the last one was not open-ended.
    fn add_marker_symbol_if_necessary(&mut self) {
        let location = self.current_location();
        self.add_marker_symbol_at(location);
    }

    fn add_marker_symbol_at(&mut self, location: SourceLocation) {
        if self.cursor().span.is_empty()
            && self.context().last_accepted_characters() != AcceptedCharacters::ANY
        {
            let marker = self.language().marker_symbol(location);
            self.accept(marker);
        }
    }

    fn with_block<R>(
        &mut self,
        block_type: Option<BlockType>,
        f: impl FnOnce(&mut Self) -> ParseResult<R>,
    ) -> ParseResult<R> {
        self.context_mut().start_block(block_type)?;
        let result = f(self)?;
        self.context_mut().end_block()?;
        Ok(result)
    }

    fn set_block_type(&mut self, block_type: BlockType) -> ParseResult {
        self.context_mut().current_block_mut()?.block_type = Some(block_type);
        Ok(())
    }

    fn set_block_generator(&mut self, generator: BlockChunkGenerator) -> ParseResult {
        self.context_mut().current_block_mut()?.chunk_generator = generator;
        Ok(())
    }

    fn on_error(
        &mut self,
        location: SourceLocation,
        message: impl Into<String>,
        length: usize,
        code: ErrorCode,
    ) {
        self.context_mut().on_error(location, message, length, code);
    }

    // =========================================================================
    // BALANCING
    // =========================================================================

    /// Balance the bracket under the cursor against its partner.
    fn balance(&mut self, mode: BalancingModes) -> ParseResult<bool> {
        let Some(left) = self.current_kind() else {
            return Ok(false);
        };
        let right = self.language().flip_bracket(left);
        let start = self.current_location();
        self.accept_and_move_next();
        if self.eof() && !mode.contains(BalancingModes::NO_ERROR_ON_FAILURE) {
            self.report_unbalanced(start, left, right);
        }
        self.balance_with(mode, left, right, start)
    }

    /// Consume up to the `right` that brings nesting from one to zero.
    ///
    /// Returns whether the closing symbol was found. On failure the cursor
    /// either keeps everything read or, with `BACKTRACK_ON_FAILURE`, returns
    /// to where it was when this was called.
    fn balance_with(
        &mut self,
        mode: BalancingModes,
        left: SyntaxKind,
        right: SyntaxKind,
        start: SourceLocation,
    ) -> ParseResult<bool> {
        let mut start_position = self.current_location().absolute;
        let mut nesting = 1usize;
        if self.eof() {
            return Ok(false);
        }

        let mut symbols = Vec::new();
        loop {
            if self.is_at_embedded_transition(
                mode.contains(BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES),
                mode.contains(BalancingModes::ALLOW_EMBEDDED_TRANSITIONS),
            ) {
                self.accept_symbols(std::mem::take(&mut symbols));
                self.handle_embedded_transition()?;
                // Spans were emitted, so there is nothing left to rewind over.
                start_position = self.current_location().absolute;
            }
            if self.at(left) {
                nesting += 1;
            } else if self.at(right) {
                nesting -= 1;
            }
            if nesting > 0 {
                if let Some(current) = self.current().cloned() {
                    symbols.push(current);
                }
            }
            if nesting == 0 || !self.next_token() {
                break;
            }
        }

        if nesting > 0 {
            if !mode.contains(BalancingModes::NO_ERROR_ON_FAILURE) {
                self.report_unbalanced(start, left, right);
            }
            if mode.contains(BalancingModes::BACKTRACK_ON_FAILURE) {
                self.seek(start_position);
                self.next_token();
            } else {
                self.accept_symbols(symbols);
            }
        } else {
            self.accept_symbols(symbols);
        }
        Ok(nesting == 0)
    }

    #[doc(hidden)]
    fn report_unbalanced(&mut self, start: SourceLocation, left: SyntaxKind, right: SyntaxKind) {
        let language = self.language();
        let message =
            messages::expected_close_bracket_before_eof(language.sample(left), language.sample(right));
        self.on_error(start, message, 1, ErrorCode::UnterminatedConstruct);
    }

    // =========================================================================
    // RAZOR COMMENTS
    // =========================================================================

    /// Parse `@* ... *@` into a comment block. The cursor is on the opening `@`.
    fn razor_comment(&mut self) -> ParseResult {
        self.output_span_before_razor_comment()?;
        self.with_span_config(Some(SpanConfig::comment()), |p| {
            p.with_block(Some(BlockType::Comment), |p| {
                p.set_block_generator(BlockChunkGenerator::RazorComment)?;
                let start = p.current_location();

                // The comment body is not lexed; read it straight from the source.
                let (ctx, cursor) = p.parts();
                if let Some(transition) = cursor.current.take() {
                    cursor.span.accept(transition);
                }
                cursor.flush(&mut ctx.source);
                p.output_with(SpanKind::Transition, AcceptedCharacters::NONE)?;

                if p.accept_raw(SyntaxKind::RAZOR_COMMENT_STAR, 1) {
                    p.output_with(SpanKind::MetaCode, AcceptedCharacters::NONE)?;
                }

                let rest = p.context().source.rest();
                let (body_len, terminated) = match rest.find("*@") {
                    Some(end) => (end, true),
                    None => (rest.len(), false),
                };
                p.accept_raw(SyntaxKind::RAZOR_COMMENT, body_len);
                p.add_marker_symbol_if_necessary();
                p.output(SpanKind::Comment)?;

                if terminated {
                    p.accept_raw(SyntaxKind::RAZOR_COMMENT_STAR, 1);
                    p.output_with(SpanKind::MetaCode, AcceptedCharacters::NONE)?;
                    p.accept_raw(SyntaxKind::RAZOR_COMMENT_TRANSITION, 1);
                    p.output_with(SpanKind::Transition, AcceptedCharacters::NONE)?;
                } else {
                    p.on_error(
                        start,
                        messages::razor_comment_not_terminated(),
                        2,
                        ErrorCode::UnterminatedConstruct,
                    );
                }
                Ok(())
            })
        })?;
        self.initialize_span();
        self.next_token();
        Ok(())
    }

    /// Accept the next `len` bytes of the source as one symbol of `kind`.
    #[doc(hidden)]
    fn accept_raw(&mut self, kind: SyntaxKind, len: usize) -> bool {
        let (ctx, cursor) = self.parts();
        let source = &mut ctx.source;
        let start = source.position();
        let end = (start + len).min(source.len());
        if end == start || !source.text().is_char_boundary(end) {
            return false;
        }
        let symbol = Symbol::new(kind, &source.text()[start..end], source.location());
        source.set_position(end);
        cursor.current = None;
        cursor.span.accept(symbol);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::ParserError;
    use crate::parser::language::CodeDialect;
    use crate::parser::source::SourceReader;

    /// A bare code-dialect parser with no grammar attached.
    struct Probe {
        ctx: ParserContext,
        cursor: TokenCursor,
    }

    impl Probe {
        fn new(text: &str) -> Self {
            let mut ctx = ParserContext::new(SourceReader::new(text), CodeDialect::CSharp, false);
            ctx.start_block(Some(BlockType::Statement)).unwrap();
            let mut probe = Self {
                ctx,
                cursor: TokenCursor::new(Language::CSharp),
            };
            probe.next_token();
            probe
        }
    }

    impl TokenParser for Probe {
        fn parts(&mut self) -> (&mut ParserContext, &mut TokenCursor) {
            (&mut self.ctx, &mut self.cursor)
        }

        fn cursor(&self) -> &TokenCursor {
            &self.cursor
        }

        fn context(&self) -> &ParserContext {
            &self.ctx
        }

        fn output_span_before_razor_comment(&mut self) -> ParseResult {
            self.output(SpanKind::Code)
        }
    }

    #[test]
    fn test_balance_wellformed() {
        let mut p = Probe::new("(a(b)c) d");
        assert!(p.balance(BalancingModes::NONE).unwrap());
        assert_eq!(p.cursor.span.content(), "(a(b)c");
        assert!(p.at(SyntaxKind::R_PAREN));
        assert_eq!(p.current_location().absolute, 6);
        assert!(p.ctx.errors().is_empty());
    }

    #[test]
    fn test_balance_backtracks_to_start() {
        let mut p = Probe::new("(a b");
        p.accept_and_move_next();
        let start = SourceLocation::ZERO;
        let before = p.current_location();
        let complete = p
            .balance_with(
                BalancingModes::BACKTRACK_ON_FAILURE,
                SyntaxKind::L_PAREN,
                SyntaxKind::R_PAREN,
                start,
            )
            .unwrap();
        assert!(!complete);
        assert_eq!(p.current_location(), before);
        assert_eq!(p.cursor.span.content(), "(");
        assert_eq!(p.ctx.errors().len(), 1);
        assert_eq!(p.ctx.errors()[0].code, ErrorCode::UnterminatedConstruct);
    }

    #[test]
    fn test_balance_failure_keeps_content() {
        let mut p = Probe::new("{ x");
        let complete = p.balance(BalancingModes::NO_ERROR_ON_FAILURE).unwrap();
        assert!(!complete);
        assert_eq!(p.cursor.span.content(), "{ x");
        assert!(p.eof());
        assert!(p.ctx.errors().is_empty());
    }

    #[test]
    fn test_lookahead_does_not_consume() {
        let mut p = Probe::new("a.b");
        assert_eq!(p.lookahead(2).unwrap().text(), "b");
        assert!(p.at(SyntaxKind::IDENT));
        assert_eq!(p.current_text(), "a");
        assert!(p.next_is(SyntaxKind::DOT));
        p.next_token();
        assert!(p.was(SyntaxKind::IDENT));
        assert!(p.at(SyntaxKind::DOT));
    }

    #[test]
    fn test_put_back_sequence() {
        let mut p = Probe::new("a b c");
        let read = p.read_while(|s| s.kind != SyntaxKind::IDENT || s.text() != "c");
        assert_eq!(read.len(), 4);
        p.put_current_back();
        p.put_back_all(read);
        p.next_token();
        let all = p.read_while(|_| true);
        let text: String = all.iter().map(Symbol::text).collect();
        assert_eq!(text, "a b c");
    }

    #[test]
    fn test_lexical_errors_surface_on_accept() {
        let mut p = Probe::new("\"open");
        assert!(p.ctx.errors().is_empty());
        p.accept_and_move_next();
        assert_eq!(p.ctx.errors().len(), 1);
        assert_eq!(p.ctx.errors()[0].code, ErrorCode::UnterminatedLiteral);
    }

    #[test]
    fn test_required_reports_found_symbol() {
        let mut p = Probe::new(" x");
        assert!(!p.required(SyntaxKind::L_PAREN, true, messages::expected_x));
        let error = &p.ctx.errors()[0];
        assert!(error.message.contains("whitespace"));
        assert_eq!(error.code, ErrorCode::MissingExpectedToken);
    }

    #[test]
    fn test_razor_comment_block() {
        let mut p = Probe::new("@* note *@x");
        p.razor_comment().unwrap();
        let block = p.ctx.current_block().unwrap();
        let comment = block.children[0].as_block().unwrap();
        assert_eq!(comment.block_type, BlockType::Comment);
        let kinds: Vec<_> = comment.spans().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [
                SpanKind::Transition,
                SpanKind::MetaCode,
                SpanKind::Comment,
                SpanKind::MetaCode,
                SpanKind::Transition
            ]
        );
        assert_eq!(comment.content(), "@* note *@");
        assert_eq!(p.current_text(), "x");
    }

    #[test]
    fn test_unterminated_razor_comment() {
        let mut p = Probe::new("@* open");
        p.razor_comment().unwrap();
        assert_eq!(p.ctx.errors().len(), 1);
        assert_eq!(p.ctx.errors()[0].length, 2);
        assert!(p.eof());
    }

    #[test]
    fn test_with_block_propagates_fatal_errors() {
        let mut p = Probe::new("x");
        let result: ParseResult = p.with_block(None, |_| Ok(()));
        assert_eq!(result, Err(ParserError::BlockTypeNotSpecified));
    }
}
