//! Parse sessions: options in, tree and diagnostics out.

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::parser::errors::{ParserError, RazorDiagnostic};
use crate::parser::language::CodeDialect;
use crate::parser::session::Session;
use crate::parser::source::SourceReader;
use crate::rewrite;
use crate::syntax::Block;
use crate::syntax::visitor::check_cancelled;

/// What a parse session is configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParserOptions {
    /// Language of the code between transitions
    pub dialect: CodeDialect,
    /// Keep whitespace inside code spans instead of handing it to markup,
    /// the way editor tooling expects.
    pub design_time: bool,
}

impl ParserOptions {
    pub fn new(dialect: CodeDialect) -> Self {
        Self {
            dialect,
            design_time: false,
        }
    }

    pub fn design_time(mut self, design_time: bool) -> Self {
        self.design_time = design_time;
        self
    }
}

/// The result of a completed parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserResults {
    pub root: Block,
    pub diagnostics: Vec<RazorDiagnostic>,
}

impl ParserResults {
    /// True when the document parsed without diagnostics.
    pub fn success(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Entry point for parsing documents.
///
/// A parser holds only options; every call runs its own session, so one
/// parser can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RazorParser {
    options: ParserOptions,
}

impl RazorParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse(&self, source: &str) -> Result<ParserResults, ParserError> {
        self.parse_with_cancellation(source, &CancellationToken::new())
    }

    /// Parse `source`, giving up with [`ParserError::Cancelled`] once `cancel`
    /// is signalled.
    pub fn parse_with_cancellation(
        &self,
        source: &str,
        cancel: &CancellationToken,
    ) -> Result<ParserResults, ParserError> {
        check_cancelled(cancel)?;
        debug!(
            dialect = ?self.options.dialect,
            design_time = self.options.design_time,
            length = source.len(),
            "parse session started"
        );

        let mut session = Session::new(
            SourceReader::new(source),
            self.options.dialect,
            self.options.design_time,
        );
        session.parse_document()?;
        let (root, diagnostics) = session.ctx.complete_parse()?;
        let root = rewrite::rewrite_all(root, cancel)?;

        debug!(diagnostics = diagnostics.len(), "parse session completed");
        Ok(ParserResults { root, diagnostics })
    }

    /// Parse independent documents in parallel, one session each.
    ///
    /// Results come back in the order of `sources`.
    pub fn parse_many(&self, sources: &[&str]) -> Vec<Result<ParserResults, ParserError>> {
        sources.par_iter().map(|source| self.parse(source)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::BlockType;

    #[test]
    fn test_default_options() {
        let options = ParserOptions::default();
        assert_eq!(options.dialect, CodeDialect::CSharp);
        assert!(!options.design_time);
        assert!(ParserOptions::new(CodeDialect::VisualBasic).design_time(true).design_time);
    }

    #[test]
    fn test_parse_returns_markup_root() {
        let results = RazorParser::default().parse("<p>@x</p>").unwrap();
        assert!(results.success());
        assert_eq!(results.root.block_type, BlockType::Markup);
        assert_eq!(results.root.content(), "<p>@x</p>");
    }

    #[test]
    fn test_pre_cancelled_parse() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(
            RazorParser::default().parse_with_cancellation("<p></p>", &cancel),
            Err(ParserError::Cancelled)
        );
    }
}
