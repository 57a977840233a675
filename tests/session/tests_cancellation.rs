//! Cancellation of parse sessions.

use razor::{CancellationToken, CodeDialect, ParserError, ParserOptions, RazorParser};

#[test]
fn test_cancelled_before_start() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    for dialect in [CodeDialect::CSharp, CodeDialect::VisualBasic] {
        let parser = RazorParser::new(ParserOptions::new(dialect));
        assert_eq!(
            parser.parse_with_cancellation("<p>@x</p>", &cancel),
            Err(ParserError::Cancelled)
        );
    }
}

#[test]
fn test_uncancelled_token_parses() {
    let cancel = CancellationToken::new();
    let results = RazorParser::default()
        .parse_with_cancellation("<p>@x</p>", &cancel)
        .unwrap();
    assert!(results.success());
}

#[test]
fn test_child_token_follows_parent() {
    let parent = CancellationToken::new();
    let child = parent.child_token();
    parent.cancel();
    assert_eq!(
        RazorParser::default().parse_with_cancellation("x", &child),
        Err(ParserError::Cancelled)
    );
}

#[test]
fn test_cancelled_error_message() {
    assert_eq!(ParserError::Cancelled.to_string(), "operation was cancelled");
}
