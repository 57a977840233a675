//! Recoverable errors: codes, locations and recovery.

use rstest::rstest;

use crate::helpers::{parse_csharp, parse_vb};
use razor::{ErrorCode, TextRange, TextSize};

#[test]
fn test_balanced_document_is_clean() {
    let results = parse_csharp("<div><p>text</p><br></div>");
    assert!(results.success(), "{:?}", results.diagnostics);
}

#[test]
fn test_missing_end_tag() {
    let results = parse_csharp("<div><p>text</div>");
    assert_eq!(results.diagnostics.len(), 1);
    let diagnostic = &results.diagnostics[0];
    assert_eq!(diagnostic.code, ErrorCode::MissingEndTag);
    assert_eq!(diagnostic.location.absolute, 6);
    assert_eq!(
        diagnostic.range(),
        TextRange::at(TextSize::new(6), TextSize::new(1))
    );
    assert!(diagnostic.to_string().starts_with("RZ1002 (1:7): "));
}

#[test]
fn test_unexpected_end_tag() {
    let results = parse_csharp("text</span>");
    assert_eq!(results.diagnostics.len(), 1);
    assert_eq!(results.diagnostics[0].code, ErrorCode::UnexpectedEndTag);
    assert_eq!(results.diagnostics[0].location.absolute, 6);
    assert_eq!(results.diagnostics[0].length, "span".len());
}

#[rstest]
#[case("@ x", ErrorCode::UnexpectedWhitespace)]
#[case("text @", ErrorCode::UnexpectedEndOfFile)]
#[case("@!x", ErrorCode::UnexpectedCharacter)]
#[case("@{ var x = 1;", ErrorCode::UnterminatedConstruct)]
fn test_transition_errors(#[case] source: &str, #[case] code: ErrorCode) {
    let results = parse_csharp(source);
    assert_eq!(results.diagnostics.len(), 1, "{:?}", results.diagnostics);
    assert_eq!(results.diagnostics[0].code, code);
    assert_eq!(results.root.content(), source);
}

#[rstest]
#[case::csharp(false)]
#[case::vb(true)]
fn test_unterminated_explicit_expression(#[case] vb: bool) {
    let results = if vb {
        parse_vb("@(a + b")
    } else {
        parse_csharp("@(a + b")
    };
    assert_eq!(results.diagnostics.len(), 1);
    assert_eq!(results.diagnostics[0].location.absolute, 1);
    assert_eq!(results.root.content(), "@(a + b");
}

#[test]
fn test_errors_do_not_stop_the_parse() {
    let source = "<div><p>@(x</div>\n<b>@y</b>";
    let results = parse_csharp(source);
    assert!(!results.success());
    assert_eq!(results.root.content(), source);
}

#[test]
fn test_error_codes_render_stably() {
    assert_eq!(ErrorCode::UnterminatedConstruct.as_str(), "RZ1001");
    assert_eq!(ErrorCode::MissingEndTag.to_string(), "RZ1002");
    assert_eq!(ErrorCode::ReservedWordUsed.as_str(), "RZ1302");
    assert!(ErrorCode::MissingEndTag.is_unterminated());
}
