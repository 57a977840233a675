//! Tokenizers through the public API.

use rstest::rstest;

use razor::SourceLocation;
use razor::keywords::{CSharpKeyword, Keyword, VbKeyword};
use razor::parser::{Language, SyntaxKind, tokenize};

fn kinds(language: Language, text: &str) -> Vec<SyntaxKind> {
    tokenize(language, text, SourceLocation::ZERO)
        .iter()
        .map(|s| s.kind)
        .collect()
}

#[rstest]
#[case(Language::Html)]
#[case(Language::CSharp)]
#[case(Language::VisualBasic)]
fn test_tokenize_is_lossless(#[case] language: Language) {
    let text = "<ul>\r\n  @foreach (var x in xs) { <li>@x</li> } ' REM \"open\n</ul>";
    let symbols = tokenize(language, text, SourceLocation::ZERO);
    let joined: String = symbols.iter().map(|s| s.text()).collect();
    assert_eq!(joined, text);
    for pair in symbols.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start.absolute);
    }
}

#[test]
fn test_start_location_is_honoured() {
    let start = SourceLocation::new(10, 2, 4);
    let symbols = tokenize(Language::CSharp, "a b", start);
    assert_eq!(symbols[0].start, start);
    assert_eq!(symbols[2].start, SourceLocation::new(12, 2, 6));
}

#[test]
fn test_markup_transitions() {
    assert_eq!(
        kinds(Language::Html, "a @b"),
        [
            SyntaxKind::TEXT,
            SyntaxKind::WHITESPACE,
            SyntaxKind::TRANSITION,
            SyntaxKind::TEXT
        ]
    );
    assert_eq!(kinds(Language::Html, "me@home.org"), [SyntaxKind::TEXT]);
    assert_eq!(
        kinds(Language::Html, "@*")[0],
        SyntaxKind::RAZOR_COMMENT_TRANSITION
    );
}

#[test]
fn test_keywords_are_attached() {
    let csharp = tokenize(Language::CSharp, "foreach", SourceLocation::ZERO);
    assert_eq!(csharp[0].kind, SyntaxKind::KEYWORD);
    assert_eq!(csharp[0].keyword, Some(Keyword::CSharp(CSharpKeyword::Foreach)));

    let vb = tokenize(Language::VisualBasic, "end", SourceLocation::ZERO);
    assert_eq!(vb[0].keyword, Some(Keyword::Vb(VbKeyword::End)));
}

#[test]
fn test_comments_per_dialect() {
    assert_eq!(
        kinds(Language::CSharp, "// note\nx")[0],
        SyntaxKind::COMMENT
    );
    assert_eq!(
        kinds(Language::VisualBasic, "REM note\nx")[0],
        SyntaxKind::COMMENT
    );
    assert_eq!(kinds(Language::VisualBasic, "Remove")[0], SyntaxKind::IDENT);
}

#[test]
fn test_unterminated_literal_carries_diagnostic() {
    let symbols = tokenize(Language::CSharp, "\"open\nx", SourceLocation::ZERO);
    assert_eq!(symbols[0].kind, SyntaxKind::STRING_LITERAL);
    assert_eq!(symbols[0].errors.len(), 1);
}
