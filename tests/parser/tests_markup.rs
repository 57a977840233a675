//! Markup structure: tags, attributes, comments and escapes.

use rstest::rstest;

use crate::helpers::{blocks_of_type, first_code_block, parse_csharp, span_summary};
use razor::syntax::{BlockChunkGenerator, BlockType, SpanChunkGenerator, SpanKind};

fn tag_contents(source: &str) -> Vec<String> {
    let results = parse_csharp(source);
    blocks_of_type(&results.root, BlockType::Tag)
        .into_iter()
        .map(|b| b.content())
        .collect()
}

// ============================================================================
// Tags
// ============================================================================

#[test]
fn test_plain_document_is_one_markup_block() {
    let results = parse_csharp("Hello world\n");
    assert!(results.success());
    assert_eq!(results.root.block_type, BlockType::Markup);
    assert_eq!(
        span_summary(&results.root),
        [(SpanKind::Markup, "Hello world\n".to_string())]
    );
}

#[test]
fn test_empty_document() {
    let results = parse_csharp("");
    assert!(results.success());
    assert_eq!(results.root.block_type, BlockType::Markup);
    assert_eq!(results.root.content(), "");
}

#[rstest]
#[case("<div><p>x</p></div>", &["<div>", "<p>", "</p>", "</div>"])]
#[case("<p>a<br>b<br/></p>", &["<p>", "<br>", "<br/>", "</p>"])]
#[case("<div class=\"a b\"></div>", &["<div class=\"a b\">", "</div>"])]
#[case("<input disabled>", &["<input disabled>"])]
fn test_tags_become_tag_blocks(#[case] source: &str, #[case] expected: &[&str]) {
    assert_eq!(tag_contents(source), expected);
}

#[test]
fn test_text_between_tags_stays_flat() {
    let results = parse_csharp("<p>one</p> two <b>three</b>");
    assert!(results.success());
    let text: Vec<_> = results
        .root
        .children
        .iter()
        .filter_map(|c| c.as_span())
        .map(|s| s.content.as_str())
        .filter(|text| !text.is_empty())
        .collect();
    assert_eq!(text, ["one", " two ", "three"]);
}

#[test]
fn test_script_body_is_raw_text() {
    let source = "<script>if (a < b) { go(); }</script>";
    let results = parse_csharp(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    assert_eq!(tag_contents(source), ["<script>", "</script>"]);
}

#[test]
fn test_script_body_still_parses_code() {
    let results = parse_csharp("<script>var x = @count;</script>");
    assert!(results.success());
    assert_eq!(first_code_block(&results.root).content(), "@count");
}

#[rstest]
#[case("<!DOCTYPE html>\n<p>x</p>")]
#[case("<!-- a comment -->")]
#[case("<![CDATA[ <p> ]]>")]
#[case("<?xml version=\"1.0\"?>")]
fn test_special_tags_parse_cleanly(#[case] source: &str) {
    let results = parse_csharp(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    assert_eq!(results.root.content(), source);
}

#[test]
fn test_code_inside_html_comment() {
    let results = parse_csharp("<!-- @x -->");
    assert!(results.success());
    assert_eq!(first_code_block(&results.root).content(), "@x");
}

#[test]
fn test_bang_escaped_tag() {
    let results = parse_csharp("<!p>x</!p>");
    assert!(results.success(), "{:?}", results.diagnostics);
    assert!(
        results
            .root
            .spans()
            .any(|s| s.kind == SpanKind::MetaCode && s.content == "!")
    );
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_literal_attribute_is_collapsed() {
    let results = parse_csharp("<a class=\"x y\">z</a>");
    assert!(results.success());
    assert!(
        !results
            .root
            .descendant_blocks()
            .iter()
            .any(|b| matches!(b.chunk_generator, BlockChunkGenerator::Attribute { .. }))
    );
}

#[test]
fn test_dynamic_attribute_keeps_its_block() {
    let results = parse_csharp("<a href=\"/x/@id\">z</a>");
    assert!(results.success());
    let attribute = results
        .root
        .descendant_blocks()
        .into_iter()
        .find(|b| matches!(b.chunk_generator, BlockChunkGenerator::Attribute { .. }))
        .expect("attribute block");
    let BlockChunkGenerator::Attribute { name, prefix, suffix } = &attribute.chunk_generator else {
        unreachable!();
    };
    assert_eq!(name, "href");
    assert_eq!(prefix.value, " href=\"");
    assert_eq!(suffix.value, "\"");
    assert_eq!(attribute.content(), " href=\"/x/@id\"");
    assert_eq!(blocks_of_type(attribute, BlockType::Expression).len(), 1);
}

#[test]
fn test_data_attribute_is_never_conditional() {
    let results = parse_csharp("<a data-id=\"@id\">z</a>");
    assert!(results.success());
    assert!(
        !results
            .root
            .descendant_blocks()
            .iter()
            .any(|b| matches!(b.chunk_generator, BlockChunkGenerator::Attribute { .. }))
    );
    assert_eq!(first_code_block(&results.root).content(), "@id");
}

#[test]
fn test_url_value_keeps_attribute() {
    let results = parse_csharp("<a href=\"~/home\">z</a>");
    assert!(results.success());
    assert!(results.root.spans().any(|s| matches!(
        s.chunk_generator,
        SpanChunkGenerator::LiteralAttribute { .. }
    )));
}

// ============================================================================
// Escapes and comments
// ============================================================================

#[test]
fn test_escaped_transition_in_text() {
    let results = parse_csharp("x @@ y");
    assert!(results.success());
    assert!(blocks_of_type(&results.root, BlockType::Expression).is_empty());
    let escape = results
        .root
        .spans()
        .find(|s| s.chunk_generator == SpanChunkGenerator::None)
        .expect("escape span");
    assert_eq!(escape.content, "@");
    assert_eq!(escape.start.absolute, 2);
}

#[test]
fn test_email_address_is_text() {
    let results = parse_csharp("mail foo@bar.com now");
    assert!(results.success());
    assert_eq!(results.root.descendant_blocks().len(), 1);
}

#[test]
fn test_razor_comment_in_markup() {
    let results = parse_csharp("a @* note *@ b");
    assert!(results.success());
    let comments = blocks_of_type(&results.root, BlockType::Comment);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].chunk_generator, BlockChunkGenerator::RazorComment);
    assert_eq!(
        span_summary(comments[0]),
        [
            (SpanKind::Transition, "@".to_string()),
            (SpanKind::MetaCode, "*".to_string()),
            (SpanKind::Comment, " note ".to_string()),
            (SpanKind::MetaCode, "*".to_string()),
            (SpanKind::Transition, "@".to_string()),
        ]
    );
}

#[test]
fn test_text_tag_is_a_transition() {
    let results = parse_csharp("@{ <text>hi</text> }");
    assert!(results.success(), "{:?}", results.diagnostics);
    let transitions: Vec<_> = results
        .root
        .spans()
        .filter(|s| s.kind == SpanKind::Transition)
        .map(|s| s.content.as_str())
        .collect();
    assert_eq!(transitions, ["@", "<text>", "</text>"]);
}
