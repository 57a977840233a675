//! BASIC-family code regions.

use rstest::rstest;

use crate::helpers::{blocks_of_type, first_code_block, parse_vb, span_summary};
use razor::syntax::{BlockChunkGenerator, BlockType, SpanChunkGenerator, SpanKind};
use razor::ErrorCode;

#[rstest]
#[case("<p>@Model.Items(0).Name</p>", "@Model.Items(0).Name")]
#[case("<p>@a.b.c!</p>", "@a.b.c")]
#[case("<p>@Me.Title x</p>", "@Me.Title")]
#[case("<p>@(a & \"b\")</p>", "@(a & \"b\")")]
fn test_expression_extent(#[case] source: &str, #[case] expected: &str) {
    let results = parse_vb(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let block = first_code_block(&results.root);
    assert_eq!(block.block_type, BlockType::Expression);
    assert_eq!(block.content(), expected);
}

#[test]
fn test_code_block() {
    let source = "@Code\n    Dim x = 1\nEnd Code\n<p>@x</p>";
    let results = parse_vb(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let block = first_code_block(&results.root);
    assert_eq!(block.block_type, BlockType::Statement);
    assert_eq!(
        span_summary(block),
        [
            (SpanKind::Transition, "@".to_string()),
            (SpanKind::MetaCode, "Code".to_string()),
            (SpanKind::Code, "\n    Dim x = 1\n".to_string()),
            (SpanKind::MetaCode, "End Code\n".to_string()),
        ]
    );
    assert_eq!(results.root.content(), source);
}

#[rstest]
#[case("@If x Then\n    y = 1\nElse\n    y = 2\nEnd If\n")]
#[case("@For Each item In items\n    @<li>@item</li>\nNext\n")]
#[case("@Do\n    Do\n        x()\n    Loop\nLoop\n")]
#[case("@Select Case x\n    Case 1\n        y = 1\nEnd Select\n")]
#[case("@While i < 3\n    Exit While\nEnd While\n")]
fn test_keyword_blocks_end_at_terminator(#[case] code: &str) {
    let source = format!("{code}<p>after</p>");
    let results = parse_vb(&source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let block = first_code_block(&results.root);
    assert_eq!(block.block_type, BlockType::Statement);
    assert_eq!(block.content(), code);
}

#[test]
fn test_single_line_if_ends_at_newline() {
    let results = parse_vb("@If x Then y = 1\n<p>z</p>");
    assert!(results.success());
    assert_eq!(first_code_block(&results.root).content(), "@If x Then y = 1\n");
}

#[test]
fn test_markup_inside_code() {
    let source = "@Code\n    @: hello @name\n    Dim t = @<b>x</b>\nEnd Code\n";
    let results = parse_vb(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let code = first_code_block(&results.root);
    assert_eq!(blocks_of_type(code, BlockType::Template).len(), 1);
    let expressions = blocks_of_type(code, BlockType::Expression);
    assert_eq!(expressions.len(), 1);
    assert_eq!(expressions[0].content(), "@name");
}

#[test]
fn test_directives() {
    let source = "@Imports System.Text\n@Option Strict On\n@Inherits Foo.Bar(Of T)\n<p>x</p>";
    let results = parse_vb(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let generators: Vec<_> = results.root.spans().map(|s| &s.chunk_generator).collect();
    assert!(generators.contains(&&SpanChunkGenerator::AddImport {
        namespace: " System.Text".to_string(),
        keyword_length: "Imports".len(),
    }));
    assert!(generators.contains(&&SpanChunkGenerator::SetVbOption {
        name: "Strict".to_string(),
        value: true,
    }));
    assert!(generators.contains(&&SpanChunkGenerator::SetBaseType("Foo.Bar(Of T)".to_string())));
    assert_eq!(blocks_of_type(&results.root, BlockType::Directive).len(), 3);
}

#[test]
fn test_section() {
    let source = "@Section Header\n    <p>@title</p>\nEnd Section\n";
    let results = parse_vb(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let section = first_code_block(&results.root);
    assert_eq!(section.block_type, BlockType::Section);
    assert_eq!(
        section.chunk_generator,
        BlockChunkGenerator::Section("Header".to_string())
    );
    assert_eq!(blocks_of_type(section, BlockType::Expression).len(), 1);
    assert_eq!(results.root.content(), source);
}

#[test]
fn test_helper() {
    let source = "@Helper Bold(s As String)\n    @<b>@s</b>\nEnd Helper\n";
    let results = parse_vb(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let helper = first_code_block(&results.root);
    assert_eq!(helper.block_type, BlockType::Helper);
    assert!(matches!(
        &helper.chunk_generator,
        BlockChunkGenerator::Helper { signature, header_complete: true }
            if signature.value == "Bold(s As String)"
    ));
}

#[rstest]
#[case("@If x Then\n    y = 1\n", ErrorCode::UnterminatedConstruct)]
#[case("@Code\n    Dim x = 1\n", ErrorCode::UnterminatedConstruct)]
#[case("@Option Infer On\n", ErrorCode::InvalidDirectiveValue)]
#[case("@Class", ErrorCode::ReservedWordUsed)]
#[case("@Code\nImports System\nEnd Code\n", ErrorCode::NestedConstructNotAllowed)]
fn test_errors(#[case] source: &str, #[case] code: ErrorCode) {
    let results = parse_vb(source);
    assert_eq!(results.diagnostics.len(), 1, "{:?}", results.diagnostics);
    assert_eq!(results.diagnostics[0].code, code);
    assert_eq!(results.root.content(), source);
}
