//! C-family code regions: expressions, statements and directives.

use rstest::rstest;

use crate::helpers::{
    blocks_of_type, first_code_block, parse_csharp, parse_design_time, span_summary,
};
use razor::syntax::{BlockChunkGenerator, BlockType, SpanChunkGenerator, SpanKind};
use razor::{CodeDialect, ErrorCode};

// ============================================================================
// Expressions
// ============================================================================

#[rstest]
#[case("<p>@name</p>", "@name")]
#[case("<p>@user.Name.First!</p>", "@user.Name.First")]
#[case("<p>@items[0].Title</p>", "@items[0].Title")]
#[case("<p>@Format(a, b).</p>", "@Format(a, b)")]
#[case("<p>@order?.Total</p>", "@order?.Total")]
#[case("<p>@(1 + 2)</p>", "@(1 + 2)")]
#[case("<p>@await LoadAsync()</p>", "@await LoadAsync()")]
fn test_expression_extent(#[case] source: &str, #[case] expected: &str) {
    let results = parse_csharp(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let block = first_code_block(&results.root);
    assert_eq!(block.block_type, BlockType::Expression);
    assert_eq!(block.chunk_generator, BlockChunkGenerator::Expression);
    assert_eq!(block.content(), expected);
}

#[test]
fn test_explicit_expression_spans() {
    let results = parse_csharp("@(a ? \"x\" : \"y\")");
    let block = first_code_block(&results.root);
    assert_eq!(
        span_summary(block),
        [
            (SpanKind::Transition, "@".to_string()),
            (SpanKind::MetaCode, "(".to_string()),
            (SpanKind::Code, "a ? \"x\" : \"y\"".to_string()),
            (SpanKind::MetaCode, ")".to_string()),
        ]
    );
}

#[test]
fn test_indentation_before_expression_is_markup() {
    let results = parse_csharp("a\n  @x");
    assert!(results.success());
    assert_eq!(first_code_block(&results.root).content(), "@x");
    let first = results.root.children[0].as_span().unwrap();
    assert_eq!(first.kind, SpanKind::Markup);
    assert_eq!(first.content, "a\n  ");
}

#[test]
fn test_indentation_before_statement_depends_on_mode() {
    let source = "a\n  @{ x(); }";
    let runtime = parse_csharp(source);
    assert_eq!(first_code_block(&runtime.root).content(), "  @{ x(); }");

    let design = parse_design_time(source, CodeDialect::CSharp);
    assert_eq!(first_code_block(&design.root).content(), "@{ x(); }");
}

// ============================================================================
// Statements
// ============================================================================

#[rstest]
#[case("@if (a) { b(); } else { c(); }")]
#[case("@foreach (var item in items) { <li>@item</li> }")]
#[case("@for (var i = 0; i < n; i++) { <b>@i</b> }")]
#[case("@while (more) { next(); }")]
#[case("@switch (x) { case 1: <p>one</p> break; default: break; }")]
#[case("@try { a(); } catch (Exception e) { <p>@e.Message</p> } finally { c(); }")]
#[case("@do { x++; } while (x < 3);")]
#[case("@lock (sync) { y(); }")]
#[case("@using (var scope = Begin()) { z(); }")]
fn test_control_flow_is_one_statement_block(#[case] source: &str) {
    let results = parse_csharp(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let block = first_code_block(&results.root);
    assert_eq!(block.block_type, BlockType::Statement);
    assert_eq!(block.content(), source);
}

#[test]
fn test_markup_nested_in_statement() {
    let source = "@foreach (var item in items) {\n    <li>@item.Name</li>\n}";
    let results = parse_csharp(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let statement = first_code_block(&results.root);
    let markup = blocks_of_type(statement, BlockType::Markup);
    assert_eq!(markup.len(), 1);
    let expressions = blocks_of_type(statement, BlockType::Expression);
    assert_eq!(expressions.len(), 1);
    assert_eq!(expressions[0].content(), "@item.Name");
}

#[test]
fn test_code_block_spans() {
    let results = parse_csharp("@{ var total = 0; }");
    assert!(results.success());
    let block = first_code_block(&results.root);
    assert_eq!(block.block_type, BlockType::Statement);
    let code = block.spans().find(|s| s.kind == SpanKind::Code).unwrap();
    assert_eq!(code.content, " var total = 0; ");
    assert_eq!(code.chunk_generator, SpanChunkGenerator::Statement);
}

#[test]
fn test_single_line_markup_in_block() {
    let source = "@{\n    @: Total: @total\n}";
    let results = parse_csharp(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    assert!(
        results
            .root
            .spans()
            .any(|s| s.kind == SpanKind::MetaCode && s.content == ":")
    );
    let expressions = blocks_of_type(&results.root, BlockType::Expression);
    assert_eq!(expressions.len(), 1);
    assert_eq!(expressions[0].content(), "@total");
}

// ============================================================================
// Directives
// ============================================================================

#[test]
fn test_directive_generators() {
    let source = "@inherits PageBase\n@using System.Linq\n@layout ~/_Layout\n<p>x</p>";
    let results = parse_csharp(source);
    assert!(results.success(), "{:?}", results.diagnostics);

    let generators: Vec<_> = results.root.spans().map(|s| &s.chunk_generator).collect();
    assert!(generators.contains(&&SpanChunkGenerator::SetBaseType("PageBase".to_string())));
    assert!(generators.contains(&&SpanChunkGenerator::SetLayout("~/_Layout".to_string())));
    assert!(generators.iter().any(|g| matches!(
        g,
        SpanChunkGenerator::AddImport { namespace, keyword_length: 5 }
            if namespace.trim() == "System.Linq"
    )));
    assert_eq!(blocks_of_type(&results.root, BlockType::Directive).len(), 3);
}

#[test]
fn test_section_with_markup_and_code() {
    let source = "@section Scripts {\n    <script src=\"@url\"></script>\n}";
    let results = parse_csharp(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let section = first_code_block(&results.root);
    assert_eq!(section.block_type, BlockType::Section);
    assert_eq!(
        section.chunk_generator,
        BlockChunkGenerator::Section("Scripts".to_string())
    );
    assert_eq!(section.content(), source);
    assert_eq!(blocks_of_type(section, BlockType::Expression).len(), 1);
}

#[test]
fn test_functions_block() {
    let results = parse_csharp("@functions {\n    int Twice(int x) { return x * 2; }\n}");
    assert!(results.success());
    let block = first_code_block(&results.root);
    assert_eq!(block.block_type, BlockType::Functions);
    assert!(
        block
            .spans()
            .any(|s| s.chunk_generator == SpanChunkGenerator::TypeMember)
    );
}

#[test]
fn test_helper_block() {
    let source = "@helper Link(string href) {\n    <a href=\"@href\">go</a>\n}\n";
    let results = parse_csharp(source);
    assert!(results.success(), "{:?}", results.diagnostics);
    let helper = first_code_block(&results.root);
    assert_eq!(helper.block_type, BlockType::Helper);
    assert!(matches!(
        &helper.chunk_generator,
        BlockChunkGenerator::Helper { signature, header_complete: true }
            if signature.value.starts_with("Link(string href)")
    ));
}

#[rstest]
#[case("@sessionstate ReadOnly", "ReadOnly")]
#[case("@sessionstate \"Disabled\"", "Disabled")]
fn test_session_state(#[case] source: &str, #[case] expected: &str) {
    let results = parse_csharp(source);
    assert!(results.success());
    assert!(results.root.spans().any(|s| {
        s.chunk_generator
            == SpanChunkGenerator::RazorDirectiveAttribute {
                name: "sessionstate".to_string(),
                value: expected.to_string(),
            }
    }));
}

#[rstest]
#[case("@class", ErrorCode::ReservedWordUsed)]
#[case("@namespace", ErrorCode::ReservedWordUsed)]
#[case("@{ using System; }", ErrorCode::NestedConstructNotAllowed)]
#[case("@section A { @section B { } }", ErrorCode::NestedConstructNotAllowed)]
#[case("@inherits \n", ErrorCode::MissingExpectedToken)]
fn test_directive_misuse(#[case] source: &str, #[case] code: ErrorCode) {
    let results = parse_csharp(source);
    assert_eq!(results.diagnostics.len(), 1, "{:?}", results.diagnostics);
    assert_eq!(results.diagnostics[0].code, code);
    assert_eq!(results.root.content(), source);
}
