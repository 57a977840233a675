//! Tree rewriting through the public API.

use razor::rewrite::{Rewriter, default_rewriters, rewrite, rewrite_all};
use razor::syntax::{
    BlockChunkGenerator, BlockType, SpanChunkGenerator, SpanKind, SyntaxTreeNode,
};
use razor::{CancellationToken, CodeDialect};

use crate::helpers::{parse_csharp, parse_design_time};

const DOCUMENT: &str = "<ul class=\"list\">\n    @foreach (var x in xs) {\n        <li title=\"@x\">@x</li>\n    }\n</ul>\n  @tail";

#[test]
fn test_default_rewriter_order() {
    let names: Vec<_> = default_rewriters().iter().map(|r| r.name()).collect();
    assert_eq!(names, ["whitespace", "conditional-attribute", "markup"]);
}

#[test]
fn test_parsed_trees_are_fixed_points() {
    for results in [
        parse_csharp(DOCUMENT),
        parse_design_time(DOCUMENT, CodeDialect::CSharp),
    ] {
        let again = rewrite_all(results.root.clone(), &CancellationToken::new()).unwrap();
        assert_eq!(again, results.root);
    }
}

#[test]
fn test_no_adjacent_plain_markup_after_parse() {
    let results = parse_csharp(DOCUMENT);
    for block in results.root.descendant_blocks() {
        for pair in block.children.windows(2) {
            let both_markup = pair.iter().all(|node| {
                node.as_span().is_some_and(|s| {
                    s.kind == SpanKind::Markup
                        && s.chunk_generator == SpanChunkGenerator::Markup
                })
            });
            assert!(!both_markup, "unmerged markup in {}", block.block_type);
        }
    }
}

#[test]
fn test_expression_never_starts_with_whitespace() {
    let results = parse_csharp(DOCUMENT);
    for block in results.root.descendant_blocks() {
        if block.block_type == BlockType::Expression {
            let first = block.find_first_descendent_span().expect("empty expression");
            assert!(!first.is_whitespace_only() || first.content.is_empty());
        }
    }
}

#[test]
fn test_only_dynamic_attributes_survive() {
    let results = parse_csharp(DOCUMENT);
    let attributes: Vec<_> = results
        .root
        .descendant_blocks()
        .into_iter()
        .filter_map(|b| match &b.chunk_generator {
            BlockChunkGenerator::Attribute { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(attributes, ["title"]);
}

struct DropTags;

impl Rewriter for DropTags {
    fn name(&self) -> &'static str {
        "drop-tags"
    }

    fn can_rewrite(&self, _: &[SyntaxTreeNode], node: &SyntaxTreeNode) -> bool {
        node.as_block().is_some_and(|b| b.block_type == BlockType::Tag)
    }

    fn rewrite(&self, _: &mut Vec<SyntaxTreeNode>, _: SyntaxTreeNode) -> Option<SyntaxTreeNode> {
        None
    }
}

#[test]
fn test_custom_rewriter() {
    let results = parse_csharp("<p>@x</p>");
    let rewritten = rewrite(&DropTags, results.root, &CancellationToken::new()).unwrap();
    assert_eq!(rewritten.content(), "@x");
    assert_eq!(rewritten.block_type, BlockType::Markup);
}
