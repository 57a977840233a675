//! Walking parsed trees with a visitor.

use razor::syntax::{Block, BlockType, Span, SpanKind, SyntaxVisitor, walk_block};
use razor::{CancellationToken, ParserError};

use crate::helpers::parse_csharp;

#[derive(Default)]
struct Outline {
    depth: usize,
    max_depth: usize,
    code: Vec<String>,
    text: String,
}

impl SyntaxVisitor for Outline {
    fn visit_start_block(&mut self, _block: &Block) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn visit_end_block(&mut self, _block: &Block) {
        self.depth -= 1;
    }

    fn visit_span(&mut self, span: &Span) {
        if span.kind == SpanKind::Code {
            self.code.push(span.content.clone());
        }
        self.text.push_str(&span.content);
    }
}

#[test]
fn test_visitor_sees_document_order() {
    let source = "<p>@a and @(b + c)</p>";
    let results = parse_csharp(source);
    let mut outline = Outline::default();
    walk_block(&mut outline, &results.root, &CancellationToken::new()).unwrap();

    assert_eq!(outline.text, source);
    assert_eq!(outline.code, ["a", "b + c"]);
    assert_eq!(outline.depth, 0);
    assert!(outline.max_depth >= 2);
}

#[test]
fn test_walk_stops_when_cancelled() {
    let results = parse_csharp("<p>@a</p>");
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut outline = Outline::default();
    assert_eq!(
        walk_block(&mut outline, &results.root, &cancel),
        Err(ParserError::Cancelled)
    );
    assert!(outline.text.is_empty());
}

#[test]
fn test_block_counts() {
    struct Count(usize);
    impl SyntaxVisitor for Count {
        fn visit_start_block(&mut self, block: &Block) {
            if block.block_type == BlockType::Expression {
                self.0 += 1;
            }
        }
    }

    let results = parse_csharp("@a @b <i>@c</i> me@d.com");
    let mut count = Count(0);
    walk_block(&mut count, &results.root, &CancellationToken::new()).unwrap();
    assert_eq!(count.0, 3);
}
