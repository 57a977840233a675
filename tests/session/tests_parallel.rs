//! Independent sessions running in parallel.

use razor::{CodeDialect, ParserOptions, RazorParser};

fn documents() -> Vec<String> {
    (0..64)
        .map(|i| match i % 4 {
            0 => format!("<p>@item{i}</p>"),
            1 => format!("@{{ var x = {i}; }}<b>@x</b>"),
            2 => format!("<div><p>unclosed {i}</div>"),
            _ => format!("@section S{i} {{ <i>@(a + {i})</i> }}"),
        })
        .collect()
}

#[test]
fn test_parse_many_matches_sequential_parse() {
    let parser = RazorParser::new(ParserOptions::new(CodeDialect::CSharp));
    let owned = documents();
    let sources: Vec<&str> = owned.iter().map(String::as_str).collect();

    let parallel = parser.parse_many(&sources);
    assert_eq!(parallel.len(), sources.len());
    for (source, result) in sources.iter().zip(parallel) {
        let result = result.unwrap();
        assert_eq!(result.root.content(), *source);
        assert_eq!(result, parser.parse(source).unwrap());
    }
}

#[test]
fn test_parse_many_empty() {
    assert!(RazorParser::default().parse_many(&[]).is_empty());
}

#[test]
fn test_parser_shared_across_threads() {
    let parser = RazorParser::new(ParserOptions::new(CodeDialect::VisualBasic));
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                scope.spawn(move || {
                    let source = format!("@Code\n    x = {i}\nEnd Code\n");
                    parser.parse(&source).unwrap().root.content() == source
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}
