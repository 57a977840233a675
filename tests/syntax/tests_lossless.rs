//! Every parse reproduces its input exactly, errors or not.

use once_cell::sync::Lazy;
use rstest::rstest;

use crate::helpers::{assert_contiguous, parse_design_time};
use razor::{CodeDialect, ParserOptions, RazorParser};

static CSHARP_CORPUS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "",
        "plain text\n",
        "<!DOCTYPE html>\n<html>\n<head><title>@ViewBag.Title</title></head>\n</html>",
        "<ul>\n    @foreach (var item in Model.Items) {\n        <li class=\"@(item.Active ? \"on\" : null)\">@item.Name</li>\n    }\n</ul>",
        "@{\n    var total = 0;\n    <text>running @total</text>\n    @: and a line\n}",
        "@inherits PageBase<Model>\n@using System.Linq\n@layout ~/_Layout\n<p>x</p>",
        "@section Scripts {\n    <script>if (a < b) { go(); }</script>\n}",
        "@helper Link(string href) {\n    <a href=\"@href\">go</a>\n}\n",
        "@functions {\n    int Twice(int x) { return x * 2; }\n}",
        "<p>mail me@home.org, @@escaped, @* gone *@ ok</p>",
        "<input type=\"checkbox\" checked=\"@isChecked\" data-id=\"@id\" />",
        "<a href=\"~/home\" class=\"x y\">z</a>",
        "<!-- @note --><![CDATA[ <p> ]]><?xml version=\"1.0\"?>",
        "<p>\u{A0}@x\u{2028}@{ var y\u{3000}= 1;\u{85}}</p>",
        // malformed documents
        "<div><p>text</div>",
        "text</span>",
        "@(a + b",
        "@{ var x = \"open",
        "@if (x) { <p>unclosed",
        "<a href=\"@x",
        "@section { }",
        "@",
        "@ x @!y",
        "@* never closed",
        "<script>never closed",
    ]
});

static VB_CORPUS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "<p>@Model.Items(0).Name</p>",
        "@Code\n    Dim x = 1\n    @: x is @x\nEnd Code\n",
        "@If a Then\n    @<p>yes</p>\nElse\n    @<p>no</p>\nEnd If\n",
        "@For Each item In items\n    @<li>@item</li>\nNext\n",
        "@Imports System.Text\n@Option Strict On\n@Inherits Foo.Bar(Of T)\n",
        "@Section Header\n    <p>@title</p>\nEnd Section\n",
        "@Helper Bold(s As String)\n    @<b>@s</b>\nEnd Helper\n",
        "@Functions\n    Function F() As Integer\n        Return 1\n    End Function\nEnd Functions\n",
        "@Code\n    REM note\n    x = \"a\" & @@y ' tail\nEnd Code\n",
        "@Code\u{2028}\u{A0}Dim x = 1 ' note\u{2029}End Code\u{85}<p>@x</p>",
        // malformed documents
        "@If x Then\n    y = 1\n",
        "@Code\n",
        "@Option Infer Maybe\n",
        "@Section\n<p>x</p>",
        "@Helper Bold\n",
        "@(a & ",
    ]
});

fn check(source: &str, options: ParserOptions) {
    let results = RazorParser::new(options)
        .parse(source)
        .expect("parse session failed");
    assert_eq!(results.root.content(), source, "{options:?}");
    assert_contiguous(&results.root);
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_csharp_corpus_round_trips(#[case] design_time: bool) {
    let options = ParserOptions::new(CodeDialect::CSharp).design_time(design_time);
    for source in CSHARP_CORPUS.iter() {
        check(source, options);
    }
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_vb_corpus_round_trips(#[case] design_time: bool) {
    let options = ParserOptions::new(CodeDialect::VisualBasic).design_time(design_time);
    for source in VB_CORPUS.iter() {
        check(source, options);
    }
}

#[test]
fn test_locations_track_lines() {
    let source = "a\r\nb\n  @x";
    let results = parse_design_time(source, CodeDialect::CSharp);
    let transition = results
        .root
        .spans()
        .find(|s| s.content == "@")
        .expect("transition span");
    assert_eq!(transition.start.absolute, 7);
    assert_eq!(transition.start.line, 2);
    assert_eq!(transition.start.column, 2);
}

#[test]
fn test_unicode_line_breaks_track_lines() {
    let source = "a\u{2028}b\u{85}\u{A0}@x";
    let results = parse_design_time(source, CodeDialect::CSharp);
    let transition = results
        .root
        .spans()
        .find(|s| s.content == "@")
        .expect("transition span");
    assert_eq!(transition.start.line, 2);
    assert_eq!(transition.start.column, 1);
}

#[test]
fn test_unicode_content_round_trips() {
    let source = "<p title=\"ñ\">日本語 @名前 ✓</p>";
    let results = parse_design_time(source, CodeDialect::CSharp);
    assert_eq!(results.root.content(), source);
    assert_contiguous(&results.root);
}
