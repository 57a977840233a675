//! Tag content: attribute names, values and error recovery inside a tag.
//!
//! An attribute with a value becomes its own markup block. Unless it is a
//! `data-` attribute, the block carries an attribute generator and each
//! whitespace-separated piece of the value is a separate literal span or a
//! dynamic code block, so the attribute can be dropped when every dynamic
//! piece is null at runtime.

use super::{MarkupParser, other_parser_block, skip_to, skip_to_and_parse_code};
use crate::base::LocationTagged;
use crate::parser::errors::ParseResult;
use crate::parser::grammar::{content_of, spacing};
use crate::parser::primitives::TokenParser;
use crate::parser::symbol::Symbol;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    AcceptedCharacters, Block, BlockChunkGenerator, BlockType, LiteralAttributeValue,
    SpanChunkGenerator, SpanKind, SyntaxTreeNode,
};

/// Characters allowed right after `type` for it to be the `type` attribute.
const AFTER_TYPE_ATTRIBUTE_NAME: &[char] = &[' ', '\t', '\r', '\n', '\x0C', '='];

/// Everything between the tag name and `>` or `/>`.
pub(super) fn tag_content(p: &mut MarkupParser<'_>) -> ParseResult {
    if !p.at_whitespace() && !p.at_newline() {
        // Right after the name only whitespace may follow.
        return recover_to_end_of_tag(p);
    }
    while !p.eof() && !is_end_of_tag(p) {
        before_attribute(p)?;
    }
    Ok(())
}

fn is_end_of_tag(p: &mut MarkupParser<'_>) -> bool {
    p.ensure_current();
    if p.at(SyntaxKind::SLASH) {
        if p.next_is(SyntaxKind::R_ANGLE) {
            return true;
        }
        p.accept_and_move_next();
    }
    p.at(SyntaxKind::R_ANGLE) || p.at(SyntaxKind::L_ANGLE)
}

fn before_attribute(p: &mut MarkupParser<'_>) -> ParseResult {
    let whitespace = p.read_while(spacing(true, false));

    if p.at(SyntaxKind::TRANSITION) || !p.current().is_some_and(is_valid_attribute_name) {
        // A transition outside a value, or garbage: skip to the end of the tag.
        p.accept_symbols(whitespace);
        return recover_to_end_of_tag(p);
    }

    let name = p.read_while_with(|p| match p.current_kind() {
        Some(
            SyntaxKind::WHITESPACE
            | SyntaxKind::NEWLINE
            | SyntaxKind::EQ
            | SyntaxKind::R_ANGLE
            | SyntaxKind::L_ANGLE,
        ) => false,
        Some(SyntaxKind::SLASH) => !p.next_is(SyntaxKind::R_ANGLE),
        _ => true,
    });
    let after_name = p.read_while(spacing(true, false));

    if !p.at(SyntaxKind::EQ) {
        // Minimized attribute; what follows is parsed as the next attribute.
        p.put_current_back();
        p.put_back_all(after_name);
        p.output(SpanKind::Markup)?;
        return p.with_block(Some(BlockType::Markup), |p| {
            p.accept_symbols(whitespace);
            p.accept_symbols(name);
            p.output(SpanKind::Markup)
        });
    }

    p.output(SpanKind::Markup)?;
    p.with_block(Some(BlockType::Markup), |p| {
        attribute_prefix(p, whitespace, name, after_name)
    })
}

fn attribute_prefix(
    p: &mut MarkupParser<'_>,
    whitespace: Vec<Symbol>,
    name: Vec<Symbol>,
    after_name: Vec<Symbol>,
) -> ParseResult {
    let name_text = content_of(&name);
    let conditional = !name_text
        .get(..5)
        .is_some_and(|head| head.eq_ignore_ascii_case("data-"));

    p.accept_symbols(whitespace);
    p.accept_symbols(name);
    p.accept_symbols(after_name);
    p.expected(SyntaxKind::EQ);

    let after_equals = p.read_while(spacing(true, false));
    let mut quote = None;
    if p.at(SyntaxKind::SINGLE_QUOTE) || p.at(SyntaxKind::DOUBLE_QUOTE) {
        p.accept_symbols(after_equals.clone());
        quote = p.current_kind();
        p.accept_and_move_next();
    } else if !after_equals.is_empty() {
        // Unquoted value after whitespace: leave it for the next attribute.
        p.put_current_back();
        p.put_back_all(after_equals.clone());
    }

    let span = &p.cursor().span;
    let prefix = LocationTagged::new(span.content(), span.start);

    if !conditional {
        p.output(SpanKind::Markup)?;
        if quote.is_none() && !after_equals.is_empty() {
            return Ok(());
        }
        skip_to_and_parse_code(p, |p, s| is_end_of_attribute_value(p, quote, s))?;
        p.output(SpanKind::Markup)?;
        if let Some(quote) = quote {
            p.optional(quote);
        }
        return p.output(SpanKind::Markup);
    }

    // The block generator renders the prefix and suffix.
    p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
    p.output(SpanKind::Markup)?;

    if quote.is_some() || after_equals.is_empty() {
        loop {
            p.ensure_current();
            let Some(current) = p.current().cloned() else {
                break;
            };
            if p.eof() || is_end_of_attribute_value(p, quote, &current) {
                break;
            }
            attribute_value(p, quote)?;
        }
    }

    let mut suffix = LocationTagged::empty(p.current_location());
    if let Some(quote) = quote {
        if let Some(closing) = p.current().filter(|s| s.kind == quote).cloned() {
            suffix = LocationTagged::new(closing.text().to_string(), closing.start);
            p.accept_and_move_next();
        }
    }
    if !p.cursor().span.is_empty() {
        p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
        p.output(SpanKind::Markup)?;
    }

    p.set_block_generator(BlockChunkGenerator::Attribute {
        name: name_text,
        prefix,
        suffix,
    })
}

/// One whitespace-separated piece of a conditional attribute value.
fn attribute_value(p: &mut MarkupParser<'_>, quote: Option<SyntaxKind>) -> ParseResult {
    let prefix_start = p.current_location();
    let prefix = p.read_while(spacing(true, false));
    let prefix_value = LocationTagged::new(content_of(&prefix), prefix_start);

    if p.at(SyntaxKind::TRANSITION) {
        if p.next_is(SyntaxKind::TRANSITION) {
            // "@@" renders a single "@"; the own block keeps the collapser off it.
            return p.with_block(Some(BlockType::Markup), |p| {
                p.accept_symbols(prefix);
                let at = LocationTagged::new(p.current_text().to_string(), p.current_location());
                p.cursor_mut().span.chunk_generator = SpanChunkGenerator::LiteralAttribute {
                    prefix: prefix_value,
                    value: LiteralAttributeValue::Text(at),
                };
                p.accept_and_move_next();
                p.output_with(SpanKind::Markup, AcceptedCharacters::NONE)?;

                p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
                p.accept_and_move_next();
                p.output_with(SpanKind::Markup, AcceptedCharacters::NONE)
            });
        }

        p.accept_symbols(prefix);
        let value_start = p.current_location();
        p.put_current_back();
        // The dynamic attribute generator renders the prefix.
        p.cursor_mut().span.chunk_generator = SpanChunkGenerator::None;
        p.with_block(Some(BlockType::Markup), |p| {
            p.set_block_generator(BlockChunkGenerator::DynamicAttribute {
                prefix: prefix_value,
                value_start,
            })?;
            other_parser_block(p)
        })?;
    } else {
        p.accept_symbols(prefix);
        let value = p.read_while_with(|p| match p.current().cloned() {
            Some(s) => {
                !matches!(
                    s.kind,
                    SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::TRANSITION
                ) && !is_end_of_attribute_value(p, quote, &s)
            }
            None => false,
        });
        let value_start = value.first().map_or(p.current_location(), |s| s.start);
        let text = content_of(&value);
        p.accept_symbols(value);

        let value = if text.starts_with("~/") {
            LiteralAttributeValue::ResolveUrl(value_start)
        } else {
            LiteralAttributeValue::Text(LocationTagged::new(text, value_start))
        };
        p.cursor_mut().span.chunk_generator = SpanChunkGenerator::LiteralAttribute {
            prefix: prefix_value,
            value,
        };
    }
    p.output(SpanKind::Markup)
}

fn is_end_of_attribute_value(
    p: &mut MarkupParser<'_>,
    quote: Option<SyntaxKind>,
    symbol: &Symbol,
) -> bool {
    if p.eof() {
        return true;
    }
    match quote {
        Some(quote) => symbol.kind == quote,
        None => is_unquoted_end_of_attribute_value(p, symbol),
    }
}

fn is_unquoted_end_of_attribute_value(p: &mut MarkupParser<'_>, symbol: &Symbol) -> bool {
    match symbol.kind {
        SyntaxKind::DOUBLE_QUOTE
        | SyntaxKind::SINGLE_QUOTE
        | SyntaxKind::L_ANGLE
        | SyntaxKind::EQ
        | SyntaxKind::R_ANGLE
        | SyntaxKind::WHITESPACE
        | SyntaxKind::NEWLINE => true,
        SyntaxKind::SLASH => p.next_is(SyntaxKind::R_ANGLE),
        _ => false,
    }
}

fn is_tag_recovery_stop_point(symbol: &Symbol) -> bool {
    matches!(
        symbol.kind,
        SyntaxKind::R_ANGLE
            | SyntaxKind::SLASH
            | SyntaxKind::L_ANGLE
            | SyntaxKind::SINGLE_QUOTE
            | SyntaxKind::DOUBLE_QUOTE
    )
}

/// Skip to `>`, `/` or `<`, stepping over quoted strings and parsing code.
fn recover_to_end_of_tag(p: &mut MarkupParser<'_>) -> ParseResult {
    while !p.eof() {
        skip_to_and_parse_code(p, |_, s| is_tag_recovery_stop_point(s))?;
        if p.eof() || !p.ensure_current() {
            break;
        }
        match p.current_kind() {
            Some(quote @ (SyntaxKind::SINGLE_QUOTE | SyntaxKind::DOUBLE_QUOTE)) => {
                p.accept_and_move_next();
                parse_quoted(p, quote)?;
            }
            Some(SyntaxKind::L_ANGLE | SyntaxKind::SLASH | SyntaxKind::R_ANGLE) => break,
            _ => {
                p.accept_and_move_next();
            }
        }
    }
    Ok(())
}

fn parse_quoted(p: &mut MarkupParser<'_>, quote: SyntaxKind) -> ParseResult {
    skip_to(p, quote)?;
    if !p.eof() {
        p.expected(quote);
    }
    Ok(())
}

/// Symbols that may start an attribute name.
pub(crate) fn is_valid_attribute_name(symbol: &Symbol) -> bool {
    !matches!(
        symbol.kind,
        SyntaxKind::WHITESPACE
            | SyntaxKind::NEWLINE
            | SyntaxKind::R_ANGLE
            | SyntaxKind::L_ANGLE
            | SyntaxKind::SLASH
            | SyntaxKind::DOUBLE_QUOTE
            | SyntaxKind::SINGLE_QUOTE
            | SyntaxKind::EQ
            | SyntaxKind::UNKNOWN
    )
}

// =============================================================================
// <script type="text/html">
// =============================================================================

/// Whether the `script` tag under construction declares `type="text/html"`.
///
/// Such a script holds markup and is parsed like any other element.
pub(super) fn current_script_tag_expects_html(p: &MarkupParser<'_>) -> ParseResult<bool> {
    let block = p.context().current_block()?;
    let type_attribute = block
        .children
        .iter()
        .filter_map(SyntaxTreeNode::as_block)
        .filter(|b| {
            matches!(b.chunk_generator, BlockChunkGenerator::Attribute { .. })
                && b.children.len() >= 2
        })
        .find(|b| is_type_attribute(b));

    let Some(type_attribute) = type_attribute else {
        return Ok(false);
    };
    let script_type: String = type_attribute
        .children
        .iter()
        .filter_map(SyntaxTreeNode::as_span)
        .filter(|s| s.chunk_generator.is_literal_attribute())
        .map(|s| s.content.as_str())
        .collect();
    Ok(script_type.trim().eq_ignore_ascii_case("text/html"))
}

fn is_type_attribute(block: &Block) -> bool {
    let Some(span) = block.children.first().and_then(SyntaxTreeNode::as_span) else {
        return false;
    };
    let content = span.content.trim_start();
    match content.get(..4) {
        Some(head) if head.eq_ignore_ascii_case("type") => content[4..]
            .chars()
            .next()
            .is_none_or(|c| AFTER_TYPE_ATTRIBUTE_NAME.contains(&c)),
        _ => false,
    }
}
