//! Directives: identifiers with their own production after a transition.

use super::{
    VbParser, accept_words, at_words, complete, complete_block, report_unterminated,
    section_block, set_auto_complete_on_child, statements,
};
use crate::base::LocationTagged;
use crate::parser::cursor::SpanConfig;
use crate::parser::errors::{ErrorCode, ParseResult, messages};
use crate::parser::grammar::markup::SectionEnd;
use crate::parser::grammar::{spacing, strip_quotes};
use crate::parser::primitives::{BalancingModes, TokenParser};
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    AcceptedCharacters, BlockChunkGenerator, BlockType, EditHandler, SpanChunkGenerator, SpanKind,
};

const SECTION_EXAMPLE: &str = "@Section Header ... End Section";

const END_CODE: &[&str] = &["End", "Code"];
const END_FUNCTIONS: &[&str] = &["End", "Functions"];
const END_SECTION: &[&str] = &["End", "Section"];
const END_HELPER: &[&str] = &["End", "Helper"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Directive {
    Code,
    Functions,
    Section,
    Helper,
    Layout,
    SessionState,
}

impl Directive {
    pub const ALL: &'static [Directive] = &[
        Self::Code,
        Self::Functions,
        Self::Section,
        Self::Helper,
        Self::Layout,
        Self::SessionState,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Functions => "Functions",
            Self::Section => "Section",
            Self::Helper => "Helper",
            Self::Layout => "Layout",
            Self::SessionState => "SessionState",
        }
    }

    /// Directive names ignore case, like the rest of the dialect.
    pub fn lookup(text: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(text))
    }
}

pub(super) fn parse_directive(p: &mut VbParser<'_>, directive: Directive) -> ParseResult {
    match directive {
        Directive::Code => code_directive(p),
        Directive::Functions => functions_directive(p),
        Directive::Section => section_directive(p),
        Directive::Helper => helper_directive(p),
        Directive::Layout => layout_directive(p),
        Directive::SessionState => session_state_directive(p),
    }
}

// =============================================================================
// Code and Functions
// =============================================================================

/// `Code ... End Code`
fn code_directive(p: &mut VbParser<'_>) -> ParseResult {
    word_terminated_body(p, END_CODE, "End Code", SpanChunkGenerator::Statement)
}

/// `Functions ... End Functions`
fn functions_directive(p: &mut VbParser<'_>) -> ParseResult {
    p.set_block_type(BlockType::Functions)?;
    word_terminated_body(p, END_FUNCTIONS, "End Functions", SpanChunkGenerator::TypeMember)
}

/// The directive keyword, a code body and the `end` words, each its own span.
fn word_terminated_body(
    p: &mut VbParser<'_>,
    end: &'static [&'static str],
    auto_complete: &'static str,
    generator: SpanChunkGenerator,
) -> ParseResult {
    let block = p.current_block_info();
    p.accept_and_move_next();
    p.set_delimiter();
    p.output(SpanKind::MetaCode)?;

    p.cursor_mut().span.edit_handler = EditHandler::auto_complete(false);
    let found = statements::statement_body(p, end, false)?;
    p.set_generator(generator);
    p.add_marker_symbol_if_necessary();
    if !found {
        p.cursor_mut().span.edit_handler.set_auto_complete_string(auto_complete);
        report_unterminated(p, &block, end);
        return p.output(SpanKind::Code);
    }
    p.output(SpanKind::Code)?;

    accept_words(p, end);
    p.set_delimiter();
    complete(p)?;
    p.output(SpanKind::MetaCode)
}

// =============================================================================
// Section
// =============================================================================

/// `Section Name` markup `End Section`
fn section_directive(p: &mut VbParser<'_>) -> ParseResult {
    let nested = p.context().is_within(BlockType::Section);
    p.set_block_type(BlockType::Section)?;

    let block = p.current_block_info();
    p.accept_and_move_next();
    if nested {
        p.on_error(
            block.start,
            messages::nested_sections(SECTION_EXAMPLE),
            block.name.len(),
            ErrorCode::NestedConstructNotAllowed,
        );
    }

    let whitespace = p.read_while(spacing(false, false));
    let mut name = String::new();
    if p.required(
        SyntaxKind::IDENT,
        true,
        messages::unexpected_character_at_section_name_start,
    ) {
        p.accept_symbols(whitespace);
        name = p.current_text().to_string();
        p.accept_and_move_next();
    } else {
        p.put_current_back();
        p.put_back_all(whitespace);
        p.accept_while(spacing(false, false));
    }
    p.set_block_generator(BlockChunkGenerator::Section(name))?;

    // The markup parser starts right after the name.
    p.put_current_back();
    p.cursor_mut().span.edit_handler = EditHandler::auto_complete(true);
    let header_index = p.context().current_block()?.children.len();
    p.output(SpanKind::MetaCode)?;

    section_block(p, SectionEnd::Terminator(END_SECTION))?;

    p.set_generator(SpanChunkGenerator::None);
    if at_words(p, END_SECTION) {
        accept_words(p, END_SECTION);
        p.set_accepted(AcceptedCharacters::NONE);
    } else {
        set_auto_complete_on_child(p, header_index, "End Section")?;
        report_unterminated(p, &block, END_SECTION);
    }
    complete_block(p, false, true)?;
    p.output(SpanKind::MetaCode)
}

// =============================================================================
// Helper
// =============================================================================

/// `Helper Name(params)`, a statement body and `End Helper`
fn helper_directive(p: &mut VbParser<'_>) -> ParseResult {
    let nested = p.context().is_within(BlockType::Helper);
    p.set_block_type(BlockType::Helper)?;

    let block = p.current_block_info();
    p.accept_and_move_next();
    if nested {
        p.on_error(
            block.start,
            messages::nested_helpers(),
            block.name.len(),
            ErrorCode::NestedConstructNotAllowed,
        );
    }

    if !p.at_whitespace() {
        let location = p.current_location();
        let (found, code) = match p.current() {
            None => (messages::component_end_of_file(), ErrorCode::UnexpectedEndOfFile),
            Some(s) if s.kind == SyntaxKind::NEWLINE => {
                (messages::component_newline(), ErrorCode::MissingExpectedToken)
            }
            Some(s) => (messages::component_character(s.text()), ErrorCode::UnexpectedCharacter),
        };
        let length = p.current().map_or(1, |s| s.len().max(1));
        p.on_error(
            location,
            messages::unexpected_character_at_helper_name_start(&found),
            length,
            code,
        );
        p.put_current_back();
        return p.output(SpanKind::MetaCode);
    }

    let remaining_whitespace = p.accept_single_whitespace_character();
    p.output(SpanKind::MetaCode)?;
    if let Some(whitespace) = remaining_whitespace {
        p.accept(whitespace);
    }
    p.accept_while(spacing(false, false));
    let signature_start = p.current_location();

    let mut header_complete = p.required(
        SyntaxKind::IDENT,
        true,
        messages::unexpected_character_at_helper_name_start,
    );
    if header_complete {
        p.accept_and_move_next();
        p.accept_while(spacing(false, false));

        let paren_location = p.current_location();
        if p.optional(SyntaxKind::L_PAREN) {
            let complete = p.balance_with(
                BalancingModes::NO_ERROR_ON_FAILURE,
                SyntaxKind::L_PAREN,
                SyntaxKind::R_PAREN,
                paren_location,
            )?;
            if !complete {
                header_complete = false;
                p.on_error(
                    paren_location,
                    messages::unterminated_helper_parameter_list(),
                    1,
                    ErrorCode::UnterminatedConstruct,
                );
            }
            p.optional(SyntaxKind::R_PAREN);
        } else {
            header_complete = false;
            let paren = p.language().sample(SyntaxKind::L_PAREN);
            p.on_error(
                paren_location,
                messages::missing_char_after_helper_name(paren),
                1,
                ErrorCode::MissingExpectedToken,
            );
        }
    }

    let signature = p.cursor().span.content().trim_end().to_string();
    // The header runs to the end of its line.
    p.accept_while(spacing(false, true));
    p.optional(SyntaxKind::NEWLINE);
    p.add_marker_symbol_if_necessary();
    p.set_block_generator(BlockChunkGenerator::Helper {
        signature: LocationTagged::new(signature, signature_start),
        header_complete,
    })?;
    p.set_generator(SpanChunkGenerator::None);

    if !header_complete {
        complete(p)?;
        return p.output(SpanKind::Code);
    }
    p.set_accepted(AcceptedCharacters::NONE);
    p.output(SpanKind::Code)?;

    helper_body(p)?;
    p.initialize_span();
    p.ensure_current();

    if at_words(p, END_HELPER) {
        accept_words(p, END_HELPER);
        p.set_generator(SpanChunkGenerator::HelperFooter);
        p.set_accepted(AcceptedCharacters::NONE);
    } else {
        report_unterminated(p, &block, END_HELPER);
        p.set_generator(SpanChunkGenerator::None);
    }
    complete(p)?;
    p.output(SpanKind::Code)
}

/// The statements of a helper, as a child statement block.
fn helper_body(p: &mut VbParser<'_>) -> ParseResult {
    p.with_span_config(Some(SpanConfig::statement()), |p| {
        p.with_block(Some(BlockType::Statement), |p| {
            p.cursor_mut().span.edit_handler = EditHandler::auto_complete(false);
            if !statements::statement_body(p, END_HELPER, true)? {
                let handler = &mut p.cursor_mut().span.edit_handler;
                handler.set_auto_complete_string("End Helper");
                handler.accepted_characters = AcceptedCharacters::ANY;
            }
            p.add_marker_symbol_if_necessary();
            p.output(SpanKind::Code)
        })
    })
}

// =============================================================================
// Layout and SessionState
// =============================================================================

/// `Layout path`
fn layout_directive(p: &mut VbParser<'_>) -> ParseResult {
    let keyword_start = p.current_location();
    p.accept_and_move_next();
    let keyword_length = p.cursor().span.content().len();
    p.set_block_type(BlockType::Directive)?;

    let found_whitespace = p.at_whitespace();
    p.accept_while_kinds(&[SyntaxKind::WHITESPACE]);
    let accepted = if found_whitespace {
        AcceptedCharacters::NONE
    } else {
        AcceptedCharacters::ANY
    };
    p.output_with(SpanKind::MetaCode, accepted)?;

    if p.eof() || p.at_newline() {
        p.on_error(
            keyword_start,
            messages::directive_requires_value(Directive::Layout.as_str()),
            keyword_length,
            ErrorCode::MissingExpectedToken,
        );
    }

    p.accept_until(&[SyntaxKind::NEWLINE]);
    let layout = p.cursor().span.content();
    p.set_generator(SpanChunkGenerator::SetLayout(layout));
    let found_newline = p.optional(SyntaxKind::NEWLINE);
    p.add_marker_symbol_if_necessary();
    let accepted = if found_newline {
        AcceptedCharacters::NONE
    } else {
        AcceptedCharacters::ANY
    };
    p.output_with(SpanKind::MetaCode, accepted)
}

/// `SessionState value`, the value optionally quoted.
fn session_state_directive(p: &mut VbParser<'_>) -> ParseResult {
    let keyword = Directive::SessionState.as_str();
    let keyword_start = p.current_location();
    p.accept_and_move_next();
    let keyword_length = p.cursor().span.content().len();
    p.set_block_type(BlockType::Directive)?;

    let found_whitespace = p.at_whitespace();
    p.accept_while_kinds(&[SyntaxKind::WHITESPACE]);
    let accepted = if found_whitespace {
        AcceptedCharacters::NONE
    } else {
        AcceptedCharacters::ANY_EXCEPT_NEWLINE
    };
    p.output_with(SpanKind::MetaCode, accepted)?;

    let value = if p.eof() || p.at_newline() {
        p.on_error(
            keyword_start,
            messages::directive_requires_value(keyword),
            keyword_length,
            ErrorCode::MissingExpectedToken,
        );
        String::new()
    } else {
        let value_start = p.current_location();
        p.accept_until(&[SyntaxKind::NEWLINE]);
        let raw = p.cursor().span.content();
        match strip_quotes(raw.trim()) {
            Ok(value) => value.to_string(),
            Err(raw) => {
                p.on_error(
                    value_start,
                    messages::incomplete_quotes_around_directive(keyword),
                    raw.len(),
                    ErrorCode::InvalidDirectiveValue,
                );
                raw.to_string()
            }
        }
    };

    p.set_generator(SpanChunkGenerator::RazorDirectiveAttribute {
        name: keyword.to_ascii_lowercase(),
        value,
    });
    complete(p)?;
    p.output_with(SpanKind::Code, AcceptedCharacters::ANY_EXCEPT_NEWLINE)
}

#[cfg(test)]
mod tests {
    use super::super::tests::{first_code_block, parse};
    use super::*;
    use crate::syntax::Block;

    fn spans_of(block: &Block, kind: SpanKind) -> Vec<&str> {
        block
            .spans()
            .filter(|s| s.kind == kind)
            .map(|s| s.content.as_str())
            .collect()
    }

    #[test]
    fn test_directive_lookup_ignores_case() {
        assert_eq!(Directive::lookup("CODE"), Some(Directive::Code));
        assert_eq!(Directive::lookup("sessionstate"), Some(Directive::SessionState));
        assert_eq!(Directive::lookup("Codes"), None);
    }

    #[test]
    fn test_code_block_spans() {
        let input = "@Code\n    Dim x = 1\nEnd Code\n";
        let (root, errors) = parse(input);
        assert!(errors.is_empty(), "{errors:?}");
        let block = first_code_block(&root);
        assert_eq!(block.block_type, BlockType::Statement);
        let spans: Vec<_> = block.spans().map(|s| (s.kind, s.content.as_str())).collect();
        assert_eq!(
            spans,
            [
                (SpanKind::Transition, "@"),
                (SpanKind::MetaCode, "Code"),
                (SpanKind::Code, "\n    Dim x = 1\n"),
                (SpanKind::MetaCode, "End Code\n"),
            ]
        );
    }

    #[test]
    fn test_code_block_on_one_line() {
        let (root, errors) = parse("@Code Dim x = 1 End Code");
        assert!(errors.is_empty(), "{errors:?}");
        let block = first_code_block(&root);
        assert_eq!(spans_of(block, SpanKind::Code), [" Dim x = 1 "]);
    }

    #[test]
    fn test_unterminated_code_block() {
        let (root, errors) = parse("@Code\n    Dim x = 1\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::UnterminatedConstruct);
        assert_eq!(errors[0].location.absolute, 1);
        assert!(errors[0].message.contains("End Code"));
        let body = first_code_block(&root)
            .spans()
            .find(|s| s.kind == SpanKind::Code)
            .unwrap();
        assert_eq!(body.edit_handler.auto_complete_string(), Some("End Code"));
        assert_eq!(root.content(), "@Code\n    Dim x = 1\n");
    }

    #[test]
    fn test_functions() {
        let input = "@Functions\n    Function F() As Integer\n        Return 1\n    End Function\nEnd Functions\n";
        let (root, errors) = parse(input);
        assert!(errors.is_empty(), "{errors:?}");
        let block = first_code_block(&root);
        assert_eq!(block.block_type, BlockType::Functions);
        let body = block.spans().find(|s| s.kind == SpanKind::Code).unwrap();
        assert_eq!(body.chunk_generator, SpanChunkGenerator::TypeMember);
        assert_eq!(root.content(), input);
    }

    #[test]
    fn test_section() {
        let input = "@Section Header\n    <p>x</p>\nEnd Section\n";
        let (root, errors) = parse(input);
        assert!(errors.is_empty(), "{errors:?}");
        let block = first_code_block(&root);
        assert_eq!(block.block_type, BlockType::Section);
        assert_eq!(
            block.chunk_generator,
            BlockChunkGenerator::Section("Header".to_string())
        );
        assert_eq!(
            spans_of(block, SpanKind::MetaCode),
            ["Section Header", "End Section\n"]
        );
        assert!(block.child_blocks().any(|b| b.block_type == BlockType::Markup));
        assert_eq!(root.content(), input);
    }

    #[test]
    fn test_unterminated_section() {
        let (root, errors) = parse("@Section Header\n<p>x</p>");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::UnterminatedConstruct);
        assert_eq!(errors[0].location.absolute, 1);
        let header = first_code_block(&root)
            .spans()
            .find(|s| s.kind == SpanKind::MetaCode)
            .unwrap();
        assert_eq!(header.edit_handler.auto_complete_string(), Some("End Section"));
    }

    #[test]
    fn test_section_without_name() {
        let (_, errors) = parse("@Section\n<p>x</p>\nEnd Section");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::MissingExpectedToken);
        assert_eq!(errors[0].location.absolute, 8);
    }

    #[test]
    fn test_helper() {
        let input = "@Helper Bold(s As String)\n    @<b>@s</b>\nEnd Helper\n";
        let (root, errors) = parse(input);
        assert!(errors.is_empty(), "{errors:?}");
        let block = first_code_block(&root);
        assert_eq!(block.block_type, BlockType::Helper);
        match &block.chunk_generator {
            BlockChunkGenerator::Helper {
                signature,
                header_complete,
            } => {
                assert_eq!(signature.value, "Bold(s As String)");
                assert_eq!(signature.location.absolute, 8);
                assert!(header_complete);
            }
            other => panic!("unexpected generator {other:?}"),
        }
        let body = block
            .child_blocks()
            .find(|b| b.block_type == BlockType::Statement)
            .unwrap();
        assert!(body.child_blocks().any(|b| b.block_type == BlockType::Markup));
        assert!(
            block
                .spans()
                .any(|s| s.chunk_generator == SpanChunkGenerator::HelperFooter)
        );
        assert_eq!(root.content(), input);
    }

    #[test]
    fn test_unterminated_helper() {
        let (root, errors) = parse("@Helper Bold(s As String)\n    @<b>@s</b>\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::UnterminatedConstruct);
        assert!(errors[0].message.contains("End Helper"));
        assert_eq!(root.content(), "@Helper Bold(s As String)\n    @<b>@s</b>\n");
    }

    #[test]
    fn test_helper_without_parameters() {
        let (_, errors) = parse("@Helper Bold\nEnd Helper");
        assert_eq!(errors.first().map(|e| e.code), Some(ErrorCode::MissingExpectedToken));
        assert_eq!(errors[0].location.absolute, 12);
    }

    #[test]
    fn test_layout() {
        let (root, errors) = parse("@Layout \"~/Shared/_Layout.vbhtml\"\n");
        assert!(errors.is_empty());
        let block = first_code_block(&root);
        assert_eq!(block.block_type, BlockType::Directive);
        assert!(block.spans().any(|s| {
            s.chunk_generator
                == SpanChunkGenerator::SetLayout("\"~/Shared/_Layout.vbhtml\"".to_string())
        }));
    }

    #[test]
    fn test_session_state() {
        let (root, errors) = parse("@SessionState \"ReadOnly\"\n");
        assert!(errors.is_empty(), "{errors:?}");
        let block = first_code_block(&root);
        assert!(block.spans().any(|s| {
            s.chunk_generator
                == SpanChunkGenerator::RazorDirectiveAttribute {
                    name: "sessionstate".to_string(),
                    value: "ReadOnly".to_string(),
                }
        }));
    }

    #[test]
    fn test_session_state_without_value() {
        let (_, errors) = parse("@SessionState\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::MissingExpectedToken);
        assert_eq!(errors[0].length, "SessionState".len());
    }
}
