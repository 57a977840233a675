//! Directives: identifiers with their own production after a transition.

use super::{
    BlockInfo, CSharpParser, complete, complete_block, section_block, set_auto_complete_on_child,
    statements,
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

const SECTION_EXAMPLE: &str = "@section Header { ... }";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Directive {
    Inherits,
    Functions,
    Section,
    Helper,
    Layout,
    SessionState,
}

impl Directive {
    pub const ALL: &'static [Directive] = &[
        Self::Inherits,
        Self::Functions,
        Self::Section,
        Self::Helper,
        Self::Layout,
        Self::SessionState,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inherits => "inherits",
            Self::Functions => "functions",
            Self::Section => "section",
            Self::Helper => "helper",
            Self::Layout => "layout",
            Self::SessionState => "sessionstate",
        }
    }

    /// Directive names are case-sensitive.
    pub fn lookup(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == text)
    }
}

pub(super) fn parse_directive(p: &mut CSharpParser<'_>, directive: Directive) -> ParseResult {
    match directive {
        Directive::Inherits => inherits_directive(p),
        Directive::Functions => functions_directive(p),
        Directive::Section => section_directive(p),
        Directive::Helper => helper_directive(p),
        Directive::Layout => layout_directive(p),
        Directive::SessionState => session_state_directive(p),
    }
}

// =============================================================================
// section
// =============================================================================

/// `section Name { markup }`
fn section_directive(p: &mut CSharpParser<'_>) -> ParseResult {
    let nested = p.context().is_within(BlockType::Section);
    let mut error_reported = false;
    p.set_block_type(BlockType::Section)?;

    let start = p.current_location();
    p.accept_and_move_next();
    if nested {
        let length = p.cursor().span.content().len();
        p.on_error(
            start,
            messages::nested_sections(SECTION_EXAMPLE),
            length,
            ErrorCode::NestedConstructNotAllowed,
        );
        error_reported = true;
    }

    let whitespace = p.read_while(spacing(true, false));
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
        error_reported = true;
        p.put_current_back();
        p.put_back_all(whitespace);
        p.accept_while(spacing(false, false));
    }
    p.set_block_generator(BlockChunkGenerator::Section(name.clone()))?;

    let error_location = p.current_location();
    let whitespace = p.read_while(spacing(true, false));
    if !p.at(SyntaxKind::L_BRACE) {
        if !error_reported {
            p.on_error(
                error_location,
                messages::missing_open_brace_after_section(&name),
                1,
                ErrorCode::MissingExpectedToken,
            );
        }
        p.put_current_back();
        p.put_back_all(whitespace);
        p.accept_while(spacing(false, false));
        p.optional(SyntaxKind::NEWLINE);
        p.output(SpanKind::MetaCode)?;
        return complete(p);
    }
    p.accept_symbols(whitespace);

    // The `{` stays current: the markup parser starts right after it.
    let brace_location = p.current_location();
    if let Some(brace) = p.current().cloned() {
        p.accept(brace);
    }
    p.cursor_mut().span.edit_handler = EditHandler::auto_complete(true);
    let header_index = p.context().current_block()?.children.len();
    p.output(SpanKind::MetaCode)?;

    section_block(
        p,
        SectionEnd::Nesting {
            open: "{",
            close: "}",
        },
        true,
    )?;

    p.set_generator(SpanChunkGenerator::None);
    if p.optional(SyntaxKind::R_BRACE) {
        p.set_accepted(AcceptedCharacters::NONE);
    } else {
        set_auto_complete_on_child(p, header_index, "}")?;
        let (close, open) = (
            p.language().sample(SyntaxKind::R_BRACE),
            p.language().sample(SyntaxKind::L_BRACE),
        );
        p.on_error(
            brace_location,
            messages::expected_end_of_block_before_eof(Directive::Section.as_str(), close, open),
            1,
            ErrorCode::UnterminatedConstruct,
        );
    }
    complete_block(p, false, true)?;
    p.output(SpanKind::MetaCode)
}

// =============================================================================
// functions
// =============================================================================

/// `functions { class members }`
fn functions_directive(p: &mut CSharpParser<'_>) -> ParseResult {
    p.set_block_type(BlockType::Functions)?;
    let block = p.current_block_info();
    p.accept_and_move_next();
    p.accept_while(spacing(true, false));

    if !p.at(SyntaxKind::L_BRACE) {
        let location = p.current_location();
        let brace = p.language().sample(SyntaxKind::L_BRACE);
        p.on_error(
            location,
            messages::expected_x(brace),
            1,
            ErrorCode::MissingExpectedToken,
        );
        complete(p)?;
        return p.output(SpanKind::MetaCode);
    }
    p.set_accepted(AcceptedCharacters::NONE);

    let block_start = p.current_location();
    p.accept_and_move_next();
    p.output(SpanKind::MetaCode)?;

    p.cursor_mut().span.edit_handler = EditHandler::auto_complete(false);
    p.balance_with(
        BalancingModes::NO_ERROR_ON_FAILURE,
        SyntaxKind::L_BRACE,
        SyntaxKind::R_BRACE,
        block_start,
    )?;
    p.set_generator(SpanChunkGenerator::TypeMember);

    if !p.at(SyntaxKind::R_BRACE) {
        p.cursor_mut().span.edit_handler.set_auto_complete_string("}");
        p.on_error(
            block_start,
            messages::expected_end_of_block_before_eof(&block.name, "}", "{"),
            1,
            ErrorCode::UnterminatedConstruct,
        );
        complete(p)?;
        return p.output(SpanKind::Code);
    }

    p.output(SpanKind::Code)?;
    p.set_delimiter();
    p.accept_and_move_next();
    complete(p)?;
    p.output(SpanKind::MetaCode)
}

// =============================================================================
// inherits
// =============================================================================

fn inherits_directive(p: &mut CSharpParser<'_>) -> ParseResult {
    p.accept_and_move_next();
    let error = messages::inherits_requires_type_name(Directive::Inherits.as_str());
    base_type_directive(p, error, SpanChunkGenerator::SetBaseType)
}

/// A type name running to the end of the line.
fn base_type_directive(
    p: &mut CSharpParser<'_>,
    no_type_name_error: String,
    generator: impl FnOnce(String) -> SpanChunkGenerator,
) -> ParseResult {
    let keyword_start = p.cursor().span.start;
    let keyword_length = p.cursor().span.content().len();
    p.set_block_type(BlockType::Directive)?;

    let remaining_whitespace = p.accept_single_whitespace_character();
    p.output(SpanKind::MetaCode)?;
    if let Some(whitespace) = remaining_whitespace {
        p.accept(whitespace);
    }
    p.accept_while(spacing(false, true));

    if p.eof() || p.at_whitespace() || p.at_newline() {
        p.on_error(
            keyword_start,
            no_type_name_error,
            keyword_length,
            ErrorCode::MissingExpectedToken,
        );
    }

    p.accept_until(&[SyntaxKind::NEWLINE]);
    if !p.context().design_time {
        // The newline belongs to the directive, except for editors.
        p.optional(SyntaxKind::NEWLINE);
    }

    let base_type = p.cursor().span.content();
    p.set_generator(generator(base_type.trim().to_string()));
    complete(p)?;
    p.output_with(SpanKind::Code, AcceptedCharacters::ANY_EXCEPT_NEWLINE)
}

// =============================================================================
// helper
// =============================================================================

/// `helper Name(params) { body }`
fn helper_directive(p: &mut CSharpParser<'_>) -> ParseResult {
    let nested = p.context().is_within(BlockType::Helper);
    p.set_block_type(BlockType::Helper)?;

    let block = p.current_block_info();
    p.accept_and_move_next();
    if nested {
        let location = p.current_location();
        p.on_error(
            location,
            messages::nested_helpers(),
            1,
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
    p.accept_while(spacing(false, true));

    let mut error_reported = !p.required(
        SyntaxKind::IDENT,
        true,
        messages::unexpected_character_at_helper_name_start,
    );
    if !error_reported {
        p.accept_and_move_next();
    }
    p.accept_while(spacing(false, true));

    let paren_location = p.current_location();
    if p.optional(SyntaxKind::L_PAREN) {
        let complete = p.balance_with(
            BalancingModes::NO_ERROR_ON_FAILURE,
            SyntaxKind::L_PAREN,
            SyntaxKind::R_PAREN,
            paren_location,
        )?;
        if !complete {
            error_reported = true;
            p.on_error(
                paren_location,
                messages::unterminated_helper_parameter_list(),
                1,
                ErrorCode::UnterminatedConstruct,
            );
        }
        p.optional(SyntaxKind::R_PAREN);
    } else if !error_reported {
        error_reported = true;
        let paren = p.language().sample(SyntaxKind::L_PAREN);
        p.on_error(
            paren_location,
            messages::missing_char_after_helper_name(paren),
            1,
            ErrorCode::MissingExpectedToken,
        );
    }

    let bookmark = p.current_location().absolute;
    let whitespace = p.read_while(spacing(true, true));
    let brace_location = p.current_location();
    let header_complete = p.at(SyntaxKind::L_BRACE);
    if header_complete {
        p.accept_symbols(whitespace);
        p.accept_and_move_next();
    } else {
        p.seek(bookmark);
        p.next_token();
        p.accept_while(spacing(false, true));
        if !error_reported {
            let brace = p.language().sample(SyntaxKind::L_BRACE);
            p.on_error(
                brace_location,
                messages::missing_char_after_helper_parameters(brace),
                1,
                ErrorCode::MissingExpectedToken,
            );
        }
    }

    p.add_marker_symbol_if_necessary();
    let signature = LocationTagged::new(p.cursor().span.content(), p.cursor().span.start);
    p.set_block_generator(BlockChunkGenerator::Helper {
        signature,
        header_complete,
    })?;
    p.set_generator(SpanChunkGenerator::None);

    if !header_complete {
        complete(p)?;
        return p.output(SpanKind::Code);
    }
    p.set_accepted(AcceptedCharacters::NONE);
    p.output(SpanKind::Code)?;

    helper_body(p, &block)?;
    p.initialize_span();
    p.ensure_current();

    if p.optional(SyntaxKind::R_BRACE) {
        p.set_generator(SpanChunkGenerator::HelperFooter);
        p.set_accepted(AcceptedCharacters::NONE);
    } else {
        p.set_generator(SpanChunkGenerator::None);
    }
    complete(p)?;
    p.output(SpanKind::Code)
}

/// The statements of a helper, as a child statement block.
fn helper_body(p: &mut CSharpParser<'_>, block: &BlockInfo) -> ParseResult {
    p.with_span_config(Some(SpanConfig::statement()), |p| {
        p.with_block(Some(BlockType::Statement), |p| {
            p.cursor_mut().span.edit_handler = EditHandler::auto_complete(false);
            statements::code_block(p, false, block)?;
            if !p.at(SyntaxKind::R_BRACE) {
                let handler = &mut p.cursor_mut().span.edit_handler;
                handler.set_auto_complete_string("}");
                handler.accepted_characters = AcceptedCharacters::ANY;
            }
            complete(p)?;
            p.output(SpanKind::Code)
        })
    })
}

// =============================================================================
// layout and sessionstate
// =============================================================================

/// `layout path`: the rest of the line names the layout page.
fn layout_directive(p: &mut CSharpParser<'_>) -> ParseResult {
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

/// `sessionstate value`, the value optionally quoted.
fn session_state_directive(p: &mut CSharpParser<'_>) -> ParseResult {
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
        name: keyword.to_string(),
        value,
    });
    complete(p)?;
    p.output_with(SpanKind::Code, AcceptedCharacters::ANY_EXCEPT_NEWLINE)
}
