//! Diagnostic message texts.

pub(crate) fn expected_end_of_block_before_eof(block: &str, close: &str, open: &str) -> String {
    format!(
        "The {block} block is missing a closing \"{close}\" character. Make sure you have a \
         matching \"{close}\" character for all the \"{open}\" characters within this block, \
         and that none of the \"{close}\" characters are being interpreted as markup."
    )
}

pub(crate) fn expected_close_bracket_before_eof(open: &str, close: &str) -> String {
    format!("An opening \"{open}\" is missing the corresponding closing \"{close}\".")
}

pub(crate) fn block_not_terminated(block: &str, terminator: &str) -> String {
    format!(
        "The \"{block}\" block was not terminated. All \"{block}\" statements must be \
         terminated with a matching \"{terminator}\"."
    )
}

pub(crate) fn whitespace_at_start_of_code_block() -> String {
    "A space or line break was encountered after the \"@\" character. Only valid identifiers, \
     keywords, comments, \"(\" and \"{\" are valid at the start of a code block and they must \
     occur immediately following \"@\" with no space in between."
        .to_string()
}

pub(crate) fn end_of_file_at_start_of_code_block() -> String {
    "End-of-file was found after the \"@\" character. \"@\" must be followed by a valid code \
     block. If you want to output an \"@\", escape it using the sequence: \"@@\""
        .to_string()
}

pub(crate) fn unexpected_character_at_start_of_code_block(found: &str) -> String {
    format!(
        "\"{found}\" is not valid at the start of a code block. Only identifiers, keywords, \
         comments, \"(\" and \"{{\" are valid."
    )
}

pub(crate) fn reserved_word(word: &str) -> String {
    format!(
        "\"{word}\" is a reserved word and cannot be used in implicit expressions. An explicit \
         expression (\"@()\") must be used."
    )
}

pub(crate) fn nested_sections(example: &str) -> String {
    format!(
        "Section blocks (\"{example}\") cannot be nested. Only one level of section blocks \
         are allowed."
    )
}

pub(crate) fn missing_open_brace_after_section(name: &str) -> String {
    format!("Expected a \"{{\" to follow the \"{name}\" section name.")
}

pub(crate) fn unexpected_character_at_section_name_start(found: &str) -> String {
    format!(
        "Unexpected {found} after section keyword. Section names must start with an \"_\" or \
         alphabetic character, and the remaining characters must be either \"_\" or \
         alphanumeric."
    )
}

pub(crate) fn nested_helpers() -> String {
    "Helper blocks cannot be nested within each other.".to_string()
}

pub(crate) fn unexpected_character_at_helper_name_start(found: &str) -> String {
    format!(
        "Unexpected {found} after helper keyword. All helpers must have a name which starts \
         with an \"_\" or alphabetic character. The remaining characters must be either \"_\" \
         or alphanumeric."
    )
}

pub(crate) fn missing_char_after_helper_name(expected: &str) -> String {
    format!("Expected a \"{expected}\" after the helper name.")
}

pub(crate) fn unterminated_helper_parameter_list() -> String {
    "Helper parameter list is missing a closing \")\".".to_string()
}

pub(crate) fn missing_char_after_helper_parameters(expected: &str) -> String {
    format!("Expected a \"{expected}\" after the helper parameters.")
}

pub(crate) fn inherits_requires_type_name(keyword: &str) -> String {
    format!("The '{keyword}' keyword must be followed by a type name on the same line.")
}

pub(crate) fn directive_requires_value(keyword: &str) -> String {
    format!("The '{keyword}' directive must be followed by a value on the same line.")
}

pub(crate) fn single_line_control_flow(expected: &str, found: &str) -> String {
    format!(
        "Expected a \"{expected}\" but found a \"{found}\". Block statements must be enclosed \
         in \"{{\" and \"}}\". You cannot use single-statement control-flow statements in \
         templates."
    )
}

pub(crate) fn at_in_code_must_be_followed() -> String {
    "The \"@\" character must be followed by a \":\", \"(\", or an identifier. If you intended \
     to switch to markup, use an HTML start tag, for example \"@if(isLoggedIn) { <p>Hello, \
     @user!</p> }\""
        .to_string()
}

pub(crate) fn unexpected_nested_code_block() -> String {
    "Unexpected \"{\" after \"@\" character. Once inside the body of a code block (@if {}, \
     @{}, etc.) you do not need to use \"@{\" to switch to code."
        .to_string()
}

pub(crate) fn nested_inline_markup() -> String {
    "Inline markup blocks (@<p>Content</p>) cannot be nested. Only one level of inline markup \
     is allowed."
        .to_string()
}

pub(crate) fn import_within_code_block() -> String {
    "Namespace imports and type aliases cannot be placed within code blocks. They must \
     immediately follow an \"@\" character in markup."
        .to_string()
}

pub(crate) fn razor_comment_not_terminated() -> String {
    "Razor comment is not terminated. All Razor comments must be terminated with a \"*@\"."
        .to_string()
}

pub(crate) fn markup_block_must_start_with_tag() -> String {
    "Markup in a code block must start with a tag and all start tags must be matched with end \
     tags. Do not use unclosed tags like \"<br>\". Instead use self-closing tags like \"<br/>\"."
        .to_string()
}

pub(crate) fn missing_end_tag(tag: &str) -> String {
    format!(
        "The \"{tag}\" element was not closed. All elements must be either self-closing or \
         have a matching end tag."
    )
}

pub(crate) fn unexpected_end_tag(tag: &str) -> String {
    format!(
        "Encountered end tag \"{tag}\" with no matching start tag. Are your start/end tags \
         properly balanced?"
    )
}

pub(crate) fn unfinished_tag(tag: &str) -> String {
    format!(
        "End of file or an unexpected character was reached before the \"{tag}\" tag could be \
         parsed. Elements inside markup blocks must be complete. They must either be \
         self-closing (\"<br />\") or have matching end tags (\"<p>Hello</p>\")."
    )
}

pub(crate) fn outer_tag_missing_name() -> String {
    "Outer tag is missing a name. The first character of a markup block must be an HTML tag \
     with a valid name."
        .to_string()
}

pub(crate) fn incomplete_quotes_around_directive(keyword: &str) -> String {
    format!("Optional quote around the directive \"{keyword}\" is missing the corresponding opening or closing quote.")
}

pub(crate) fn text_tag_cannot_contain_attributes() -> String {
    "\"<text>\" and \"</text>\" tags cannot contain attributes.".to_string()
}

pub(crate) fn expected_x(expected: &str) -> String {
    format!("Expected \"{expected}\".")
}

pub(crate) fn namespace_or_type_alias_expected() -> String {
    "Expected a namespace or type alias after \"Imports\".".to_string()
}

pub(crate) fn unknown_option(option: &str) -> String {
    format!("Unknown option: \"{option}\".")
}

pub(crate) fn invalid_option_value(option: &str, value: &str) -> String {
    format!("Invalid value \"{value}\" for option \"{option}\". Expected \"On\" or \"Off\".")
}

pub(crate) fn expected_option_name(found: &str) -> String {
    format!("Expected an option name after \"Option\" but found {found}.")
}

pub(crate) fn unterminated_string_literal() -> String {
    "Unterminated string literal. Strings that start with a quotation mark (\") must be \
     terminated before the end of the line."
        .to_string()
}

pub(crate) fn unterminated_char_literal() -> String {
    "Unterminated character literal.".to_string()
}

pub(crate) fn unterminated_block_comment() -> String {
    "End of file was reached before the end of the block comment. All comments started with \
     \"/*\" sequence must be terminated with a matching \"*/\" sequence."
        .to_string()
}

/// Describes the symbol that was found where something else was expected.
pub(crate) fn component_character(content: &str) -> String {
    format!("\"{content}\" character")
}

pub(crate) fn component_whitespace() -> String {
    "whitespace".to_string()
}

pub(crate) fn component_newline() -> String {
    "line break".to_string()
}

pub(crate) fn component_end_of_file() -> String {
    "end of file".to_string()
}
