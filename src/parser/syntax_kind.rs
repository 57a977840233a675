//! Symbol kinds for the markup, C-family and BASIC-family tokenizers.
//!
//! One enum covers all three dialects. Punctuation that means the same
//! thing everywhere (`<`, `=`, `[`, ...) shares a kind; dialect-only kinds
//! are grouped by section below.

/// All symbol kinds produced by the tokenizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // SHARED
    // =========================================================================
    /// Unrecognised input, also the kind of synthesized marker symbols
    UNKNOWN = 0,
    WHITESPACE,
    NEWLINE,
    /// `@`
    TRANSITION,
    /// The `@` that opens or closes a `@* ... *@` comment
    RAZOR_COMMENT_TRANSITION,
    /// The `*` next to a razor comment transition
    RAZOR_COMMENT_STAR,
    /// Body of a razor comment
    RAZOR_COMMENT,

    // =========================================================================
    // SHARED PUNCTUATION
    // =========================================================================
    L_ANGLE,   // <
    R_ANGLE,   // >
    BANG,      // !
    SLASH,     // /
    QUESTION,  // ?
    L_BRACKET, // [
    R_BRACKET, // ]
    EQ,        // =
    COLON,     // :

    // =========================================================================
    // MARKUP ONLY
    // =========================================================================
    TEXT,
    DOUBLE_HYPHEN, // --
    DOUBLE_QUOTE,  // "
    SINGLE_QUOTE,  // '

    // =========================================================================
    // CODE: WORDS AND LITERALS
    // =========================================================================
    IDENT,
    KEYWORD,
    INTEGER_LITERAL,
    REAL_LITERAL,
    CHAR_LITERAL,
    STRING_LITERAL,
    /// BASIC-family `#1/1/2000#`
    DATE_LITERAL,
    /// `// ...`, `/* ... */` or `' ...`
    COMMENT,

    // =========================================================================
    // CODE: PUNCTUATION
    // =========================================================================
    L_PAREN,          // (
    R_PAREN,          // )
    L_BRACE,          // {
    R_BRACE,          // }
    DOT,              // .
    COMMA,            // ,
    SEMICOLON,        // ;
    COLON_COLON,      // ::
    HASH,             // #
    PLUS,             // +
    PLUS_PLUS,        // ++
    PLUS_EQ,          // +=
    MINUS,            // -
    MINUS_MINUS,      // --
    MINUS_EQ,         // -=
    ARROW,            // ->
    FAT_ARROW,        // =>
    STAR,             // *
    STAR_EQ,          // *=
    SLASH_EQ,         // /=
    PERCENT,          // %
    PERCENT_EQ,       // %=
    AMP,              // &
    AMP_AMP,          // &&
    AMP_EQ,           // &=
    PIPE,             // |
    PIPE_PIPE,        // ||
    PIPE_EQ,          // |=
    CARET,            // ^
    CARET_EQ,         // ^=
    TILDE,            // ~
    NEQ,              // !=  (<> in BASIC)
    EQ_EQ,            // ==
    LT_EQ,            // <=
    GT_EQ,            // >=
    SHL,              // <<
    SHL_EQ,           // <<=
    SHR,              // >>
    SHR_EQ,           // >>=
    QUESTION_QUESTION, // ??
    BACKSLASH,        // \  (BASIC integer division)
    DOLLAR,           // $
    /// BASIC-family ` _` at end of line
    LINE_CONTINUATION,
}

impl SyntaxKind {
    pub fn is_whitespace(self) -> bool {
        self == Self::WHITESPACE
    }

    pub fn is_newline(self) -> bool {
        self == Self::NEWLINE
    }

    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::COMMENT)
    }

    /// Any of the three razor comment parts
    pub fn is_razor_comment(self) -> bool {
        matches!(
            self,
            Self::RAZOR_COMMENT_TRANSITION | Self::RAZOR_COMMENT_STAR | Self::RAZOR_COMMENT
        )
    }
}

/// Convert a SyntaxKind to a user-friendly display name
pub fn kind_to_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::UNKNOWN => "unknown character",
        SyntaxKind::WHITESPACE => "whitespace",
        SyntaxKind::NEWLINE => "line break",
        SyntaxKind::TRANSITION => "'@'",
        SyntaxKind::RAZOR_COMMENT_TRANSITION => "'@'",
        SyntaxKind::RAZOR_COMMENT_STAR => "'*'",
        SyntaxKind::RAZOR_COMMENT => "comment",
        SyntaxKind::L_ANGLE => "'<'",
        SyntaxKind::R_ANGLE => "'>'",
        SyntaxKind::BANG => "'!'",
        SyntaxKind::SLASH => "'/'",
        SyntaxKind::QUESTION => "'?'",
        SyntaxKind::L_BRACKET => "'['",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::EQ => "'='",
        SyntaxKind::COLON => "':'",
        SyntaxKind::TEXT => "text",
        SyntaxKind::DOUBLE_HYPHEN => "'--'",
        SyntaxKind::DOUBLE_QUOTE => "'\"'",
        SyntaxKind::SINGLE_QUOTE => "'''",
        SyntaxKind::IDENT => "identifier",
        SyntaxKind::KEYWORD => "keyword",
        SyntaxKind::INTEGER_LITERAL => "integer",
        SyntaxKind::REAL_LITERAL => "number",
        SyntaxKind::CHAR_LITERAL => "character literal",
        SyntaxKind::STRING_LITERAL => "string",
        SyntaxKind::DATE_LITERAL => "date literal",
        SyntaxKind::COMMENT => "comment",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::DOT => "'.'",
        SyntaxKind::COMMA => "','",
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::COLON_COLON => "'::'",
        SyntaxKind::LINE_CONTINUATION => "'_'",
        _ => "operator",
    }
}
