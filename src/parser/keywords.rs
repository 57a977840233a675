//! Keyword tables for the two code dialects.
//!
//! C-family keywords are case-sensitive; BASIC-family keywords are matched
//! ignoring ASCII case. Lookups go through static hash maps built once and
//! shared by every parse session.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

macro_rules! keyword_table {
    (
        $(#[$meta:meta])*
        $name:ident, $table:ident { $($variant:ident => $text:literal,)* }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// Canonical spelling of the keyword.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }
        }

        static $table: LazyLock<FxHashMap<&'static str, $name>> = LazyLock::new(|| {
            let mut map = FxHashMap::default();
            $(map.insert($text, $name::$variant);)*
            map
        });

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_table! {
    /// C-family reserved words.
    CSharpKeyword, CSHARP_KEYWORDS {
        Abstract => "abstract",
        As => "as",
        Await => "await",
        Base => "base",
        Bool => "bool",
        Break => "break",
        Byte => "byte",
        Case => "case",
        Catch => "catch",
        Char => "char",
        Checked => "checked",
        Class => "class",
        Const => "const",
        Continue => "continue",
        Decimal => "decimal",
        Default => "default",
        Delegate => "delegate",
        Do => "do",
        Double => "double",
        Else => "else",
        Enum => "enum",
        Event => "event",
        Explicit => "explicit",
        Extern => "extern",
        False => "false",
        Finally => "finally",
        Fixed => "fixed",
        Float => "float",
        For => "for",
        Foreach => "foreach",
        Goto => "goto",
        If => "if",
        Implicit => "implicit",
        In => "in",
        Int => "int",
        Interface => "interface",
        Internal => "internal",
        Is => "is",
        Lock => "lock",
        Long => "long",
        Namespace => "namespace",
        New => "new",
        Null => "null",
        Object => "object",
        Operator => "operator",
        Out => "out",
        Override => "override",
        Params => "params",
        Private => "private",
        Protected => "protected",
        Public => "public",
        Readonly => "readonly",
        Ref => "ref",
        Return => "return",
        Sbyte => "sbyte",
        Sealed => "sealed",
        Short => "short",
        Sizeof => "sizeof",
        Stackalloc => "stackalloc",
        Static => "static",
        String => "string",
        Struct => "struct",
        Switch => "switch",
        This => "this",
        Throw => "throw",
        True => "true",
        Try => "try",
        Typeof => "typeof",
        Uint => "uint",
        Ulong => "ulong",
        Unchecked => "unchecked",
        Unsafe => "unsafe",
        Ushort => "ushort",
        Using => "using",
        Virtual => "virtual",
        Void => "void",
        Volatile => "volatile",
        When => "when",
        While => "while",
    }
}

keyword_table! {
    /// BASIC-family reserved words, stored in lower case.
    VbKeyword, VB_KEYWORDS {
        AddHandler => "addhandler",
        AddressOf => "addressof",
        Alias => "alias",
        And => "and",
        AndAlso => "andalso",
        As => "as",
        Boolean => "boolean",
        ByRef => "byref",
        Byte => "byte",
        ByVal => "byval",
        Call => "call",
        Case => "case",
        Catch => "catch",
        CBool => "cbool",
        CByte => "cbyte",
        CChar => "cchar",
        CDate => "cdate",
        CDbl => "cdbl",
        CDec => "cdec",
        Char => "char",
        CInt => "cint",
        Class => "class",
        CLng => "clng",
        CObj => "cobj",
        Const => "const",
        Continue => "continue",
        CSByte => "csbyte",
        CShort => "cshort",
        CSng => "csng",
        CStr => "cstr",
        CType => "ctype",
        CUInt => "cuint",
        CULng => "culng",
        CUShort => "cushort",
        Date => "date",
        Decimal => "decimal",
        Declare => "declare",
        Default => "default",
        Delegate => "delegate",
        Dim => "dim",
        DirectCast => "directcast",
        Do => "do",
        Double => "double",
        Each => "each",
        Else => "else",
        ElseIf => "elseif",
        End => "end",
        EndIf => "endif",
        Enum => "enum",
        Erase => "erase",
        Error => "error",
        Event => "event",
        Exit => "exit",
        False => "false",
        Finally => "finally",
        For => "for",
        Friend => "friend",
        Function => "function",
        Get => "get",
        GetType => "gettype",
        GetXmlNamespace => "getxmlnamespace",
        Global => "global",
        GoSub => "gosub",
        GoTo => "goto",
        Handles => "handles",
        If => "if",
        Implements => "implements",
        Imports => "imports",
        In => "in",
        Inherits => "inherits",
        Integer => "integer",
        Interface => "interface",
        Is => "is",
        IsNot => "isnot",
        Let => "let",
        Lib => "lib",
        Like => "like",
        Long => "long",
        Loop => "loop",
        Me => "me",
        Mod => "mod",
        Module => "module",
        MustInherit => "mustinherit",
        MustOverride => "mustoverride",
        MyBase => "mybase",
        MyClass => "myclass",
        Namespace => "namespace",
        Narrowing => "narrowing",
        New => "new",
        Next => "next",
        Not => "not",
        Nothing => "nothing",
        NotInheritable => "notinheritable",
        NotOverridable => "notoverridable",
        Object => "object",
        Of => "of",
        On => "on",
        Operator => "operator",
        Option => "option",
        Optional => "optional",
        Or => "or",
        OrElse => "orelse",
        Overloads => "overloads",
        Overridable => "overridable",
        Overrides => "overrides",
        ParamArray => "paramarray",
        Partial => "partial",
        Private => "private",
        Property => "property",
        Protected => "protected",
        Public => "public",
        RaiseEvent => "raiseevent",
        ReadOnly => "readonly",
        ReDim => "redim",
        RemoveHandler => "removehandler",
        Resume => "resume",
        Return => "return",
        SByte => "sbyte",
        Select => "select",
        Set => "set",
        Shadows => "shadows",
        Shared => "shared",
        Short => "short",
        Single => "single",
        Static => "static",
        Step => "step",
        Stop => "stop",
        String => "string",
        Structure => "structure",
        Sub => "sub",
        SyncLock => "synclock",
        Then => "then",
        Throw => "throw",
        To => "to",
        True => "true",
        Try => "try",
        TryCast => "trycast",
        TypeOf => "typeof",
        UInteger => "uinteger",
        ULong => "ulong",
        UShort => "ushort",
        Using => "using",
        Variant => "variant",
        Wend => "wend",
        When => "when",
        While => "while",
        Widening => "widening",
        With => "with",
        WithEvents => "withevents",
        WriteOnly => "writeonly",
        Xor => "xor",
    }
}

impl CSharpKeyword {
    pub fn lookup(text: &str) -> Option<Self> {
        CSHARP_KEYWORDS.get(text).copied()
    }
}

impl VbKeyword {
    pub fn lookup(text: &str) -> Option<Self> {
        if text.bytes().any(|b| b.is_ascii_uppercase()) {
            VB_KEYWORDS.get(text.to_ascii_lowercase().as_str()).copied()
        } else {
            VB_KEYWORDS.get(text).copied()
        }
    }
}

/// A keyword of either code dialect, attached to `KEYWORD` symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    CSharp(CSharpKeyword),
    Vb(VbKeyword),
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::CSharp(k) => k.as_str(),
            Keyword::Vb(k) => k.as_str(),
        }
    }
}

impl From<CSharpKeyword> for Keyword {
    fn from(keyword: CSharpKeyword) -> Self {
        Keyword::CSharp(keyword)
    }
}

impl From<VbKeyword> for Keyword {
    fn from(keyword: VbKeyword) -> Self {
        Keyword::Vb(keyword)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
