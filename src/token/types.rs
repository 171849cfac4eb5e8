use serde::Serialize;
use std::fmt;

use crate::span::Span;

/// The classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// The `@` starting an entry.
    EntryMarker,
    /// The entry type following `@`, such as `article` or `string`.
    EntryType,
    /// The citation key of a regular entry.
    EntryKey,
    /// A field name, or the variable name of a `@string` definition.
    FieldName,
    /// `=` between a field name and its value, or `#` between value parts.
    Operator,
    /// `,` separating the key and the fields.
    Comma,
    /// A bracket `{`, `}`, `(` or `)` opening or closing an entry body.
    Delimiter,
    /// A curly bracket inside a value which changes the nesting depth.
    Brace,
    /// A `"` opening or closing a quoted value.
    Quote,
    /// Plain text inside a braced or quoted value.
    Text,
    /// A run of ASCII digits used as a value.
    Number,
    /// An unquoted identifier used as a value, usually a `@string` macro reference.
    Variable,
    /// `$` or `$$` opening or closing a math run.
    MathDelimiter,
    /// Text or symbols inside a math run.
    Math,
    /// A LaTeX control word such as `\emph`.
    Command,
    /// A backslash followed by a single non-letter char, such as `\{`.
    Escape,
    /// A `%` line comment, or the body of a `@comment` entry.
    Comment,
    /// A run of ASCII whitespace.
    Whitespace,
    /// Text outside of any entry.
    FreeText,
    /// A char which is not valid at its position.
    Unknown,
}

impl TokenKind {
    /// Whether the token carries no structural meaning for the parser.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment | Self::Unknown)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A classified span of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, from: usize, to: usize) -> Self {
        Self {
            kind,
            span: Span::new(from, to),
        }
    }

    /// The text of the token.
    #[inline]
    pub fn text<'r>(&self, source: &'r str) -> &'r str {
        self.span.slice(source)
    }
}
