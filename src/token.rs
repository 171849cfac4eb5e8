//! # Lexical tokens of a bibliography.
//!
//! The [`Lexer`](crate::lex::Lexer) classifies every byte of its input into exactly one
//! [`Token`]. The table below lists the token classes in the order in which they
//! typically appear inside an entry.
//!
//! | Kind                         | Example                              |
//! |------------------------------|--------------------------------------|
//! | [`TokenKind::EntryMarker`]   | `@`                                  |
//! | [`TokenKind::EntryType`]     | `article`                            |
//! | [`TokenKind::Delimiter`]     | `{` or `(` opening the entry body    |
//! | [`TokenKind::EntryKey`]      | `knuth1984`                          |
//! | [`TokenKind::FieldName`]     | `title`                              |
//! | [`TokenKind::Operator`]      | `=` or `#`                           |
//! | [`TokenKind::Brace`]         | `{` opening a braced value           |
//! | [`TokenKind::Text`]          | `The TeXbook`                        |
//! | [`TokenKind::MathDelimiter`] | `$` or `$$`                          |
//! | [`TokenKind::Command`]       | `\alpha`                             |
//! | [`TokenKind::Comma`]         | `,`                                  |
mod types;
mod validate;

pub use types::*;
pub use validate::*;
