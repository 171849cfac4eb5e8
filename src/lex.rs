//! # Mode-aware tokenizer
//!
//! The [`Lexer`] walks the input once and classifies every byte into exactly one
//! [`Token`], so that concatenating the token spans reproduces the input. The lexer never
//! fails: a char which is not valid at its position becomes a single
//! [`TokenKind::Unknown`] token and lexing continues.
//!
//! The lexer is a state machine over a small set of modes. Outside of entries it emits
//! free text, whitespace and line comments. An `@` followed by an identifier starts an
//! entry; the brackets of the entry body, the citation key, field names and values are then
//! tracked until the closing bracket of the entry is reached.
//!
//! Inside a value, a `\` always consumes the following char, so that an escaped bracket,
//! quote or dollar never changes the mode. A `$` or `$$` opens a math run which is closed
//! only by the same number of dollars.
mod ignored;

use tracing::trace;
use unicase::UniCase;

use crate::token::{Token, TokenKind, identifier_len, is_identifier_byte, is_number};
use ignored::{at_line_start, free_text_len, line_comment_len, raw_body_len, whitespace_len};

/// Tokenize the whole input.
///
/// ```
/// use bibtex_lint::lex::tokenize;
/// use bibtex_lint::token::TokenKind;
///
/// let input = "@misc{key, year = 2024}";
/// let kinds: Vec<TokenKind> = tokenize(input).into_iter().map(|t| t.kind).collect();
/// assert_eq!(kinds[..3], [TokenKind::EntryMarker, TokenKind::EntryType, TokenKind::Delimiter]);
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// The role of an entry, decided by its case-insensitive entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryClass {
    /// A `@comment` entry.
    Comment,
    /// A `@preamble` entry.
    Preamble,
    /// A `@string` entry.
    String,
    /// Any other entry type.
    Regular,
}

impl EntryClass {
    pub fn of(entry_type: &str) -> Self {
        let uni = UniCase::new(entry_type);
        if uni == UniCase::ascii("comment") {
            Self::Comment
        } else if uni == UniCase::ascii("preamble") {
            Self::Preamble
        } else if uni == UniCase::ascii("string") {
            Self::String
        } else {
            Self::Regular
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Outside of any entry.
    Default,
    /// After `@`, expecting the entry type.
    Marker,
    /// After the entry type, expecting the opening bracket.
    Head,
    /// After the opening bracket of a regular entry, expecting the citation key.
    Key,
    /// Expecting a field name, a comma, or the closing bracket.
    Entry,
    /// After a field name, expecting `=`.
    Field,
    /// Expecting the first char of a value part.
    Value,
    /// After a complete value part.
    AfterValue,
    /// Inside a `{braced}` value.
    Braced,
    /// Inside a `"quoted"` value.
    Quoted,
    /// Inside the body of a `@comment` entry.
    Raw,
}

#[derive(Debug, Clone, Copy)]
struct MathRun {
    /// Opened by `$$` rather than `$`.
    double: bool,
    /// Curly brackets opened inside the math run.
    depth: usize,
}

/// A restartable tokenizer over a borrowed input.
///
/// Every call to [`Iterator::next`] consumes at least one byte, and a fresh lexer carries no
/// state from any previous input.
#[derive(Debug, Clone)]
pub struct Lexer<'r> {
    input: &'r str,
    pos: usize,
    mode: Mode,
    class: EntryClass,
    /// The closing bracket of the current entry.
    closing: Option<u8>,
    /// Nesting depth of the current braced value.
    depth: usize,
    math: Option<MathRun>,
}

impl<'r> Lexer<'r> {
    pub fn new(input: &'r str) -> Self {
        Self {
            input,
            pos: 0,
            mode: Mode::Default,
            class: EntryClass::Regular,
            closing: None,
            depth: 0,
            math: None,
        }
    }

    #[inline]
    fn bytes(&self) -> &'r [u8] {
        self.input.as_bytes()
    }

    #[inline]
    fn rest(&self) -> &'r [u8] {
        &self.input.as_bytes()[self.pos..]
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    /// Consume a single (possibly multi-byte) char.
    #[inline]
    fn bump_char(&mut self) {
        let width = self.input[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += width;
    }

    #[inline]
    fn bump(&mut self, len: usize, kind: TokenKind) -> TokenKind {
        self.pos += len;
        kind
    }

    fn unknown(&mut self) -> TokenKind {
        self.bump_char();
        TokenKind::Unknown
    }

    fn end_entry(&mut self) {
        self.mode = Mode::Default;
        self.class = EntryClass::Regular;
        self.closing = None;
        self.depth = 0;
        self.math = None;
    }

    /// Whitespace and comments, which are permitted between all structural tokens of an entry.
    ///
    /// A `%` is a comment only at the start of a line. Elsewhere it is a single unknown char,
    /// so that it cannot hide the closing bracket of the entry.
    fn trivia(&mut self) -> Option<TokenKind> {
        match self.rest()[0] {
            b if b.is_ascii_whitespace() => {
                Some(self.bump(whitespace_len(self.rest()), TokenKind::Whitespace))
            }
            b'%' if at_line_start(self.bytes(), self.pos) => {
                Some(self.bump(line_comment_len(self.rest()), TokenKind::Comment))
            }
            b'%' => Some(self.bump(1, TokenKind::Unknown)),
            _ => None,
        }
    }

    /// The closing bracket of the current entry.
    fn close_entry(&mut self) -> Option<TokenKind> {
        if Some(self.rest()[0]) == self.closing {
            self.pos += 1;
            self.end_entry();
            Some(TokenKind::Delimiter)
        } else {
            None
        }
    }

    /// A backslash and the char or control word which follows it.
    fn escape(&mut self) -> TokenKind {
        self.pos += 1;
        match self.peek_at(0) {
            Some(b) if b.is_ascii_alphabetic() => {
                let len = self
                    .rest()
                    .iter()
                    .position(|b| !b.is_ascii_alphabetic())
                    .unwrap_or(self.rest().len());
                self.bump(len, TokenKind::Command)
            }
            Some(_) => {
                self.bump_char();
                TokenKind::Escape
            }
            None => TokenKind::Escape,
        }
    }

    fn open_math(&mut self) -> TokenKind {
        let double = self.peek_at(1) == Some(b'$');
        self.math = Some(MathRun { double, depth: 0 });
        self.bump(if double { 2 } else { 1 }, TokenKind::MathDelimiter)
    }

    fn step(&mut self) -> TokenKind {
        loop {
            let head = self.rest()[0];

            if let Some(math) = self.math {
                match head {
                    b'\\' => return self.escape(),
                    b'$' if !math.double || self.peek_at(1) == Some(b'$') => {
                        self.math = None;
                        let len = if math.double { 2 } else { 1 };
                        return self.bump(len, TokenKind::MathDelimiter);
                    }
                    b'{' => {
                        self.math = Some(MathRun {
                            depth: math.depth + 1,
                            ..math
                        });
                        return self.bump(1, TokenKind::Math);
                    }
                    b'}' if math.depth > 0 => {
                        self.math = Some(MathRun {
                            depth: math.depth - 1,
                            ..math
                        });
                        return self.bump(1, TokenKind::Math);
                    }
                    // an unbalanced closing bracket or quote belongs to the enclosing value
                    b'}' if self.mode == Mode::Braced => {
                        self.math = None;
                        continue;
                    }
                    b'"' if self.mode == Mode::Quoted => {
                        self.math = None;
                        continue;
                    }
                    b'$' | b'}' | b'"' => return self.bump(1, TokenKind::Math),
                    _ => {
                        let len = self
                            .rest()
                            .iter()
                            .position(|b| matches!(b, b'\\' | b'$' | b'{' | b'}' | b'"'))
                            .unwrap_or(self.rest().len());
                        return self.bump(len, TokenKind::Math);
                    }
                }
            }

            match self.mode {
                Mode::Default => {
                    return match head {
                        b if b.is_ascii_whitespace() => {
                            self.bump(whitespace_len(self.rest()), TokenKind::Whitespace)
                        }
                        b'%' if at_line_start(self.bytes(), self.pos) => {
                            self.bump(line_comment_len(self.rest()), TokenKind::Comment)
                        }
                        b'@' if self.starts_entry() => {
                            self.mode = Mode::Marker;
                            self.bump(1, TokenKind::EntryMarker)
                        }
                        _ => self.bump(free_text_len(self.rest()), TokenKind::FreeText),
                    };
                }
                Mode::Marker => {
                    if let Some(kind) = self.trivia() {
                        return kind;
                    }
                    let len = identifier_len(self.rest());
                    if len == 0 {
                        self.mode = Mode::Default;
                        continue;
                    }
                    self.class = EntryClass::of(&self.input[self.pos..self.pos + len]);
                    self.mode = Mode::Head;
                    return self.bump(len, TokenKind::EntryType);
                }
                Mode::Head => {
                    if let Some(kind) = self.trivia() {
                        return kind;
                    }
                    let closing = match head {
                        b'{' => b'}',
                        b'(' => b')',
                        _ => {
                            // not an entry after all
                            self.end_entry();
                            continue;
                        }
                    };
                    self.closing = Some(closing);
                    self.mode = match self.class {
                        EntryClass::Comment => Mode::Raw,
                        EntryClass::Preamble => Mode::Value,
                        EntryClass::String => Mode::Entry,
                        EntryClass::Regular => Mode::Key,
                    };
                    return self.bump(1, TokenKind::Delimiter);
                }
                Mode::Raw => {
                    if let Some(kind) = self.close_entry() {
                        return kind;
                    }
                    let closing = self.closing.unwrap_or(b'}');
                    let len = raw_body_len(self.rest(), closing).unwrap_or(self.rest().len());
                    return self.bump(len, TokenKind::Comment);
                }
                Mode::Key => {
                    if let Some(kind) = self.trivia().or_else(|| self.close_entry()) {
                        return kind;
                    }
                    if head == b',' {
                        self.mode = Mode::Entry;
                        return self.bump(1, TokenKind::Comma);
                    }
                    let len = identifier_len(self.rest());
                    if len == 0 {
                        return self.unknown();
                    }
                    // a missing key: the first identifier is already a field name
                    let after = &self.rest()[len..];
                    if after.get(whitespace_len(after)) == Some(&b'=') {
                        self.mode = Mode::Field;
                        return self.bump(len, TokenKind::FieldName);
                    }
                    self.mode = Mode::Entry;
                    return self.bump(len, TokenKind::EntryKey);
                }
                Mode::Entry => {
                    if let Some(kind) = self.trivia().or_else(|| self.close_entry()) {
                        return kind;
                    }
                    if head == b',' {
                        return self.bump(1, TokenKind::Comma);
                    }
                    let len = identifier_len(self.rest());
                    if len == 0 {
                        return self.unknown();
                    }
                    self.mode = Mode::Field;
                    return self.bump(len, TokenKind::FieldName);
                }
                Mode::Field => {
                    if let Some(kind) = self.trivia().or_else(|| self.close_entry()) {
                        return kind;
                    }
                    return match head {
                        b'=' => {
                            self.mode = Mode::Value;
                            self.bump(1, TokenKind::Operator)
                        }
                        b',' => {
                            self.mode = Mode::Entry;
                            self.bump(1, TokenKind::Comma)
                        }
                        _ => self.unknown(),
                    };
                }
                Mode::Value => {
                    if let Some(kind) = self.trivia().or_else(|| self.close_entry()) {
                        return kind;
                    }
                    return match head {
                        b'{' => {
                            self.mode = Mode::Braced;
                            self.depth = 1;
                            self.bump(1, TokenKind::Brace)
                        }
                        b'"' => {
                            self.mode = Mode::Quoted;
                            self.bump(1, TokenKind::Quote)
                        }
                        b'#' => self.bump(1, TokenKind::Operator),
                        b',' => {
                            self.mode = Mode::Entry;
                            self.bump(1, TokenKind::Comma)
                        }
                        b if is_identifier_byte(b) => {
                            let len = identifier_len(self.rest());
                            self.mode = Mode::AfterValue;
                            if is_number(&self.input[self.pos..self.pos + len]) {
                                self.bump(len, TokenKind::Number)
                            } else {
                                self.bump(len, TokenKind::Variable)
                            }
                        }
                        _ => self.unknown(),
                    };
                }
                Mode::AfterValue => {
                    if let Some(kind) = self.trivia().or_else(|| self.close_entry()) {
                        return kind;
                    }
                    match head {
                        b'#' => {
                            self.mode = Mode::Value;
                            return self.bump(1, TokenKind::Operator);
                        }
                        b',' => {
                            self.mode = Mode::Entry;
                            return self.bump(1, TokenKind::Comma);
                        }
                        // a missing `#`: continue with the next part
                        b'{' | b'"' => {
                            self.mode = Mode::Value;
                            continue;
                        }
                        b if is_identifier_byte(b) => {
                            self.mode = Mode::Value;
                            continue;
                        }
                        _ => return self.unknown(),
                    }
                }
                Mode::Braced => {
                    return match head {
                        b'\\' => self.escape(),
                        b'$' => self.open_math(),
                        b'{' => {
                            self.depth += 1;
                            self.bump(1, TokenKind::Brace)
                        }
                        b'}' => {
                            self.depth -= 1;
                            if self.depth == 0 {
                                self.mode = Mode::AfterValue;
                            }
                            self.bump(1, TokenKind::Brace)
                        }
                        _ => {
                            let len = self
                                .rest()
                                .iter()
                                .position(|b| matches!(b, b'\\' | b'$' | b'{' | b'}'))
                                .unwrap_or(self.rest().len());
                            self.bump(len, TokenKind::Text)
                        }
                    };
                }
                Mode::Quoted => {
                    return match head {
                        b'\\' => self.escape(),
                        b'$' => self.open_math(),
                        b'"' => {
                            self.mode = Mode::AfterValue;
                            self.bump(1, TokenKind::Quote)
                        }
                        _ => {
                            let len = self
                                .rest()
                                .iter()
                                .position(|b| matches!(b, b'\\' | b'$' | b'"'))
                                .unwrap_or(self.rest().len());
                            self.bump(len, TokenKind::Text)
                        }
                    };
                }
            }
        }
    }

    /// Whether the `@` at the current position is followed by an entry type, possibly after
    /// whitespace.
    fn starts_entry(&self) -> bool {
        let after = &self.rest()[1..];
        after
            .get(whitespace_len(after))
            .is_some_and(|&b| is_identifier_byte(b) && !b.is_ascii_digit())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pos >= self.input.len() {
            if self.mode != Mode::Default {
                trace!(mode = ?self.mode, "input ended inside an entry");
                self.end_entry();
            }
            return None;
        }
        let start = self.pos;
        let kind = self.step();
        debug_assert!(self.pos > start);
        Some(Token::new(kind, start, self.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn lex(input: &str) -> Vec<(TokenKind, &str)> {
        tokenize(input)
            .into_iter()
            .map(|t| (t.kind, t.text(input)))
            .collect()
    }

    fn significant(input: &str) -> Vec<(TokenKind, &str)> {
        lex(input)
            .into_iter()
            .filter(|(kind, _)| *kind != Whitespace)
            .collect()
    }

    #[test]
    fn test_entry() {
        assert_eq!(
            significant("@article{key:0, title = {The {Title}}, year = 2024}"),
            vec![
                (EntryMarker, "@"),
                (EntryType, "article"),
                (Delimiter, "{"),
                (EntryKey, "key:0"),
                (Comma, ","),
                (FieldName, "title"),
                (Operator, "="),
                (Brace, "{"),
                (Text, "The "),
                (Brace, "{"),
                (Text, "Title"),
                (Brace, "}"),
                (Brace, "}"),
                (Comma, ","),
                (FieldName, "year"),
                (Operator, "="),
                (Number, "2024"),
                (Delimiter, "}"),
            ]
        );
    }

    #[test]
    fn test_paren_entry() {
        assert_eq!(
            significant("@book(k, note = \"a)\")"),
            vec![
                (EntryMarker, "@"),
                (EntryType, "book"),
                (Delimiter, "("),
                (EntryKey, "k"),
                (Comma, ","),
                (FieldName, "note"),
                (Operator, "="),
                (Quote, "\""),
                (Text, "a)"),
                (Quote, "\""),
                (Delimiter, ")"),
            ]
        );
    }

    #[test]
    fn test_concatenation() {
        assert_eq!(
            significant("@misc{k, title = jan # \" 1\" # {x}}"),
            vec![
                (EntryMarker, "@"),
                (EntryType, "misc"),
                (Delimiter, "{"),
                (EntryKey, "k"),
                (Comma, ","),
                (FieldName, "title"),
                (Operator, "="),
                (Variable, "jan"),
                (Operator, "#"),
                (Quote, "\""),
                (Text, " 1"),
                (Quote, "\""),
                (Operator, "#"),
                (Brace, "{"),
                (Text, "x"),
                (Brace, "}"),
                (Delimiter, "}"),
            ]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            significant("@misc{k, t = {a\\}b\\\"\\$\\emph{c}}}"),
            vec![
                (EntryMarker, "@"),
                (EntryType, "misc"),
                (Delimiter, "{"),
                (EntryKey, "k"),
                (Comma, ","),
                (FieldName, "t"),
                (Operator, "="),
                (Brace, "{"),
                (Text, "a"),
                (Escape, "\\}"),
                (Text, "b"),
                (Escape, "\\\""),
                (Escape, "\\$"),
                (Command, "\\emph"),
                (Brace, "{"),
                (Text, "c"),
                (Brace, "}"),
                (Brace, "}"),
                (Delimiter, "}"),
            ]
        );
    }

    #[test]
    fn test_math() {
        assert_eq!(
            significant("@misc{k, t = {$\\alpha_{1}$ and $$x}$$}}"),
            vec![
                (EntryMarker, "@"),
                (EntryType, "misc"),
                (Delimiter, "{"),
                (EntryKey, "k"),
                (Comma, ","),
                (FieldName, "t"),
                (Operator, "="),
                (Brace, "{"),
                (MathDelimiter, "$"),
                (Command, "\\alpha"),
                (Math, "_"),
                (Math, "{"),
                (Math, "1"),
                (Math, "}"),
                (MathDelimiter, "$"),
                (Text, " and "),
                (MathDelimiter, "$$"),
                (Math, "x"),
                // unbalanced inside the math run: closes the value
                (Brace, "}"),
                (Variable, "$$"),
                (Delimiter, "}"),
                (FreeText, "}"),
            ]
        );
    }

    #[test]
    fn test_single_dollar_in_double_math() {
        assert_eq!(
            significant("@misc{k, t = {$$a$b$$}}")[7..],
            [
                (Brace, "{"),
                (MathDelimiter, "$$"),
                (Math, "a"),
                (Math, "$"),
                (Math, "b"),
                (MathDelimiter, "$$"),
                (Brace, "}"),
                (Delimiter, "}"),
            ]
        );
    }

    #[test]
    fn test_special_entries() {
        assert_eq!(
            significant("@comment{{bal}{anced}} @preamble{\"x\"} @string(v = {y})"),
            vec![
                (EntryMarker, "@"),
                (EntryType, "comment"),
                (Delimiter, "{"),
                (Comment, "{bal}{anced}"),
                (Delimiter, "}"),
                (EntryMarker, "@"),
                (EntryType, "preamble"),
                (Delimiter, "{"),
                (Quote, "\""),
                (Text, "x"),
                (Quote, "\""),
                (Delimiter, "}"),
                (EntryMarker, "@"),
                (EntryType, "string"),
                (Delimiter, "("),
                (FieldName, "v"),
                (Operator, "="),
                (Brace, "{"),
                (Text, "y"),
                (Brace, "}"),
                (Delimiter, ")"),
            ]
        );
    }

    #[test]
    fn test_missing_key() {
        assert_eq!(
            significant("@misc{title = {x}}")[..5],
            [
                (EntryMarker, "@"),
                (EntryType, "misc"),
                (Delimiter, "{"),
                (FieldName, "title"),
                (Operator, "="),
            ]
        );
    }

    #[test]
    fn test_free_text_and_comments() {
        assert_eq!(
            lex("junk @ 2\n% line\nx % not"),
            vec![
                (FreeText, "junk "),
                (FreeText, "@ 2"),
                (Whitespace, "\n"),
                (Comment, "% line"),
                (Whitespace, "\n"),
                (FreeText, "x % not"),
            ]
        );
    }

    #[test]
    fn test_percent_inside_entry() {
        assert_eq!(
            significant("@misc{a%b, note = 50%}")[3..],
            [
                (EntryKey, "a"),
                (Unknown, "%"),
                (FieldName, "b"),
                (Comma, ","),
                (FieldName, "note"),
                (Operator, "="),
                (Number, "50"),
                (Unknown, "%"),
                (Delimiter, "}"),
            ]
        );
        assert_eq!(
            significant("@misc{k,\n  % note = {x},\n  title = {T}}")[3..7],
            [
                (EntryKey, "k"),
                (Comma, ","),
                (Comment, "% note = {x},"),
                (FieldName, "title"),
            ]
        );
    }

    #[test]
    fn test_not_an_entry() {
        assert_eq!(
            lex("@misc text"),
            vec![
                (EntryMarker, "@"),
                (EntryType, "misc"),
                (Whitespace, " "),
                (FreeText, "text"),
            ]
        );
    }

    #[test]
    fn test_unknown_chars() {
        assert_eq!(
            significant("@misc{k, = ü}")[3..],
            [
                (EntryKey, "k"),
                (Comma, ","),
                (Unknown, "="),
                (FieldName, "ü"),
                (Delimiter, "}"),
            ]
        );
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            significant("@misc{k, t = {open")[7..],
            [(Brace, "{"), (Text, "open")]
        );
        assert_eq!(
            significant("@misc{k, t = \"a\\")[7..],
            [(Quote, "\""), (Text, "a"), (Escape, "\\")]
        );
    }

    #[test]
    fn test_coverage() {
        let inputs = [
            "",
            "@",
            "@@@",
            "@article{",
            "@article{k,,,}}}}",
            "text {} $ \\ \" @ü{k, t=\"$a\"}",
            "@misc{k, t = {$x\\",
            "@comment(unclosed {)",
        ];
        for input in inputs {
            let tokens = tokenize(input);
            let rebuilt: String = tokens.iter().map(|t| t.text(input)).collect();
            assert_eq!(rebuilt, input);
            for pair in tokens.windows(2) {
                assert_eq!(pair[0].span.to, pair[1].span.from);
            }
        }
    }
}
