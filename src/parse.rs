//! # Structural parser
//!
//! Build a [`Document`] from the token stream of the [`Lexer`](crate::lex::Lexer). The lexer
//! already decides where entries, fields and value parts begin and end, so the parser only
//! groups tokens into nodes. Parsing never fails: whatever the lexer produced is accepted,
//! and an entry which is never closed extends to the end of the input.
mod balanced;

pub use balanced::brace_balance;

use tracing::{debug, trace};

use crate::lex::{EntryClass, tokenize};
use crate::model::{BlockKind, Delimiter, Document, Entry, EntryId, Field, FreeText, RawBlock};
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::value::{Concatenation, ValuePart};

/// Parse the input into a [`Document`].
///
/// ```
/// use bibtex_lint::parse::parse;
///
/// let doc = parse("% refs\n@book{knuth84, title = {The {\\TeX}book}}");
/// assert_eq!(doc.blocks().len(), 2);
/// let entry = &doc.entries()[0];
/// assert_eq!(entry.key, Some("knuth84"));
/// assert_eq!(entry.get(&doc, "TITLE").unwrap().value.to_string(), "{The {\\TeX}book}");
/// ```
pub fn parse(input: &str) -> Document<'_> {
    let tokens = tokenize(input);
    let mut doc = Parser::new(input, &tokens).parse();
    doc.set_tokens(tokens);
    debug!(
        blocks = doc.blocks().len(),
        entries = doc.entries().len(),
        "parsed document"
    );
    doc
}

/// A value part which has been opened but not yet closed.
#[derive(Debug, Clone, Copy)]
enum OpenPart {
    Braced { from: usize, depth: usize },
    Quoted { from: usize },
}

/// A field whose value is still being read.
#[derive(Debug)]
struct FieldBuilder<'r> {
    name: &'r str,
    name_span: Span,
    /// The end of the `=`, if present.
    operator: Option<usize>,
    parts: Vec<ValuePart<'r>>,
    open: Option<OpenPart>,
}

impl<'r> FieldBuilder<'r> {
    fn new(name: &'r str, name_span: Span) -> Self {
        Self {
            name,
            name_span,
            operator: None,
            parts: Vec::new(),
            open: None,
        }
    }

    /// Close an open part at `end`, which is the end of input.
    fn cut_off(&mut self, source: &'r str, end: usize) {
        match self.open.take() {
            Some(OpenPart::Braced { from, depth }) => self.parts.push(ValuePart::Braced {
                text: &source[from + 1..end],
                depth,
                span: Span::new(from, end),
            }),
            Some(OpenPart::Quoted { from }) => self.parts.push(ValuePart::Quoted {
                text: &source[from + 1..end],
                closed: false,
                span: Span::new(from, end),
            }),
            None => {}
        }
    }

    fn finish(mut self, source: &'r str, entry: EntryId, end: usize) -> Field<'r> {
        self.cut_off(source, end);
        let value = match (self.parts.first(), self.parts.last()) {
            (Some(first), Some(last)) => Concatenation {
                span: first.span().cover(last.span()),
                parts: self.parts,
            },
            _ => Concatenation::placeholder(self.operator.unwrap_or(self.name_span.to)),
        };
        let to = value
            .span
            .to
            .max(self.operator.unwrap_or(0))
            .max(self.name_span.to);
        Field {
            entry,
            name: self.name,
            name_span: self.name_span,
            value,
            span: Span::new(self.name_span.from, to),
        }
    }
}

struct Parser<'r, 't> {
    source: &'r str,
    tokens: &'t [Token],
    pos: usize,
    doc: Document<'r>,
}

impl<'r, 't> Parser<'r, 't> {
    fn new(source: &'r str, tokens: &'t [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            doc: Document::new(source),
        }
    }

    #[inline]
    fn text(&self, token: Token) -> &'r str {
        token.text(self.source)
    }

    /// The index of the next token at or after `from` which is not whitespace or a comment.
    fn skip_trivia(&self, from: usize) -> usize {
        self.tokens[from..]
            .iter()
            .position(|t| !t.kind.is_trivia())
            .map_or(self.tokens.len(), |offset| from + offset)
    }

    fn kind_at(&self, idx: usize) -> Option<TokenKind> {
        self.tokens.get(idx).map(|t| t.kind)
    }

    fn parse(mut self) -> Document<'r> {
        let mut free_from = None;

        while self.pos < self.tokens.len() {
            let token = self.tokens[self.pos];
            if token.kind == TokenKind::EntryMarker {
                if let Some(opening) = self.entry_head(self.pos) {
                    if let Some(from) = free_from.take() {
                        self.push_free_text(from, token.span.from);
                    }
                    self.entry_body(self.pos, opening);
                    continue;
                }
            }
            free_from.get_or_insert(token.span.from);
            self.pos += 1;
        }

        if let Some(from) = free_from {
            self.push_free_text(from, self.source.len());
        }
        self.doc
    }

    /// If the marker at `marker` is followed by an entry type and an opening bracket, return
    /// the index of the opening bracket.
    fn entry_head(&self, marker: usize) -> Option<usize> {
        let ty = self.skip_trivia(marker + 1);
        if self.kind_at(ty) != Some(TokenKind::EntryType) {
            return None;
        }
        let opening = self.skip_trivia(ty + 1);
        (self.kind_at(opening) == Some(TokenKind::Delimiter)).then_some(opening)
    }

    fn push_free_text(&mut self, from: usize, to: usize) {
        let text = &self.source[from..to];
        let prefix_len = text.len() - text.trim_start().len();
        self.doc.push_block(
            BlockKind::FreeText(FreeText {
                text,
                whitespace_prefix: &text[..prefix_len],
            }),
            Span::new(from, to),
        );
    }

    /// Find the closing bracket of an entry whose opening bracket is at `opening`. Returns
    /// the index of the closing bracket, or `None` if the input ends first.
    fn find_closing(&self, opening: usize) -> Option<usize> {
        self.tokens[opening + 1..]
            .iter()
            .position(|t| t.kind == TokenKind::Delimiter)
            .map(|offset| opening + 1 + offset)
    }

    fn entry_body(&mut self, marker: usize, opening: usize) {
        let source = self.source;
        let from = self.tokens[marker].span.from;
        let ty = self.tokens[self.skip_trivia(marker + 1)];
        let entry_type = self.text(ty);
        let open = self.tokens[opening];
        let delimiter =
            Delimiter::from_opening(source.as_bytes()[open.span.from]).unwrap_or(Delimiter::Brace);

        let closing = self.find_closing(opening);
        let (body_to, to) = match closing {
            Some(idx) => (self.tokens[idx].span.from, self.tokens[idx].span.to),
            None => {
                trace!(entry_type, from, "entry is not closed");
                (source.len(), source.len())
            }
        };
        let span = Span::new(from, to);
        let raw = || {
            RawBlock::new(
                entry_type,
                delimiter,
                &source[open.span.to..body_to],
                closing.is_some(),
            )
        };

        let kind = match EntryClass::of(entry_type) {
            EntryClass::Comment => Some(BlockKind::Comment(raw())),
            EntryClass::Preamble => Some(BlockKind::Preamble(raw())),
            EntryClass::String => Some(BlockKind::StringDef(raw())),
            EntryClass::Regular => None,
        };
        self.pos = closing.map_or(self.tokens.len(), |idx| idx + 1);

        if let Some(kind) = kind {
            self.doc.push_block(kind, span);
            return;
        }

        let id = self.doc.push_entry(Entry {
            block: self.doc.next_block_id(),
            entry_type,
            type_span: Span::new(from, ty.span.to),
            key: None,
            key_span: None,
            delimiter,
            fields: Vec::new(),
            span,
            closed: closing.is_some(),
        });
        self.doc.push_block(BlockKind::Entry(id), span);

        let body_end = closing.unwrap_or(self.tokens.len());
        self.fields(id, opening + 1, body_end, body_to);
    }

    /// Read the key and fields of a regular entry from the tokens in `start..end`. The body
    /// text ends at the byte offset `body_to`.
    fn fields(&mut self, id: EntryId, start: usize, end: usize, body_to: usize) {
        let mut current: Option<FieldBuilder<'r>> = None;

        for idx in start..end {
            let token = self.tokens[idx];
            match token.kind {
                TokenKind::EntryKey => {
                    let entry = self.doc.entry_mut(id);
                    entry.key = Some(token.text(self.source));
                    entry.key_span = Some(token.span);
                }
                TokenKind::FieldName => {
                    if let Some(field) = current.take() {
                        self.push_field(id, field, token.span.from);
                    }
                    current = Some(FieldBuilder::new(self.text(token), token.span));
                }
                TokenKind::Comma => {
                    if let Some(field) = current.take() {
                        self.push_field(id, field, token.span.from);
                    }
                }
                _ => {
                    if let Some(field) = current.as_mut() {
                        self.value_token(field, token);
                    }
                }
            }
        }

        if let Some(field) = current {
            self.push_field(id, field, body_to);
        }
    }

    fn push_field(&mut self, id: EntryId, field: FieldBuilder<'r>, end: usize) {
        let field = field.finish(self.source, id, end);
        let field_id = self.doc.push_field(field);
        self.doc.entry_mut(id).fields.push(field_id);
    }

    fn value_token(&self, field: &mut FieldBuilder<'r>, token: Token) {
        let source = self.source;
        match (token.kind, field.open) {
            (TokenKind::Operator, None) if self.text(token) == "=" => {
                field.operator.get_or_insert(token.span.to);
            }
            (TokenKind::Number | TokenKind::Variable, None) => {
                field.parts.push(ValuePart::Literal {
                    text: self.text(token),
                    span: token.span,
                });
            }
            (TokenKind::Brace, None) => {
                field.open = Some(OpenPart::Braced {
                    from: token.span.from,
                    depth: 1,
                });
            }
            (TokenKind::Brace, Some(OpenPart::Braced { from, depth })) => {
                let depth = if self.text(token) == "{" {
                    depth + 1
                } else {
                    depth - 1
                };
                if depth == 0 {
                    field.open = None;
                    field.parts.push(ValuePart::Braced {
                        text: &source[from + 1..token.span.from],
                        depth: 0,
                        span: Span::new(from, token.span.to),
                    });
                } else {
                    field.open = Some(OpenPart::Braced { from, depth });
                }
            }
            (TokenKind::Quote, None) => {
                field.open = Some(OpenPart::Quoted {
                    from: token.span.from,
                });
            }
            (TokenKind::Quote, Some(OpenPart::Quoted { from })) => {
                field.open = None;
                field.parts.push(ValuePart::Quoted {
                    text: &source[from + 1..token.span.from],
                    closed: true,
                    span: Span::new(from, token.span.to),
                });
            }
            _ => {}
        }
    }
}
