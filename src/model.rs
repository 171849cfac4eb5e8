//! # Document model
//!
//! A [`Document`] is an arena which owns every node produced by a parse. Nodes refer to
//! each other by index: a [`Block`] of kind [`BlockKind::Entry`] holds the [`EntryId`] of
//! its entry, an [`Entry`] holds the [`FieldId`]s of its fields, and both entries and
//! fields store the index of their parent for navigation.
//!
//! A document is never mutated after construction. Parse the text again to obtain a new
//! document.
use serde::Serialize;
use unicase::UniCase;

use crate::span::Span;
use crate::token::Token;
use crate::value::Concatenation;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub(crate) usize);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_id!(
    /// The index of a [`Block`] in its [`Document`].
    BlockId
);
arena_id!(
    /// The index of an [`Entry`] in its [`Document`].
    EntryId
);
arena_id!(
    /// The index of a [`Field`] in its [`Document`].
    FieldId
);

/// The bracket pair enclosing the body of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Delimiter {
    Brace,
    Paren,
}

impl Delimiter {
    pub fn from_opening(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Self::Brace),
            b'(' => Some(Self::Paren),
            _ => None,
        }
    }

    pub fn opening(self) -> char {
        match self {
            Self::Brace => '{',
            Self::Paren => '(',
        }
    }

    pub fn closing(self) -> char {
        match self {
            Self::Brace => '}',
            Self::Paren => ')',
        }
    }
}

/// Text between entries, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeText<'r> {
    pub text: &'r str,
    /// The leading whitespace of `text`.
    pub whitespace_prefix: &'r str,
}

/// The body of a `@comment`, `@preamble` or `@string` entry, kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock<'r> {
    /// The entry type as written, such as `Comment` or `string`.
    pub marker: &'r str,
    pub delimiter: Delimiter,
    /// Everything between the brackets.
    pub raw: &'r str,
    /// The net count of `{` minus `}` in `raw`.
    pub braces: isize,
    /// The net count of `(` minus `)` in `raw`.
    pub parens: isize,
    pub closed: bool,
}

impl<'r> RawBlock<'r> {
    pub(crate) fn new(marker: &'r str, delimiter: Delimiter, raw: &'r str, closed: bool) -> Self {
        let (mut braces, mut parens) = (0, 0);
        for b in raw.bytes() {
            match b {
                b'{' => braces += 1,
                b'}' => braces -= 1,
                b'(' => parens += 1,
                b')' => parens -= 1,
                _ => {}
            }
        }
        Self {
            marker,
            delimiter,
            raw,
            braces,
            parens,
            closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum BlockKind<'r> {
    FreeText(FreeText<'r>),
    Comment(RawBlock<'r>),
    Preamble(RawBlock<'r>),
    StringDef(RawBlock<'r>),
    Entry(EntryId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block<'r> {
    pub kind: BlockKind<'r>,
    pub span: Span,
}

impl<'r> Block<'r> {
    /// The raw body, for the special entries.
    pub fn raw(&self) -> Option<&RawBlock<'r>> {
        match &self.kind {
            BlockKind::Comment(raw) | BlockKind::Preamble(raw) | BlockKind::StringDef(raw) => {
                Some(raw)
            }
            BlockKind::FreeText(_) | BlockKind::Entry(_) => None,
        }
    }
}

/// A regular entry such as `@article{key, title = {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry<'r> {
    pub block: BlockId,
    /// The entry type as written, without the `@`.
    pub entry_type: &'r str,
    /// From the `@` to the end of the entry type.
    pub type_span: Span,
    pub key: Option<&'r str>,
    pub key_span: Option<Span>,
    pub delimiter: Delimiter,
    pub fields: Vec<FieldId>,
    pub span: Span,
    /// Whether the closing bracket was found before the end of input.
    pub closed: bool,
}

impl<'r> Entry<'r> {
    /// The first field with the given name, compared case-insensitively.
    pub fn get<'d>(&self, doc: &'d Document<'r>, name: &str) -> Option<&'d Field<'r>> {
        let name = UniCase::new(name);
        self.fields
            .iter()
            .map(|&id| doc.field(id))
            .find(|field| UniCase::new(field.name) == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field<'r> {
    pub entry: EntryId,
    pub name: &'r str,
    pub name_span: Span,
    pub value: Concatenation<'r>,
    /// From the start of the name to the end of the value.
    pub span: Span,
}

/// The result of a parse. See the [module documentation](self).
#[derive(Debug, Clone, Serialize)]
pub struct Document<'r> {
    #[serde(skip)]
    source: &'r str,
    #[serde(skip)]
    tokens: Vec<Token>,
    blocks: Vec<Block<'r>>,
    entries: Vec<Entry<'r>>,
    fields: Vec<Field<'r>>,
}

impl<'r> Document<'r> {
    pub(crate) fn new(source: &'r str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            blocks: Vec::new(),
            entries: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub(crate) fn set_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
    }

    /// The id the next pushed block will receive.
    pub(crate) fn next_block_id(&self) -> BlockId {
        BlockId(self.blocks.len())
    }

    pub(crate) fn push_block(&mut self, kind: BlockKind<'r>, span: Span) -> BlockId {
        self.blocks.push(Block { kind, span });
        BlockId(self.blocks.len() - 1)
    }

    pub(crate) fn push_entry(&mut self, entry: Entry<'r>) -> EntryId {
        self.entries.push(entry);
        EntryId(self.entries.len() - 1)
    }

    pub(crate) fn push_field(&mut self, field: Field<'r>) -> FieldId {
        self.fields.push(field);
        FieldId(self.fields.len() - 1)
    }

    pub(crate) fn entry_mut(&mut self, id: EntryId) -> &mut Entry<'r> {
        &mut self.entries[id.0]
    }

    /// The text this document was parsed from.
    pub fn source(&self) -> &'r str {
        self.source
    }

    /// The token stream of [`Document::source`].
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// All blocks, in document order. Their spans tile the source.
    pub fn blocks(&self) -> &[Block<'r>] {
        &self.blocks
    }

    /// All regular entries, in document order.
    pub fn entries(&self) -> &[Entry<'r>] {
        &self.entries
    }

    pub fn entry_ids(&self) -> impl Iterator<Item = EntryId> {
        (0..self.entries.len()).map(EntryId)
    }

    pub fn block(&self, id: BlockId) -> &Block<'r> {
        &self.blocks[id.0]
    }

    pub fn entry(&self, id: EntryId) -> &Entry<'r> {
        &self.entries[id.0]
    }

    pub fn field(&self, id: FieldId) -> &Field<'r> {
        &self.fields[id.0]
    }

    /// The fields of an entry, in declaration order.
    pub fn fields_of(&self, id: EntryId) -> impl Iterator<Item = &Field<'r>> {
        self.entry(id).fields.iter().map(|&field| self.field(field))
    }

    /// The text covered by a span.
    pub fn slice(&self, span: Span) -> &'r str {
        span.slice(self.source)
    }
}
