//! # Cursor context
//!
//! Classify a cursor position in a [`Document`], so that completion and hover providers
//! work from the same parse as validation.
use serde::Serialize;

use crate::model::{BlockId, BlockKind, Document, EntryId, FieldId};
use crate::token::TokenKind;

/// What a cursor position lies in or directly after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CursorContext {
    /// The `@type` of an entry.
    EntryType { entry: EntryId },
    /// The citation key of an entry, or the place where it should be written.
    CitationKey { entry: EntryId },
    /// A field name, or the place where a new field name would go.
    FieldName {
        entry: EntryId,
        field: Option<FieldId>,
    },
    /// The value of a field, after its `=`.
    FieldValue { entry: EntryId, field: FieldId },
    /// The body of a `@comment`, `@preamble` or `@string` entry.
    Raw { block: BlockId },
    /// Free text between entries.
    Outside,
}

impl Document<'_> {
    /// The context of a cursor at the byte offset `offset`, where the cursor sits between
    /// the chars at `offset - 1` and `offset`. The char before the cursor decides.
    ///
    /// ```
    /// use bibtex_lint::cursor::CursorContext;
    /// use bibtex_lint::parse::parse;
    ///
    /// let input = "@article{key, title = {T}}";
    /// let doc = parse(input);
    /// assert!(matches!(doc.context_at(4), CursorContext::EntryType { .. }));
    /// assert!(matches!(doc.context_at(input.len()), CursorContext::Outside));
    /// ```
    pub fn context_at(&self, offset: usize) -> CursorContext {
        if offset == 0 {
            return CursorContext::Outside;
        }
        let blocks = self.blocks();
        let idx = blocks.partition_point(|block| block.span.to < offset);
        let Some(block) = blocks.get(idx).filter(|block| block.span.from < offset) else {
            return CursorContext::Outside;
        };

        let entry = match block.kind {
            BlockKind::FreeText(_) => return CursorContext::Outside,
            BlockKind::Comment(_) | BlockKind::Preamble(_) | BlockKind::StringDef(_) => {
                let closed = block.raw().is_some_and(|raw| raw.closed);
                return if closed && offset == block.span.to {
                    CursorContext::Outside
                } else {
                    CursorContext::Raw {
                        block: BlockId(idx),
                    }
                };
            }
            BlockKind::Entry(entry) => entry,
        };

        // the last significant token starting before the cursor
        let tokens = self.tokens();
        let start = tokens.partition_point(|t| t.span.from < block.span.from);
        let end = tokens.partition_point(|t| t.span.from < offset);
        let Some(prev) = tokens[start..end].iter().rev().find(|t| !t.kind.is_trivia()) else {
            return CursorContext::Outside;
        };

        let field_at = |from: usize| {
            self.entry(entry)
                .fields
                .iter()
                .rev()
                .copied()
                .find(|&id| self.field(id).name_span.from <= from)
        };

        match prev.kind {
            TokenKind::EntryMarker | TokenKind::EntryType => CursorContext::EntryType { entry },
            TokenKind::EntryKey => CursorContext::CitationKey { entry },
            TokenKind::Delimiter if prev.span.to == block.span.to && self.entry(entry).closed => {
                CursorContext::Outside
            }
            TokenKind::Delimiter => CursorContext::CitationKey { entry },
            TokenKind::Comma => CursorContext::FieldName { entry, field: None },
            TokenKind::FieldName => CursorContext::FieldName {
                entry,
                field: field_at(prev.span.from),
            },
            _ => match field_at(prev.span.from) {
                Some(field) => CursorContext::FieldValue { entry, field },
                None => CursorContext::FieldName { entry, field: None },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn context(input: &str, marker: &str) -> CursorContext {
        let offset = input.find(marker).unwrap() + marker.len();
        parse(input).context_at(offset)
    }

    #[test]
    fn test_entry_contexts() {
        let input = "junk @article{key, title = {The T}, year = 2024}\n";
        let entry = EntryId(0);
        assert_eq!(context(input, "ju"), CursorContext::Outside);
        assert_eq!(context(input, "@art"), CursorContext::EntryType { entry });
        assert_eq!(context(input, "@article{"), CursorContext::CitationKey { entry });
        assert_eq!(context(input, "{ke"), CursorContext::CitationKey { entry });
        assert_eq!(
            context(input, "key, "),
            CursorContext::FieldName { entry, field: None }
        );
        assert_eq!(
            context(input, "tit"),
            CursorContext::FieldName {
                entry,
                field: Some(FieldId(0))
            }
        );
        assert_eq!(
            context(input, "{The"),
            CursorContext::FieldValue {
                entry,
                field: FieldId(0)
            }
        );
        assert_eq!(
            context(input, "year = "),
            CursorContext::FieldValue {
                entry,
                field: FieldId(1)
            }
        );
        assert_eq!(context(input, "2024}"), CursorContext::Outside);
    }

    #[test]
    fn test_unclosed_entry() {
        let input = "@misc{k, note = {open";
        let doc = parse(input);
        assert_eq!(
            doc.context_at(input.len()),
            CursorContext::FieldValue {
                entry: EntryId(0),
                field: FieldId(0)
            }
        );
    }

    #[test]
    fn test_raw_blocks() {
        let input = "@comment{anything} x";
        assert_eq!(
            context(input, "@comment{any"),
            CursorContext::Raw { block: BlockId(0) }
        );
        assert_eq!(context(input, "thing}"), CursorContext::Outside);
        assert_eq!(parse(input).context_at(0), CursorContext::Outside);
        assert_eq!(parse(input).context_at(999), CursorContext::Outside);
    }
}
