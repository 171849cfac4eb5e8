use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// A single component of a field value.
///
/// The `text` of each part borrows from the source: for a `Literal` it is the identifier
/// or number itself, for `Braced` and `Quoted` parts it is the content between the
/// delimiters, which are not included. The `span` covers the delimiters as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValuePart<'r> {
    /// A number or a reference to a `@string` macro.
    ///
    /// A field written without any value holds an empty literal at the position where the
    /// value was expected.
    Literal { text: &'r str, span: Span },
    /// A `{braced}` value. `depth` is the nesting left open when the part ended, which is
    /// nonzero only if the input ended first.
    Braced {
        text: &'r str,
        depth: usize,
        span: Span,
    },
    /// A `"quoted"` value. Quotes do not nest, and curly brackets inside a quoted value
    /// are part of its text.
    Quoted {
        text: &'r str,
        closed: bool,
        span: Span,
    },
}

impl<'r> ValuePart<'r> {
    #[inline]
    pub fn text(&self) -> &'r str {
        match self {
            Self::Literal { text, .. } | Self::Braced { text, .. } | Self::Quoted { text, .. } => {
                text
            }
        }
    }

    #[inline]
    pub fn span(&self) -> Span {
        match self {
            Self::Literal { span, .. } | Self::Braced { span, .. } | Self::Quoted { span, .. } => {
                *span
            }
        }
    }

    /// Whether this part refers to a `@string` macro rather than being text or a number.
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Literal { text, .. } if crate::token::is_variable(text))
    }
}

impl fmt::Display for ValuePart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { text, .. } => f.write_str(text),
            Self::Braced { text, depth, .. } => {
                write!(f, "{{{text}")?;
                if *depth == 0 {
                    f.write_str("}")?;
                }
                Ok(())
            }
            Self::Quoted { text, closed, .. } => {
                write!(f, "\"{text}")?;
                if *closed {
                    f.write_str("\"")?;
                }
                Ok(())
            }
        }
    }
}

/// The parts of a field value, joined by `#`. A concatenation always has at least one part.
///
/// Parts are kept as written: macro references are not substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concatenation<'r> {
    pub span: Span,
    pub parts: Vec<ValuePart<'r>>,
}

impl<'r> Concatenation<'r> {
    /// An empty concatenation at `offset`, standing in for a missing value.
    pub fn placeholder(offset: usize) -> Self {
        let span = Span::empty(offset);
        Self {
            span,
            parts: vec![ValuePart::Literal { text: "", span }],
        }
    }

    pub fn parts(&self) -> &[ValuePart<'r>] {
        &self.parts
    }

    /// The texts of the parts, without delimiters, in order.
    pub fn texts(&self) -> impl Iterator<Item = &'r str> + '_ {
        self.parts.iter().map(ValuePart::text)
    }

    /// Whether the value consists of whitespace only, ignoring delimiters.
    pub fn is_blank(&self) -> bool {
        self.texts().all(|text| text.trim().is_empty())
    }
}

impl fmt::Display for Concatenation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut is_first = true;
        for part in &self.parts {
            if !is_first {
                f.write_str(" # ")?;
            }
            is_first = false;
            part.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let value = Concatenation {
            span: Span::new(0, 17),
            parts: vec![
                ValuePart::Literal {
                    text: "jan",
                    span: Span::new(0, 3),
                },
                ValuePart::Quoted {
                    text: " 1",
                    closed: true,
                    span: Span::new(6, 10),
                },
                ValuePart::Braced {
                    text: "x",
                    depth: 0,
                    span: Span::new(13, 16),
                },
            ],
        };
        assert_eq!(value.to_string(), "jan # \" 1\" # {x}");
        assert!(value.parts[0].is_variable());
        assert!(!value.is_blank());
    }

    #[test]
    fn test_placeholder() {
        let value = Concatenation::placeholder(4);
        assert_eq!(value.parts().len(), 1);
        assert!(value.is_blank());
        assert_eq!(value.span, Span::empty(4));
    }
}
