//! # bibtex_lint
//! A resilient tokenizer, document model and diagnostics engine for `.bib` files.
//!
//! The pipeline is `text -> tokens -> Document -> diagnostics`. None of the steps can fail:
//! malformed input produces a best-effort [`Document`] and diagnostics describing the problems.
//!
//! ```
//! use bibtex_lint::{Config, parse, validate};
//!
//! let input = "@book{b1, title={T1}}\n@book{b1, title={T2}}";
//! let doc = parse(input);
//! let diagnostics = validate(&doc, &Config::default());
//! assert_eq!(diagnostics.len(), 3);
//! assert_eq!(diagnostics[1].to_string(), "error[duplicate-key]: Duplicate entry key: b1");
//! ```

/// Byte spans and line/column conversion.
pub mod span;

/// Token types and character classes.
pub mod token;

/// The tokenizer.
pub mod lex;

/// Field values.
pub mod value;

/// The document arena.
pub mod model;

/// Fundamental parsers.
pub mod parse;

/// Recognized entry types and fields.
pub mod catalog;

/// Diagnostic types.
pub mod diagnostic;

/// Validation rules.
pub mod lint;

/// Cursor position queries.
pub mod cursor;

/// Error types for reading input and configuration.
pub mod error;

pub mod syntax;

// re-exports
pub use diagnostic::{Code, Diagnostic, Severity};
pub use lex::tokenize;
pub use lint::{Config, validate};
pub use model::Document;
pub use parse::parse;
pub use span::Span;
