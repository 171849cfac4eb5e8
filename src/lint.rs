//! # Diagnostics engine
//!
//! [`validate`] checks every regular entry of a [`Document`] against the
//! [catalogs](crate::catalog) and a few structural rules. The checks for one entry run in a
//! fixed order:
//!
//! 1. unknown entry type,
//! 2. duplicate citation key,
//! 3. missing required fields,
//! 4. then for each field in declaration order: unknown field name, unbalanced braces, and
//!    empty value.
//!
//! Entries are visited in document order, so the result only depends on the document and
//! the [`Config`].
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog;
use crate::diagnostic::{Code, Diagnostic};
use crate::error::{Error, Result};
use crate::model::{Document, Entry, Field};
use crate::parse::brace_balance;
use crate::value::ValuePart;

/// Which checks to run. Every check is enabled by default.
///
/// In JSON, keys are written in camel case and may be omitted:
///
/// ```
/// use bibtex_lint::lint::Config;
///
/// let config = Config::from_json(r#"{ "checkUnknownFields": false }"#).unwrap();
/// assert!(!config.check_unknown_fields);
/// assert!(config.check_entry_types);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Report entry types outside the recognized catalog.
    pub check_entry_types: bool,
    /// Report citation keys already used by an earlier entry.
    pub check_duplicate_keys: bool,
    /// Report required fields missing for the entry type.
    pub check_required_fields: bool,
    /// Report field names outside the recognized catalog.
    pub check_unknown_fields: bool,
    /// Report unbalanced braces and empty values.
    pub check_field_syntax: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_entry_types: true,
            check_duplicate_keys: true,
            check_required_fields: true,
            check_unknown_fields: true,
            check_field_syntax: true,
        }
    }
}

impl Config {
    /// A configuration with every check disabled.
    pub fn none() -> Self {
        Self {
            check_entry_types: false,
            check_duplicate_keys: false,
            check_required_fields: false,
            check_unknown_fields: false,
            check_field_syntax: false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The names accepted by [`Config::set`].
    pub const CHECKS: [&'static str; 5] = [
        "entry-types",
        "duplicate-keys",
        "required-fields",
        "unknown-fields",
        "field-syntax",
    ];

    /// Enable or disable a check by name, such as `required-fields`.
    pub fn set(&mut self, check: &str, enabled: bool) -> Result<()> {
        let flag = match check {
            "entry-types" => &mut self.check_entry_types,
            "duplicate-keys" => &mut self.check_duplicate_keys,
            "required-fields" => &mut self.check_required_fields,
            "unknown-fields" => &mut self.check_unknown_fields,
            "field-syntax" => &mut self.check_field_syntax,
            _ => return Err(Error::UnknownCheck(check.to_owned())),
        };
        *flag = enabled;
        Ok(())
    }
}

/// Validate a document. See the [module documentation](self) for the checks and their
/// order.
pub fn validate(doc: &Document<'_>, config: &Config) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut keys = HashSet::new();

    for entry in doc.entries() {
        if config.check_entry_types && !catalog::is_known_entry_type(entry.entry_type) {
            diagnostics.push(Diagnostic::rule(
                Code::UnknownEntryType,
                entry.type_span,
                format!("Unknown entry type: @{}", entry.entry_type),
            ));
        }

        if config.check_duplicate_keys {
            if let (Some(key), Some(span)) = (entry.key, entry.key_span) {
                if !keys.insert(key) {
                    diagnostics.push(Diagnostic::rule(
                        Code::DuplicateKey,
                        span,
                        format!("Duplicate entry key: {key}"),
                    ));
                }
            }
        }

        if config.check_required_fields {
            if let Some(diagnostic) = missing_required(doc, entry) {
                diagnostics.push(diagnostic);
            }
        }

        for field in entry.fields.iter().map(|&id| doc.field(id)) {
            check_field(field, config, &mut diagnostics);
        }
    }

    debug!(
        entries = doc.entries().len(),
        diagnostics = diagnostics.len(),
        "validated document"
    );
    diagnostics
}

fn missing_required(doc: &Document<'_>, entry: &Entry<'_>) -> Option<Diagnostic> {
    let requirements = catalog::requirements(entry.entry_type)?;
    let missing: Vec<&str> = requirements
        .required
        .iter()
        .copied()
        .filter(|name| entry.get(doc, name).is_none())
        .collect();

    if missing.is_empty() {
        return None;
    }
    Some(Diagnostic::rule(
        Code::MissingRequiredFields,
        entry.span,
        format!(
            "Missing required fields for @{}: {}",
            entry.entry_type,
            missing.join(", ")
        ),
    ))
}

fn check_field(field: &Field<'_>, config: &Config, diagnostics: &mut Vec<Diagnostic>) {
    if config.check_unknown_fields && !catalog::is_known_field(field.name) {
        diagnostics.push(Diagnostic::rule(
            Code::UnknownField,
            field.name_span,
            format!("Unknown field: {}", field.name),
        ));
    }

    if !config.check_field_syntax {
        return;
    }

    if value_brace_balance(field.value.parts()) != 0 {
        diagnostics.push(Diagnostic::rule(
            Code::UnbalancedBraces,
            field.value.span,
            format!("Unmatched braces in field value for '{}'", field.name),
        ));
    }

    if field.value.is_blank() {
        let span = if field.value.span.is_empty() {
            field.span
        } else {
            field.value.span
        };
        diagnostics.push(Diagnostic::rule(
            Code::EmptyValue,
            span,
            format!("Empty value for field '{}'", field.name),
        ));
    }
}

/// The net count of `{` minus `}` over all parts of a value. A braced part which was cut off
/// by the end of input also counts its opening bracket.
fn value_brace_balance(parts: &[ValuePart<'_>]) -> isize {
    parts
        .iter()
        .map(|part| match part {
            ValuePart::Literal { .. } => 0,
            ValuePart::Braced { text, depth, .. } => brace_balance(text) + isize::from(*depth > 0),
            ValuePart::Quoted { text, .. } => brace_balance(text),
        })
        .sum()
}
