//! Diagnostic types for validation results.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// The rule which produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Code {
    UnknownEntryType,
    DuplicateKey,
    MissingRequiredFields,
    UnknownField,
    UnbalancedBraces,
    EmptyValue,
}

impl Code {
    pub fn as_str(self) -> &'static str {
        match self {
            Code::UnknownEntryType => "unknown-entry-type",
            Code::DuplicateKey => "duplicate-key",
            Code::MissingRequiredFields => "missing-required-fields",
            Code::UnknownField => "unknown-field",
            Code::UnbalancedBraces => "unbalanced-braces",
            Code::EmptyValue => "empty-value",
        }
    }

    /// The severity with which this rule reports.
    pub fn severity(self) -> Severity {
        match self {
            Code::UnknownEntryType | Code::UnknownField | Code::EmptyValue => Severity::Warning,
            Code::DuplicateKey | Code::MissingRequiredFields | Code::UnbalancedBraces => {
                Severity::Error
            }
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation finding, attached to a span of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub span: Span,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

impl Diagnostic {
    pub fn new(span: Span, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            span,
            severity,
            message: message.into(),
            code: None,
        }
    }

    /// A diagnostic for a rule, at the severity of the rule.
    pub fn rule(code: Code, span: Span, message: impl Into<String>) -> Self {
        Self::new(span, code.severity(), message).with_code(code)
    }

    pub fn with_code(mut self, code: Code) -> Self {
        self.code = Some(code);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{}]: {}", self.severity, code, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}
