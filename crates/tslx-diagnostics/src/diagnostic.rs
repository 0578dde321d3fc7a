//! Diagnostic types for transpiler errors and extension warnings.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Advisory, output is unchanged
    Warning,
    /// Misuse that the host should refuse to ship
    Error,
}

impl Severity {
    /// Get the string representation for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // Parse errors (P001-P099)
    /// Syntax error during parsing
    ParseError,

    // Unsupported by the Lua lowering (U001-U099)
    /// Expression kind the lowering does not handle
    UnsupportedExpression,
    /// Statement kind the lowering does not handle
    UnsupportedStatement,
    /// Destructuring or other non-identifier binding
    UnsupportedPattern,

    // Extension misuse (X001-X099)
    /// Spread argument passed to `newLuaSet`
    SpreadNotSupported,
    /// `getProjectFilesMatchingRegex` called without a string literal
    PatternNotStringLiteral,
    /// `getProjectFilesMatchingRegex` literal is not a valid regular expression
    InvalidPattern,
    /// `keys`/`keySet` type argument whose properties cannot be resolved
    UnenumerableType,

    // Style (S001-S099)
    /// `undefined` where `nil` reads better
    UseNil,
    /// `===` in code that compiles to Lua `==`
    UseEqualsEquals,
    /// `!==` in code that compiles to Lua `~=`
    UseNotEquals,
}

impl DiagnosticCode {
    /// Get the code string (e.g., "X001").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseError => "P001",

            Self::UnsupportedExpression => "U003",
            Self::UnsupportedStatement => "U004",
            Self::UnsupportedPattern => "U005",

            Self::SpreadNotSupported => "X001",
            Self::PatternNotStringLiteral => "X002",
            Self::InvalidPattern => "X003",
            Self::UnenumerableType => "X004",

            Self::UseNil => "S001",
            Self::UseEqualsEquals => "S002",
            Self::UseNotEquals => "S003",
        }
    }

    /// Get the default severity for this code.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::ParseError
            | Self::UnsupportedExpression
            | Self::UnsupportedStatement
            | Self::UnsupportedPattern
            | Self::SpreadNotSupported
            | Self::PatternNotStringLiteral
            | Self::InvalidPattern
            | Self::UnenumerableType => Severity::Error,

            Self::UseNil | Self::UseEqualsEquals | Self::UseNotEquals => Severity::Warning,
        }
    }

    /// Parse a code string back into a code (`tslx explain`).
    pub fn from_code(code: &str) -> Option<Self> {
        const ALL: [DiagnosticCode; 11] = [
            DiagnosticCode::ParseError,
            DiagnosticCode::UnsupportedExpression,
            DiagnosticCode::UnsupportedStatement,
            DiagnosticCode::UnsupportedPattern,
            DiagnosticCode::SpreadNotSupported,
            DiagnosticCode::PatternNotStringLiteral,
            DiagnosticCode::InvalidPattern,
            DiagnosticCode::UnenumerableType,
            DiagnosticCode::UseNil,
            DiagnosticCode::UseEqualsEquals,
            DiagnosticCode::UseNotEquals,
        ];
        ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A suggested textual replacement.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// Description of what this fix does
    pub message: String,
    /// The span to replace
    pub span: Span,
    /// The replacement text
    pub replacement: String,
}

impl Suggestion {
    pub fn replace(span: Span, replacement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span,
            replacement: replacement.into(),
        }
    }
}

/// A diagnostic attached to a source position.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Unique code
    pub code: DiagnosticCode,
    /// Severity level
    pub severity: Severity,
    /// Short message (single line)
    pub message: String,
    /// Longer explanation (optional)
    pub explanation: Option<String>,
    /// Primary span (where the problem is)
    pub span: Span,
    /// Replacement suggestions
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, Severity::Warning, message)
    }

    /// Create a diagnostic with the code's default severity.
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, code.default_severity(), message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Builder for constructing diagnostics fluently.
pub struct DiagnosticBuilder {
    inner: Diagnostic,
}

impl DiagnosticBuilder {
    pub fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            inner: Diagnostic {
                code,
                severity,
                message: message.into(),
                explanation: None,
                span: Span::DUMMY,
                suggestions: Vec::new(),
            },
        }
    }

    /// Set the primary span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.inner.span = span;
        self
    }

    /// Add a simple replacement suggestion.
    pub fn suggest_replace(
        mut self,
        span: Span,
        replacement: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.inner
            .suggestions
            .push(Suggestion::replace(span, replacement, message));
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.inner.explanation = Some(help.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        self.inner
    }
}

/// Collection of diagnostics with summary statistics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(diagnostics);
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_warning()).count()
    }

    /// Codes of all diagnostics, in insertion order.
    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.items.iter().map(|d| d.code).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_severity() {
        assert_eq!(DiagnosticCode::SpreadNotSupported.default_severity(), Severity::Error);
        assert_eq!(DiagnosticCode::UseNil.default_severity(), Severity::Warning);
    }

    #[test]
    fn test_code_round_trip_lookup() {
        assert_eq!(DiagnosticCode::from_code("x002"), Some(DiagnosticCode::PatternNotStringLiteral));
        assert_eq!(DiagnosticCode::from_code("X004"), Some(DiagnosticCode::UnenumerableType));
        assert_eq!(DiagnosticCode::from_code("Z999"), None);
    }

    #[test]
    fn test_counts() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::new(DiagnosticCode::UseNil, "a").build());
        diags.push(Diagnostic::new(DiagnosticCode::InvalidPattern, "b").build());
        assert!(diags.has_errors());
        assert_eq!(diags.error_count(), 1);
        assert_eq!(diags.warning_count(), 1);
        assert_eq!(diags.codes(), vec![DiagnosticCode::UseNil, DiagnosticCode::InvalidPattern]);
    }
}
