//! Diagnostics reported by the extensions

use tslx_diagnostics::{Diagnostic, DiagnosticCode, Span};

pub fn spread_not_supported(span: Span) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::SpreadNotSupported, "Spread is not supported in newLuaSet.")
        .with_span(span)
        .with_help("pass the values directly, or spread a single array literal")
        .build()
}

pub fn first_param_should_be_regex(span: Span) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::PatternNotStringLiteral,
        "This must be called with a string literal, representing a regex.",
    )
    .with_span(span)
    .build()
}

pub fn invalid_pattern(span: Span, error: &regex::Error) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::InvalidPattern, format!("Invalid regular expression: {}", error))
        .with_span(span)
        .build()
}

pub fn unenumerable_type(span: Span) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::UnenumerableType,
        "Cannot determine the properties of this type argument.",
    )
    .with_span(span)
    .with_help("use an interface, type literal, class or `typeof` of an object literal")
    .build()
}

pub fn use_nil_instead(span: Span) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::UseNil, "Use nil instead of undefined.")
        .with_span(span)
        .suggest_replace(span, "nil", "replace with `nil`")
        .build()
}

pub fn use_equals_equals(span: Span) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::UseEqualsEquals, "Use == instead of ===.")
        .with_span(span)
        .build()
}

pub fn use_not_equals(span: Span) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::UseNotEquals, "Use != instead of !==.")
        .with_span(span)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tslx_diagnostics::{FileId, Severity};

    #[test]
    fn test_severities() {
        let span = Span::new(FileId(0), 0, 9);
        assert_eq!(spread_not_supported(span).severity, Severity::Error);
        assert_eq!(first_param_should_be_regex(span).severity, Severity::Error);
        assert_eq!(unenumerable_type(span).severity, Severity::Error);
        assert_eq!(use_nil_instead(span).severity, Severity::Warning);
        assert_eq!(use_equals_equals(span).severity, Severity::Warning);
        assert_eq!(use_not_equals(span).message, "Use != instead of !==.");
    }

    #[test]
    fn test_nil_suggestion() {
        let diag = use_nil_instead(Span::new(FileId(0), 4, 13));
        assert_eq!(diag.suggestions.len(), 1);
        assert_eq!(diag.suggestions[0].replacement, "nil");
    }
}
