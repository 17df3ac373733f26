use crate::core::{Diagnostic, DiagnosticKind, ExpectedKind};
use crate::parsing::RawDiagnostic;

/// Maps a raw diagnostic message to an error-kind tag. Case-insensitive
/// ordered keyword rules, first match wins; classification only, no judgment
/// on whether the diagnostic is correct.
pub fn classify_diagnostic(message: &str) -> DiagnosticKind {
    let lower = message.to_lowercase();

    if lower.contains("expected") && (lower.contains('(') || lower.contains(')')) {
        DiagnosticKind::SyntaxError
    } else if lower.contains("openmp") && lower.contains("clause") {
        DiagnosticKind::OpenmpClauseError
    } else if lower.contains("directive") && lower.contains("cannot contain") {
        DiagnosticKind::DirectiveConstraintError
    } else if lower.contains("does not refer to a value") {
        DiagnosticKind::ReferenceError
    } else if lower.contains("undeclared") || lower.contains("not declared") {
        DiagnosticKind::DeclarationError
    } else if lower.contains("semantic") || lower.contains("type") {
        DiagnosticKind::SemanticError
    } else {
        DiagnosticKind::OtherError
    }
}

/// Maps *expected*-annotation text into its own looser vocabulary. Kept
/// deliberately independent of [`classify_diagnostic`]; the two sets are not
/// required to agree.
pub fn classify_expected(pattern: &str) -> ExpectedKind {
    let lower = pattern.to_lowercase();

    if lower.contains("clause") {
        ExpectedKind::ClauseError
    } else if lower.contains("directive") {
        ExpectedKind::DirectiveError
    } else if lower.contains("syntax") || lower.contains("expected") {
        ExpectedKind::SyntaxError
    } else if lower.contains("semantic") || lower.contains("type") {
        ExpectedKind::SemanticError
    } else if lower.contains("undeclared") || lower.contains("undefined") {
        ExpectedKind::DeclarationError
    } else {
        ExpectedKind::GeneralError
    }
}

/// Attaches a classified kind to a raw front-end diagnostic.
pub fn classify_raw(raw: &RawDiagnostic) -> Diagnostic {
    Diagnostic {
        kind: classify_diagnostic(&raw.message),
        message: raw.message.clone(),
        line: raw.line,
        column: raw.column,
        severity: raw.severity.clone(),
    }
}
