use crate::core::{Diagnostic, DiagnosticKind, Directive};

/// Additive inputs to the complexity score.
#[derive(Debug, Default)]
pub struct ComplexityInputs {
    pub directive_count: usize,
    pub clause_count: usize,
    pub check_pattern_count: usize,
    pub expected_error_count: usize,
    pub function_count: usize,
    pub diagnostic_count: usize,
    pub distinct_diagnostic_kinds: usize,
}

impl ComplexityInputs {
    pub fn from_features(
        directives: &[Directive],
        check_patterns: &[String],
        expected_errors: &[String],
        function_count: usize,
        diagnostics: &[Diagnostic],
        diagnostic_kinds: &[DiagnosticKind],
    ) -> Self {
        Self {
            directive_count: directives.len(),
            clause_count: directives.iter().map(|d| d.clauses.len()).sum(),
            check_pattern_count: check_patterns.len(),
            expected_error_count: expected_errors.len(),
            function_count,
            diagnostic_count: diagnostics.len(),
            distinct_diagnostic_kinds: diagnostic_kinds.len(),
        }
    }
}

/// Coarse sophistication proxy, not a calibrated metric. The weights are a
/// compatibility contract: 2 per directive, 1 per clause token, 1 per CHECK
/// line, 2 per expected error, functions/2, 1 per diagnostic, 1 per distinct
/// diagnostic kind, clamped to 0..=10.
pub fn complexity_score(inputs: &ComplexityInputs) -> u32 {
    let score = inputs.directive_count * 2
        + inputs.clause_count
        + inputs.check_pattern_count
        + inputs.expected_error_count * 2
        + inputs.function_count / 2
        + inputs.diagnostic_count
        + inputs.distinct_diagnostic_kinds;

    score.min(10) as u32
}
