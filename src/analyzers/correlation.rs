use crate::analyzers::classify::classify_expected;
use crate::core::{
    Diagnostic, ErrorCorrelation, ExpectedAnnotation, MatchedLine, NegativeTestProfile,
    TestingStrategy,
};
use regex::Regex;
use std::collections::BTreeMap;

/// Filename substrings that mark a test as negative on their own.
static NEGATIVE_INDICATORS: &[&str] = &[
    "messages", "error", "warn", "diag", "negative", "invalid", "bad", "fail", "wrong",
];

/// OpenMP constructs counted toward error-coverage areas.
static CONSTRUCT_KEYWORDS: &[&str] = &[
    "parallel",
    "for",
    "sections",
    "single",
    "task",
    "target",
    "teams",
    "distribute",
    "simd",
    "atomic",
    "critical",
    "barrier",
];

/// Clauses counted toward error-coverage areas, reported as `<clause>_clause`.
static CLAUSE_KEYWORDS: &[&str] = &[
    "private",
    "shared",
    "reduction",
    "schedule",
    "collapse",
    "nowait",
    "ordered",
    "default",
    "copyin",
    "copyprivate",
];

/// Matches expected annotations against actual diagnostics and derives the
/// negative-test profile. Correlation is purely line-indexed; a line carrying
/// several diagnostics attaches all of them to the one expected pattern on
/// that line.
pub struct ErrorCorrelator {
    trigger_patterns: Vec<(Regex, &'static str)>,
    regex_fragment_re: Regex,
}

impl ErrorCorrelator {
    pub fn new() -> Self {
        let trigger_patterns = vec![
            (
                Regex::new(r"(?i)#pragma\s+omp\s+\w+[^\n]*").unwrap(),
                "openmp_directive",
            ),
            (
                Regex::new(r#"(?i)expected-error.*?"([^"]+)""#).unwrap(),
                "expected_error",
            ),
            (
                Regex::new(r#"(?i)expected-warning.*?"([^"]+)""#).unwrap(),
                "expected_warning",
            ),
            (Regex::new(r"(?i)// ERROR:.*").unwrap(), "error_comment"),
            (Regex::new(r"(?i)// FIXME:.*").unwrap(), "fixme_comment"),
        ];

        Self {
            trigger_patterns,
            regex_fragment_re: Regex::new(r"\{\{(.*?)\}\}").unwrap(),
        }
    }

    /// A test is negative iff its filename carries a negative indicator OR
    /// the body contains an expected-error / expected-warning annotation.
    /// The filename rule is sufficient on its own.
    pub fn is_negative(&self, file_name: &str, content: &str) -> bool {
        let name_lower = file_name.to_lowercase();
        if NEGATIVE_INDICATORS.iter().any(|ind| name_lower.contains(ind)) {
            return true;
        }
        content.contains("expected-error") || content.contains("expected-warning")
    }

    fn strategy(&self, file_name: &str) -> TestingStrategy {
        let name_lower = file_name.to_lowercase();
        if name_lower.contains("messages") {
            TestingStrategy::ErrorMessageValidation
        } else if name_lower.contains("syntax") {
            TestingStrategy::SyntaxValidation
        } else if name_lower.contains("semantic") {
            TestingStrategy::SemanticValidation
        } else {
            TestingStrategy::GeneralErrorTesting
        }
    }

    /// Binds each expected annotation text to every line it occurs on,
    /// classifying it and pulling out an embedded `{{...}}` regex fragment.
    pub fn expected_annotations(
        &self,
        expected_errors: &[String],
        content: &str,
    ) -> Vec<ExpectedAnnotation> {
        let mut annotations = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            for expected in expected_errors {
                if !expected.is_empty() && line.contains(expected.as_str()) {
                    annotations.push(ExpectedAnnotation {
                        pattern: expected.clone(),
                        category: classify_expected(expected),
                        regex_fragment: self
                            .regex_fragment_re
                            .captures(expected)
                            .map(|c| c[1].to_string()),
                        line_number: idx + 1,
                    });
                }
            }
        }

        annotations
    }

    /// Line-keyed mapping: a line present in both sets is matched (with every
    /// diagnostic message on it), expected-only lines are unmatched, and
    /// diagnostic-only lines are unexpected.
    pub fn correlate(
        &self,
        annotations: &[ExpectedAnnotation],
        diagnostics: &[Diagnostic],
    ) -> ErrorCorrelation {
        let mut expected_by_line: BTreeMap<usize, &ExpectedAnnotation> = BTreeMap::new();
        for annotation in annotations {
            expected_by_line.insert(annotation.line_number, annotation);
        }

        let mut actual_by_line: BTreeMap<usize, Vec<&Diagnostic>> = BTreeMap::new();
        for diagnostic in diagnostics {
            actual_by_line.entry(diagnostic.line).or_default().push(diagnostic);
        }

        let mut correlation = ErrorCorrelation {
            total_expected: annotations.len(),
            total_actual: diagnostics.len(),
            ..Default::default()
        };

        for (&line, annotation) in &expected_by_line {
            match actual_by_line.get(&line) {
                Some(actual) => correlation.matched.push(MatchedLine {
                    line,
                    expected: annotation.pattern.clone(),
                    actual: actual.iter().map(|d| d.message.clone()).collect(),
                }),
                None => correlation.unmatched_expected.push(annotation.pattern.clone()),
            }
        }

        for (line, actual) in &actual_by_line {
            if !expected_by_line.contains_key(line) {
                correlation
                    .unexpected_errors
                    .extend(actual.iter().map(|d| d.message.clone()));
            }
        }

        correlation
    }

    /// Occurrence counts across the fixed trigger pattern set; the patterns
    /// overlap and double-count by design.
    pub fn trigger_mechanisms(&self, content: &str) -> Vec<String> {
        let mut triggers = Vec::new();

        for (pattern, tag) in &self.trigger_patterns {
            for captures in pattern.captures_iter(content) {
                let text = captures
                    .get(1)
                    .or_else(|| captures.get(0))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                triggers.push(format!("{tag}: {text}"));
            }
        }

        triggers
    }

    /// Construct and clause keywords found in the lower-cased body, in fixed
    /// keyword-array order.
    pub fn coverage_areas(&self, content: &str) -> Vec<String> {
        let content_lower = content.to_lowercase();
        let mut areas = Vec::new();

        for construct in CONSTRUCT_KEYWORDS {
            if content_lower.contains(construct) {
                areas.push(construct.to_string());
            }
        }

        for clause in CLAUSE_KEYWORDS {
            if content_lower.contains(clause) {
                areas.push(format!("{clause}_clause"));
            }
        }

        areas
    }

    /// The full negative-test profile. Strategy, correlation and coverage
    /// areas are only populated for negative tests; the trigger count is
    /// recorded either way.
    pub fn profile(
        &self,
        file_name: &str,
        content: &str,
        annotations: &[ExpectedAnnotation],
        diagnostics: &[Diagnostic],
        trigger_count: usize,
    ) -> NegativeTestProfile {
        let is_negative = self.is_negative(file_name, content);

        if !is_negative {
            return NegativeTestProfile {
                is_negative_test: false,
                strategy: None,
                correlation: ErrorCorrelation::default(),
                coverage_areas: Vec::new(),
                trigger_count,
            };
        }

        NegativeTestProfile {
            is_negative_test: true,
            strategy: Some(self.strategy(file_name)),
            correlation: self.correlate(annotations, diagnostics),
            coverage_areas: self.coverage_areas(content),
            trigger_count,
        }
    }
}

impl Default for ErrorCorrelator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiagnosticKind, ExpectedKind};

    fn correlator() -> ErrorCorrelator {
        ErrorCorrelator::new()
    }

    fn diag(message: &str, line: usize) -> Diagnostic {
        Diagnostic {
            kind: DiagnosticKind::OtherError,
            message: message.to_string(),
            line,
            column: 1,
            severity: "error".to_string(),
        }
    }

    #[test]
    fn filename_rule_alone_marks_negative() {
        let c = correlator();
        assert!(c.is_negative("messages.c", "int main() { return 0; }"));
        assert!(c.is_negative("parallel_invalid_clause.cpp", ""));
        assert!(!c.is_negative("parallel_codegen.c", "int main() {}"));
    }

    #[test]
    fn body_annotations_mark_negative() {
        let c = correlator();
        assert!(c.is_negative("codegen.c", "// expected-error: bad clause"));
        assert!(c.is_negative("codegen.c", "// expected-warning: unused"));
    }

    #[test]
    fn strategy_follows_filename_priority() {
        let c = correlator();
        let strategies: Vec<Option<TestingStrategy>> = [
            "parallel_messages.c",
            "syntax_fail.c",
            "semantic_bad.c",
            "invalid.c",
        ]
        .iter()
        .map(|name| c.profile(name, "", &[], &[], 0).strategy)
        .collect();

        assert_eq!(
            strategies,
            vec![
                Some(TestingStrategy::ErrorMessageValidation),
                Some(TestingStrategy::SyntaxValidation),
                Some(TestingStrategy::SemanticValidation),
                Some(TestingStrategy::GeneralErrorTesting),
            ]
        );
    }

    #[test]
    fn annotation_binds_to_every_occurrence_line() {
        let c = correlator();
        let content = "// expected-error: bad clause\nint x;\n// expected-error: bad clause\n";
        let expected = vec!["bad clause".to_string()];
        let annotations = c.expected_annotations(&expected, content);

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].line_number, 1);
        assert_eq!(annotations[1].line_number, 3);
        assert_eq!(annotations[0].category, ExpectedKind::ClauseError);
    }

    #[test]
    fn regex_fragment_extracted_from_braces() {
        let c = correlator();
        let content = "// expected-error: directive {{cannot .* here}}\n";
        let expected = vec!["directive {{cannot .* here}}".to_string()];
        let annotations = c.expected_annotations(&expected, content);

        assert_eq!(annotations.len(), 1);
        assert_eq!(
            annotations[0].regex_fragment.as_deref(),
            Some("cannot .* here")
        );
    }

    #[test]
    fn line_keyed_correlation() {
        let c = correlator();
        let annotations = vec![
            ExpectedAnnotation {
                pattern: "bad clause".to_string(),
                category: ExpectedKind::ClauseError,
                regex_fragment: None,
                line_number: 3,
            },
            ExpectedAnnotation {
                pattern: "missing paren".to_string(),
                category: ExpectedKind::SyntaxError,
                regex_fragment: None,
                line_number: 8,
            },
        ];
        let diagnostics = vec![
            diag("unexpected clause", 3),
            diag("second message on the same line", 3),
            diag("surprise error", 12),
        ];

        let correlation = c.correlate(&annotations, &diagnostics);
        assert_eq!(correlation.total_expected, 2);
        assert_eq!(correlation.total_actual, 3);
        assert_eq!(correlation.matched.len(), 1);
        assert_eq!(correlation.matched[0].line, 3);
        assert_eq!(correlation.matched[0].actual.len(), 2);
        assert_eq!(correlation.unmatched_expected, vec!["missing paren"]);
        assert_eq!(correlation.unexpected_errors, vec!["surprise error"]);
    }

    #[test]
    fn trigger_patterns_double_count_overlaps() {
        let c = correlator();
        let content = "#pragma omp parallel bogus\n// expected-error \"bad\"\n// ERROR: kaput\n// FIXME: tighten\n";
        let triggers = c.trigger_mechanisms(content);

        assert_eq!(triggers.len(), 4);
        assert!(triggers[0].starts_with("openmp_directive: "));
        assert_eq!(triggers[1], "expected_error: bad");
        assert!(triggers[2].starts_with("error_comment: "));
        assert!(triggers[3].starts_with("fixme_comment: "));
    }

    #[test]
    fn coverage_areas_fixed_order() {
        let c = correlator();
        let content = "#pragma omp parallel for private(x) reduction(+:s)\n#pragma omp atomic\n";
        let areas = c.coverage_areas(content);
        assert_eq!(
            areas,
            vec![
                "parallel",
                "for",
                "atomic",
                "private_clause",
                "reduction_clause"
            ]
        );
    }

    #[test]
    fn positive_test_profile_is_empty_but_counts_triggers() {
        let c = correlator();
        let profile = c.profile("codegen_ok.c", "int main() {}", &[], &[], 2);
        assert!(!profile.is_negative_test);
        assert!(profile.strategy.is_none());
        assert_eq!(profile.correlation, ErrorCorrelation::default());
        assert!(profile.coverage_areas.is_empty());
        assert_eq!(profile.trigger_count, 2);
    }
}
