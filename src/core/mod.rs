pub mod errors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which phase of translation a test exercises, inferred from its RUN lines.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CompilerStage {
    Parse,
    Sema,
    Codegen,
    AstPrint,
    Unknown,
}

impl CompilerStage {
    pub fn as_str(&self) -> &'static str {
        static DISPLAY_STRINGS: &[(CompilerStage, &str)] = &[
            (CompilerStage::Parse, "parse"),
            (CompilerStage::Sema, "sema"),
            (CompilerStage::Codegen, "codegen"),
            (CompilerStage::AstPrint, "ast_print"),
            (CompilerStage::Unknown, "unknown"),
        ];

        DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }
}

impl std::fmt::Display for CompilerStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TestCategory {
    Parallel,
    Worksharing,
    Target,
    Synchronization,
    Simd,
    Task,
    General,
}

impl TestCategory {
    pub fn as_str(&self) -> &'static str {
        static DISPLAY_STRINGS: &[(TestCategory, &str)] = &[
            (TestCategory::Parallel, "parallel"),
            (TestCategory::Worksharing, "worksharing"),
            (TestCategory::Target, "target"),
            (TestCategory::Synchronization, "synchronization"),
            (TestCategory::Simd, "simd"),
            (TestCategory::Task, "task"),
            (TestCategory::General, "general"),
        ];

        DISPLAY_STRINGS
            .iter()
            .find(|(c, _)| c == self)
            .map(|(_, name)| *name)
            .unwrap_or("general")
    }
}

impl std::fmt::Display for TestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of an actual parser diagnostic message.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    SyntaxError,
    OpenmpClauseError,
    DirectiveConstraintError,
    ReferenceError,
    DeclarationError,
    SemanticError,
    OtherError,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        static DISPLAY_STRINGS: &[(DiagnosticKind, &str)] = &[
            (DiagnosticKind::SyntaxError, "syntax_error"),
            (DiagnosticKind::OpenmpClauseError, "openmp_clause_error"),
            (
                DiagnosticKind::DirectiveConstraintError,
                "directive_constraint_error",
            ),
            (DiagnosticKind::ReferenceError, "reference_error"),
            (DiagnosticKind::DeclarationError, "declaration_error"),
            (DiagnosticKind::SemanticError, "semantic_error"),
            (DiagnosticKind::OtherError, "other_error"),
        ];

        DISPLAY_STRINGS
            .iter()
            .find(|(k, _)| k == self)
            .map(|(_, name)| *name)
            .unwrap_or("other_error")
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of an *expected* diagnostic annotation. Intentionally a
/// separate, looser vocabulary than [`DiagnosticKind`]; the two are not
/// required to agree.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedKind {
    ClauseError,
    DirectiveError,
    SyntaxError,
    SemanticError,
    DeclarationError,
    GeneralError,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TestingStrategy {
    ErrorMessageValidation,
    SyntaxValidation,
    SemanticValidation,
    GeneralErrorTesting,
}

/// One pragma occurrence and its raw clause tokens.
///
/// An empty `name` marks a malformed pragma (`#pragma omp` with nothing after
/// it); such directives are recorded, never dropped. `column` is -1 when the
/// directive was reconstructed from parse-tree tokens rather than matched in
/// the source text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub clauses: Vec<String>,
    pub line_number: usize,
    pub column: i32,
    pub full_text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AstNodeSummary {
    pub kind: String,
    pub spelling: String,
    /// "line:col" as reported by the front end.
    pub location: String,
    pub children_count: usize,
    pub has_openmp: bool,
}

/// A parser-emitted message with location, severity and classified kind.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub severity: String,
}

/// An expected-error / expected-warning annotation found in the test body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpectedAnnotation {
    pub pattern: String,
    pub category: ExpectedKind,
    /// Text between `{{` and `}}` if the annotation embeds a regex fragment.
    pub regex_fragment: Option<String>,
    pub line_number: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchedLine {
    pub line: usize,
    pub expected: String,
    pub actual: Vec<String>,
}

/// Line-keyed mapping of expected annotations against actual diagnostics.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorCorrelation {
    pub total_expected: usize,
    pub total_actual: usize,
    pub matched: Vec<MatchedLine>,
    pub unmatched_expected: Vec<String>,
    pub unexpected_errors: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NegativeTestProfile {
    pub is_negative_test: bool,
    pub strategy: Option<TestingStrategy>,
    pub correlation: ErrorCorrelation,
    pub coverage_areas: Vec<String>,
    pub trigger_count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub type_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub location: String,
    pub return_type: String,
    pub parameters: Vec<ParamDecl>,
    pub has_openmp: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariableDecl {
    pub name: String,
    pub type_name: String,
    pub location: String,
    /// True iff the declaration's parent is the translation-unit root.
    pub is_global: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncludeDecl {
    pub file: String,
    pub location: String,
    pub is_system: bool,
}

/// The single structured output aggregating every extracted feature for one
/// test file. Created once per file and immutable thereafter; ownership moves
/// to the record sink on emission.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRecord {
    pub file_path: PathBuf,
    pub file_name: String,
    pub file_size: u64,
    pub line_count: usize,

    pub compiler_stage: CompilerStage,
    pub run_commands: Vec<String>,
    pub compiler_flags: Vec<String>,

    pub directives: Vec<Directive>,
    pub openmp_version: Option<String>,

    pub test_category: TestCategory,
    pub check_patterns: Vec<String>,
    pub expected_errors: Vec<String>,
    pub expected_warnings: Vec<String>,

    pub ast_nodes: Vec<AstNodeSummary>,
    pub functions: Vec<FunctionDecl>,
    pub variables: Vec<VariableDecl>,
    pub includes: Vec<IncludeDecl>,

    pub ir_patterns: Vec<String>,
    pub runtime_calls: Vec<String>,

    pub diagnostics: Vec<Diagnostic>,
    pub expected_annotations: Vec<ExpectedAnnotation>,
    pub negative_profile: NegativeTestProfile,
    pub trigger_mechanisms: Vec<String>,
    /// Distinct diagnostic kinds, first-observed order.
    pub diagnostic_kinds: Vec<DiagnosticKind>,
    pub traversal_anomalies: Vec<String>,

    /// Heuristic sophistication proxy, always in 0..=10.
    pub complexity_score: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_wire_strings() {
        assert_eq!(CompilerStage::AstPrint.as_str(), "ast_print");
        assert_eq!(
            serde_json::to_string(&CompilerStage::AstPrint).unwrap(),
            "\"ast_print\""
        );
        assert_eq!(CompilerStage::Sema.to_string(), "sema");
    }

    #[test]
    fn diagnostic_kind_wire_strings() {
        assert_eq!(
            DiagnosticKind::DirectiveConstraintError.as_str(),
            "directive_constraint_error"
        );
        let kind: DiagnosticKind = serde_json::from_str("\"openmp_clause_error\"").unwrap();
        assert_eq!(kind, DiagnosticKind::OpenmpClauseError);
    }

    #[test]
    fn strategy_round_trips() {
        let strategy = TestingStrategy::ErrorMessageValidation;
        let json = serde_json::to_string(&strategy).unwrap();
        assert_eq!(json, "\"error_message_validation\"");
        let back: TestingStrategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, strategy);
    }

    #[test]
    fn category_display_covers_all_variants() {
        let all = [
            TestCategory::Parallel,
            TestCategory::Worksharing,
            TestCategory::Target,
            TestCategory::Synchronization,
            TestCategory::Simd,
            TestCategory::Task,
            TestCategory::General,
        ];
        let names: Vec<&str> = all.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "parallel",
                "worksharing",
                "target",
                "synchronization",
                "simd",
                "task",
                "general"
            ]
        );
    }
}
