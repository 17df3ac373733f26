use crate::core::CompilerStage;
use regex::Regex;

/// Keywords marking a CHECK line as low-level IR rather than source text.
static IR_KEYWORDS: &[&str] = &[
    "call",
    "invoke",
    "alloca",
    "load",
    "store",
    "br",
    "ret",
    "define",
    "declare",
    "getelementptr",
    "bitcast",
    "icmp",
];

/// Scans test-harness annotations out of comment lines: RUN commands, CHECK
/// patterns, expected-error and expected-warning annotations. Each pass is
/// independent and returns lines in top-to-bottom encounter order; no matches
/// is an empty list, never an error.
pub struct TestStructureExtractor {
    run_re: Regex,
    check_re: Regex,
    expected_error_re: Regex,
    expected_warning_re: Regex,
    flag_re: Regex,
    version_flag_re: Regex,
    version_text_re: Regex,
    runtime_call_re: Regex,
}

impl TestStructureExtractor {
    pub fn new() -> Self {
        Self {
            run_re: Regex::new(r"//\s*RUN:\s*(.+)").unwrap(),
            check_re: Regex::new(r"//\s*CHECK[^:]*:\s*(.+)").unwrap(),
            expected_error_re: Regex::new(r"//\s*expected-error[^:]*:\s*(.+)").unwrap(),
            expected_warning_re: Regex::new(r"//\s*expected-warning[^:]*:\s*(.+)").unwrap(),
            flag_re: Regex::new(r"-[a-zA-Z0-9-]+").unwrap(),
            version_flag_re: Regex::new(r"-fopenmp-version=(\d+)").unwrap(),
            version_text_re: Regex::new(r"(?i)OpenMP\s+(\d+\.\d+)").unwrap(),
            runtime_call_re: Regex::new(r"@(__kmpc_[a-zA-Z_]+|omp_[a-zA-Z_]+)").unwrap(),
        }
    }

    pub fn run_commands(&self, content: &str) -> Vec<String> {
        collect_captures(&self.run_re, content)
    }

    pub fn check_patterns(&self, content: &str) -> Vec<String> {
        collect_captures(&self.check_re, content)
    }

    pub fn expected_errors(&self, content: &str) -> Vec<String> {
        collect_captures(&self.expected_error_re, content)
    }

    pub fn expected_warnings(&self, content: &str) -> Vec<String> {
        collect_captures(&self.expected_warning_re, content)
    }

    /// First rule wins, in this fixed priority: sema, ast_print, codegen,
    /// parse, unknown.
    pub fn compiler_stage(&self, run_commands: &[String]) -> CompilerStage {
        let run_text = run_commands.join(" ").to_lowercase();

        if run_text.contains("-fsyntax-only") || run_text.contains("-verify") {
            CompilerStage::Sema
        } else if run_text.contains("-ast-print") || run_text.contains("-ast-dump") {
            CompilerStage::AstPrint
        } else if run_text.contains("-emit-llvm") || run_text.contains("filecheck") {
            CompilerStage::Codegen
        } else if run_commands.iter().any(|c| c.to_lowercase().contains("parse")) {
            CompilerStage::Parse
        } else {
            CompilerStage::Unknown
        }
    }

    /// Leading-dash tokens across all RUN commands, first-seen order, deduped.
    pub fn compiler_flags(&self, run_commands: &[String]) -> Vec<String> {
        let mut flags = Vec::new();
        for command in run_commands {
            for m in self.flag_re.find_iter(command) {
                let flag = m.as_str().to_string();
                if !flags.contains(&flag) {
                    flags.push(flag);
                }
            }
        }
        flags
    }

    /// `-fopenmp-version=<digits>` from RUN commands wins over an
    /// "OpenMP <major>.<minor>" mention in the body.
    pub fn openmp_version(&self, content: &str, run_commands: &[String]) -> Option<String> {
        for command in run_commands {
            if let Some(captures) = self.version_flag_re.captures(command) {
                return Some(captures[1].to_string());
            }
        }

        self.version_text_re
            .captures(content)
            .map(|captures| captures[1].to_string())
    }

    /// CHECK lines that mention any low-level instruction keyword.
    pub fn ir_patterns(&self, check_patterns: &[String]) -> Vec<String> {
        check_patterns
            .iter()
            .filter(|pattern| {
                let lower = pattern.to_lowercase();
                IR_KEYWORDS.iter().any(|kw| lower.contains(kw))
            })
            .cloned()
            .collect()
    }

    /// `@__kmpc_*` / `@omp_*` symbols from CHECK lines, first-seen order,
    /// deduped.
    pub fn runtime_calls(&self, check_patterns: &[String]) -> Vec<String> {
        let mut calls = Vec::new();
        for pattern in check_patterns {
            for captures in self.runtime_call_re.captures_iter(pattern) {
                let name = captures[1].to_string();
                if !calls.contains(&name) {
                    calls.push(name);
                }
            }
        }
        calls
    }
}

impl Default for TestStructureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_captures(re: &Regex, content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| re.captures(line))
        .map(|captures| captures[1].trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn extractor() -> TestStructureExtractor {
        TestStructureExtractor::new()
    }

    #[test]
    fn run_commands_in_encounter_order() {
        let source = indoc! {"
            // RUN: %clang_cc1 -fopenmp -fsyntax-only -verify %s
            // RUN: %clang_cc1 -fopenmp-simd -fsyntax-only -verify %s
            int main() { return 0; }
        "};
        let commands = extractor().run_commands(source);
        assert_eq!(commands.len(), 2);
        assert!(commands[0].contains("-fopenmp "));
        assert!(commands[1].contains("-fopenmp-simd"));
    }

    #[test]
    fn syntax_only_and_verify_mean_sema() {
        let commands = vec!["%tool -fsyntax-only -verify %s".to_string()];
        assert_eq!(extractor().compiler_stage(&commands), CompilerStage::Sema);
    }

    #[test]
    fn stage_priority_is_fixed() {
        let e = extractor();
        // -verify outranks -ast-print even when both appear.
        let both = vec!["%tool -verify -ast-print %s".to_string()];
        assert_eq!(e.compiler_stage(&both), CompilerStage::Sema);

        let ast = vec!["%tool -ast-dump %s".to_string()];
        assert_eq!(e.compiler_stage(&ast), CompilerStage::AstPrint);

        let codegen = vec!["%tool -emit-llvm %s | FileCheck %s".to_string()];
        assert_eq!(e.compiler_stage(&codegen), CompilerStage::Codegen);

        let parse = vec!["%tool -parse-only %s".to_string()];
        assert_eq!(e.compiler_stage(&parse), CompilerStage::Parse);

        let unknown = vec!["%tool %s".to_string()];
        assert_eq!(e.compiler_stage(&unknown), CompilerStage::Unknown);
        assert_eq!(e.compiler_stage(&[]), CompilerStage::Unknown);
    }

    #[test]
    fn flags_deduplicated_first_seen_order() {
        let commands = vec![
            "%clang_cc1 -fopenmp -fsyntax-only %s".to_string(),
            "%clang_cc1 -fopenmp -verify %s".to_string(),
        ];
        let flags = extractor().compiler_flags(&commands);
        assert_eq!(flags, vec!["-fopenmp", "-fsyntax-only", "-verify"]);
    }

    #[test]
    fn version_flag_wins_over_body_text() {
        let e = extractor();
        let content = "// Requires OpenMP 4.5 semantics\n";
        let commands = vec!["%tool -fopenmp-version=51 %s".to_string()];
        assert_eq!(e.openmp_version(content, &commands), Some("51".to_string()));
        assert_eq!(e.openmp_version(content, &[]), Some("4.5".to_string()));
        assert_eq!(e.openmp_version("int main() {}", &[]), None);
    }

    #[test]
    fn check_patterns_and_ir_subset() {
        let source = indoc! {"
            // CHECK: define {{.*}}void @foo()
            // CHECK-NEXT: call void @__kmpc_fork_call
            // CHECK-DAG: omp parallel
            // CHECK: %1 = alloca i32
        "};
        let e = extractor();
        let checks = e.check_patterns(source);
        assert_eq!(checks.len(), 4);

        let ir = e.ir_patterns(&checks);
        assert_eq!(ir.len(), 3);
        assert!(ir.iter().all(|p| !p.contains("omp parallel")));
    }

    #[test]
    fn runtime_calls_deduplicated() {
        let checks = vec![
            "call void @__kmpc_fork_call(".to_string(),
            "call void @__kmpc_fork_call(".to_string(),
            "call i32 @omp_get_thread_num()".to_string(),
        ];
        let calls = extractor().runtime_calls(&checks);
        assert_eq!(calls, vec!["__kmpc_fork_call", "omp_get_thread_num"]);
    }

    #[test]
    fn expected_annotations_extracted_separately() {
        let source = indoc! {r#"
            #pragma omp parallel unknown(x) // expected-error: unexpected OpenMP clause 'unknown'
            int y; // expected-warning@+1: unused variable 'y'
        "#};
        let e = extractor();
        let errors = e.expected_errors(source);
        let warnings = e.expected_warnings(source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "unexpected OpenMP clause 'unknown'");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0], "unused variable 'y'");
    }

    #[test]
    fn no_annotations_is_empty_not_error() {
        let e = extractor();
        assert!(e.run_commands("int main() {}").is_empty());
        assert!(e.check_patterns("int main() {}").is_empty());
        assert!(e.expected_errors("int main() {}").is_empty());
        assert!(e.expected_warnings("int main() {}").is_empty());
    }
}
