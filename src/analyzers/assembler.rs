use crate::analyzers::ast_walker::{AstWalker, WalkOutcome};
use crate::analyzers::category::categorize_test;
use crate::analyzers::classify::classify_raw;
use crate::analyzers::complexity::{complexity_score, ComplexityInputs};
use crate::analyzers::correlation::ErrorCorrelator;
use crate::analyzers::directives::DirectiveExtractor;
use crate::analyzers::structure::TestStructureExtractor;
use crate::core::errors::ExtractError;
use crate::core::{AnalysisRecord, Diagnostic, DiagnosticKind, Directive};
use crate::parsing::{ParseTree, SourceParser};
use anyhow::Result;
use chrono::Utc;
use log::{debug, warn};
use std::collections::HashSet;
use std::path::Path;

/// Assembles one immutable [`AnalysisRecord`] per file from the extraction
/// components. The parser is a capability injected at construction; its
/// failure degrades the record to text-only signals and is never fatal. A
/// record is refused only when the file itself cannot be read.
pub struct RecordAssembler {
    parser: Box<dyn SourceParser>,
    parser_args: Vec<String>,
    directives: DirectiveExtractor,
    structure: TestStructureExtractor,
    correlator: ErrorCorrelator,
    walker: AstWalker,
}

impl RecordAssembler {
    pub fn new(parser: Box<dyn SourceParser>, parser_args: Vec<String>) -> Self {
        Self {
            parser,
            parser_args,
            directives: DirectiveExtractor::new(),
            structure: TestStructureExtractor::new(),
            correlator: ErrorCorrelator::new(),
            walker: AstWalker::new(),
        }
    }

    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisRecord> {
        let bytes = std::fs::read(path).map_err(|source| ExtractError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let file_size = bytes.len() as u64;
        // Invalid UTF-8 is tolerated, not fatal.
        let content = String::from_utf8_lossy(&bytes).into_owned();

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let run_commands = self.structure.run_commands(&content);
        let compiler_flags = self.structure.compiler_flags(&run_commands);
        let compiler_stage = self.structure.compiler_stage(&run_commands);
        let openmp_version = self.structure.openmp_version(&content, &run_commands);
        let check_patterns = self.structure.check_patterns(&content);
        let expected_errors = self.structure.expected_errors(&content);
        let expected_warnings = self.structure.expected_warnings(&content);

        let tree = self.parse_degrading(path);
        let walk = match &tree.root {
            Some(root) => self.walker.walk(root, &self.directives),
            None => WalkOutcome::default(),
        };

        let directives = merge_directives(
            self.directives.extract_from_text(&content),
            walk.token_directives,
        );

        let diagnostics: Vec<Diagnostic> = tree.diagnostics.iter().map(classify_raw).collect();
        let diagnostic_kinds = distinct_kinds(&diagnostics);
        if !diagnostics.is_empty() {
            debug!(
                "{}: {} diagnostics, likely a negative test",
                path.display(),
                diagnostics.len()
            );
        }

        let expected_annotations = self
            .correlator
            .expected_annotations(&expected_errors, &content);
        let trigger_mechanisms = self.correlator.trigger_mechanisms(&content);
        let negative_profile = self.correlator.profile(
            &file_name,
            &content,
            &expected_annotations,
            &diagnostics,
            trigger_mechanisms.len(),
        );

        let ir_patterns = self.structure.ir_patterns(&check_patterns);
        let runtime_calls = self.structure.runtime_calls(&check_patterns);

        let test_category = categorize_test(&file_name, &directives, &content);
        let score = complexity_score(&ComplexityInputs::from_features(
            &directives,
            &check_patterns,
            &expected_errors,
            walk.functions.len(),
            &diagnostics,
            &diagnostic_kinds,
        ));

        Ok(AnalysisRecord {
            file_path: path.to_path_buf(),
            file_name,
            file_size,
            line_count: content.lines().count(),
            compiler_stage,
            run_commands,
            compiler_flags,
            directives,
            openmp_version,
            test_category,
            check_patterns,
            expected_errors,
            expected_warnings,
            ast_nodes: walk.nodes,
            functions: walk.functions,
            variables: walk.variables,
            includes: walk.includes,
            ir_patterns,
            runtime_calls,
            diagnostics,
            expected_annotations,
            negative_profile,
            trigger_mechanisms,
            diagnostic_kinds,
            traversal_anomalies: walk.anomalies,
            complexity_score: score,
            created_at: Utc::now(),
        })
    }

    /// Invokes the front end; any failure degrades to an empty tree so the
    /// analysis proceeds on text-level signals alone.
    fn parse_degrading(&self, path: &Path) -> ParseTree {
        match self.parser.parse(path, &self.parser_args) {
            Ok(tree) => {
                if tree.is_degraded() {
                    debug!("{}: parser returned no tree, text-only analysis", path.display());
                }
                tree
            }
            Err(err) => {
                warn!("{}: parser failed ({err:#}), text-only analysis", path.display());
                ParseTree::default()
            }
        }
    }
}

/// Text-scan directives are authoritative; token-reconstructed ones only fill
/// in lines the text scan missed (macro-expanded pragmas).
fn merge_directives(text: Vec<Directive>, token: Vec<Directive>) -> Vec<Directive> {
    let covered: HashSet<usize> = text.iter().map(|d| d.line_number).collect();
    let mut merged = text;
    merged.extend(
        token
            .into_iter()
            .filter(|d| !covered.contains(&d.line_number)),
    );
    merged
}

fn distinct_kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
    let mut kinds = Vec::new();
    for diagnostic in diagnostics {
        if !kinds.contains(&diagnostic.kind) {
            kinds.push(diagnostic.kind);
        }
    }
    kinds
}
