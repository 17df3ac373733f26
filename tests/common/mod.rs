use anyhow::{anyhow, Result};
use ompminer::parsing::{NodeKind, ParseTree, RawDiagnostic, SourceParser, Token, TreeNode};
use std::path::Path;

/// Deterministic stand-in for the external front end: returns the same tree
/// and diagnostics for every path.
pub struct FakeParser {
    tree: ParseTree,
}

impl FakeParser {
    pub fn new(tree: ParseTree) -> Self {
        Self { tree }
    }
}

impl SourceParser for FakeParser {
    fn parse(&self, _path: &Path, _args: &[String]) -> Result<ParseTree> {
        Ok(self.tree.clone())
    }
}

/// Front end that fails outright; the pipeline must degrade, not crash.
pub struct FailingParser;

impl SourceParser for FailingParser {
    fn parse(&self, path: &Path, _args: &[String]) -> Result<ParseTree> {
        Err(anyhow!("front end crashed on {}", path.display()))
    }
}

/// Source fixture used by the pipeline tests. Line numbers matter: the
/// pragmas sit on lines 6, 8 and 10, the expected-error annotation on line 9.
pub const FIXTURE_SOURCE: &str = "\
// RUN: %clang_cc1 -fopenmp -fsyntax-only -verify %s
// OpenMP 4.5 messages test
int global;

void foo(int n) {
#pragma omp parallel private(n) shared(global)
  ;
#pragma omp parallel unknown_clause(n)
// expected-error@-1: unexpected OpenMP clause 'unknown_clause'
#pragma omp
}
";

/// Parse tree matching [`FIXTURE_SOURCE`], shaped like what a front end
/// would report for it.
pub fn fixture_tree() -> ParseTree {
    let pragma_tokens = vec![
        Token::new("#", 6),
        Token::new("pragma", 6),
        Token::new("omp", 6),
        Token::new("parallel", 6),
        Token::new("private", 6),
        Token::new("(", 6),
        Token::new("n", 6),
        Token::new(")", 6),
    ];

    let global = TreeNode::new(NodeKind::VarDecl, "global", 3, 5).with_type("int");
    let param = TreeNode::new(NodeKind::ParmDecl, "n", 5, 14).with_type("int");
    let body = TreeNode::new(NodeKind::Other("CompoundStmt".to_string()), "", 5, 18)
        .with_tokens(pragma_tokens);
    let foo = TreeNode::new(NodeKind::FunctionDecl, "foo", 5, 6)
        .with_result_type("void")
        .with_children(vec![param, body]);
    let root = TreeNode::new(NodeKind::TranslationUnit, "parallel_messages.c", 0, 0)
        .with_children(vec![global, foo]);

    ParseTree {
        root: Some(root),
        diagnostics: vec![RawDiagnostic {
            message: "unexpected OpenMP clause 'unknown_clause' in directive".to_string(),
            line: 8,
            column: 22,
            severity: "error".to_string(),
        }],
    }
}
