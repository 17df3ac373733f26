//! External-parser capability.
//!
//! The pipeline consumes a front end, it does not implement one. The parser
//! is injected at construction behind [`SourceParser`], so tests can supply a
//! deterministic fake tree and production can wire in whatever front end is
//! available. A fatal parse is expressed as an empty tree, never a crash.

use anyhow::Result;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    TranslationUnit,
    FunctionDecl,
    ParmDecl,
    VarDecl,
    InclusionDirective,
    Other(String),
}

impl NodeKind {
    pub fn name(&self) -> &str {
        match self {
            NodeKind::TranslationUnit => "TranslationUnit",
            NodeKind::FunctionDecl => "FunctionDecl",
            NodeKind::ParmDecl => "ParmDecl",
            NodeKind::VarDecl => "VarDecl",
            NodeKind::InclusionDirective => "InclusionDirective",
            NodeKind::Other(name) => name,
        }
    }
}

/// One lexical token from a node's token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub spelling: String,
    pub line: usize,
}

impl Token {
    pub fn new(spelling: impl Into<String>, line: usize) -> Self {
        Self {
            spelling: spelling.into(),
            line,
        }
    }
}

/// A raw message as reported by the front end, before classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDiagnostic {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub severity: String,
}

/// An owned parse-tree node. The shape mirrors what a clang-style cursor
/// exposes: kind, spelling, location, type info, children and a token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub kind: NodeKind,
    pub spelling: String,
    pub line: usize,
    pub column: usize,
    /// Declared type, for variable and parameter declarations.
    pub type_name: Option<String>,
    /// Return type, for function declarations.
    pub result_type: Option<String>,
    /// File the node's location points into, when the front end reports one.
    pub source_path: Option<PathBuf>,
    pub tokens: Vec<Token>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(kind: NodeKind, spelling: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            line,
            column,
            type_name: None,
            result_type: None,
            source_path: None,
            tokens: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_result_type(mut self, result_type: impl Into<String>) -> Self {
        self.result_type = Some(result_type.into());
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// "line:col" as the node summaries report it.
    pub fn location(&self) -> String {
        format!("{}:{}", self.line, self.column)
    }
}

/// What one parser invocation yields. `root: None` means the front end failed
/// fatally; downstream analysis degrades to text-only signals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseTree {
    pub root: Option<TreeNode>,
    pub diagnostics: Vec<RawDiagnostic>,
}

impl ParseTree {
    pub fn is_degraded(&self) -> bool {
        self.root.is_none()
    }
}

pub trait SourceParser: Send + Sync {
    fn parse(&self, path: &Path, args: &[String]) -> Result<ParseTree>;
}

/// Parser used when no real front end is wired in: every file parses to an
/// empty tree, so analysis runs on text-level signals alone.
pub struct NullParser;

impl SourceParser for NullParser {
    fn parse(&self, _path: &Path, _args: &[String]) -> Result<ParseTree> {
        Ok(ParseTree::default())
    }
}
