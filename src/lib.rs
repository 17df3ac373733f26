// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{
    AnalysisRecord, AstNodeSummary, CompilerStage, Diagnostic, DiagnosticKind, Directive,
    ErrorCorrelation, ExpectedAnnotation, ExpectedKind, FunctionDecl, IncludeDecl, MatchedLine,
    NegativeTestProfile, ParamDecl, TestCategory, TestingStrategy, VariableDecl,
};

pub use crate::analyzers::{BatchSummary, CorpusAnalyzer, RecordAssembler};
pub use crate::parsing::{NodeKind, NullParser, ParseTree, RawDiagnostic, SourceParser, Token, TreeNode};
pub use crate::stats::AnalysisStats;
