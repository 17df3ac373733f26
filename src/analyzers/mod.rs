pub mod assembler;
pub mod ast_walker;
pub mod category;
pub mod classify;
pub mod complexity;
pub mod correlation;
pub mod directives;
pub mod structure;

pub use assembler::RecordAssembler;

use crate::core::errors::ExtractError;
use crate::io::output::RecordSink;
use crate::parsing::SourceParser;
use crate::stats::AnalysisStats;
use anyhow::Result;
use log::{info, warn};
use std::path::PathBuf;

#[derive(Debug)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub stats: AnalysisStats,
}

/// Drives the per-file pipeline over a corpus, one file at a time. Per-file
/// failures are isolated; the batch fails only when zero records were
/// produced.
pub struct CorpusAnalyzer {
    assembler: RecordAssembler,
}

impl CorpusAnalyzer {
    pub fn new(parser: Box<dyn SourceParser>, parser_args: Vec<String>) -> Self {
        Self {
            assembler: RecordAssembler::new(parser, parser_args),
        }
    }

    pub fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }

    pub fn analyze_all(
        &self,
        files: &[PathBuf],
        sink: &mut dyn RecordSink,
    ) -> Result<BatchSummary> {
        info!("analyzing {} candidate files", files.len());

        let mut stats = AnalysisStats::default();
        let mut succeeded = 0usize;
        let mut failed = 0usize;

        for (i, file) in files.iter().enumerate() {
            let outcome = self.assembler.analyze_file(file).and_then(|record| {
                stats.observe(&record);
                sink.store(record)
            });

            match outcome {
                Ok(()) => succeeded += 1,
                Err(err) => {
                    failed += 1;
                    warn!("failed to analyze {}: {err:#}", file.display());
                }
            }

            if (i + 1) % 50 == 0 {
                info!("progress: {}/{} files processed", i + 1, files.len());
            }
        }

        if succeeded == 0 {
            return Err(ExtractError::EmptyBatch {
                candidates: files.len(),
            }
            .into());
        }

        info!("analysis complete: {succeeded} succeeded, {failed} failed");
        Ok(BatchSummary {
            succeeded,
            failed,
            stats,
        })
    }
}
