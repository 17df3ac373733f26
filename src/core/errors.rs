use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for the extraction pipeline.
///
/// Only conditions that refuse a record (or a whole batch) are errors here.
/// A degraded parse, a single bad tree node, or an extraction pass with no
/// matches are valid outcomes, not errors: the first two are logged and
/// recorded in the anomaly log, the last simply yields an empty list.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file itself could not be read; the only condition that refuses a
    /// per-file record.
    #[error("cannot read {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A batch run produced no records at all.
    #[error("no records produced from {candidates} candidate files")]
    EmptyBatch { candidates: usize },
}
