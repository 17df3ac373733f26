use crate::core::AnalysisRecord;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Append-only destination for finished records; ownership of each record
/// transfers to the sink on emission.
pub trait RecordSink {
    fn store(&mut self, record: AnalysisRecord) -> Result<()>;
}

/// Collects records in memory; used by the CLI before export and by tests.
#[derive(Default)]
pub struct MemorySink {
    pub records: Vec<AnalysisRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn store(&mut self, record: AnalysisRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }
}

/// Streams one JSON object per line as records are produced.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> RecordSink for JsonlSink<W> {
    fn store(&mut self, record: AnalysisRecord) -> Result<()> {
        let json = serde_json::to_string(&record)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub total_records: usize,
    pub export_timestamp: DateTime<Utc>,
}

/// Export envelope: metadata plus the full record list. Reading one back
/// yields records equal to the originals in every field; timestamps are
/// preserved, not regenerated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportFile {
    pub metadata: ExportMetadata,
    pub records: Vec<AnalysisRecord>,
}

impl ExportFile {
    pub fn new(records: Vec<AnalysisRecord>) -> Self {
        Self {
            metadata: ExportMetadata {
                total_records: records.len(),
                export_timestamp: Utc::now(),
            },
            records,
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        writer.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Ok(serde_json::from_str(&buf)?)
    }
}
