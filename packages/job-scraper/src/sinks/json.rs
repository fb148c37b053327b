//! JSON output: one pretty-printed array of records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SinkError;
use crate::traits::RecordSink;
use crate::types::JobRecord;

/// Writes records as a JSON array using the output column names as keys.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl JsonSink<BufWriter<File>> {
    /// Create (or truncate) a JSON file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn write_records(&mut self, records: &[JobRecord]) -> Result<(), SinkError> {
        serde_json::to_writer_pretty(&mut self.writer, records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
