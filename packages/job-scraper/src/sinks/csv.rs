//! CSV output: header row, then one row per record.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::SinkError;
use crate::traits::RecordSink;
use crate::types::JobRecord;

const SEPARATOR: char = ',';

fn needs_quotes(cell: &str) -> bool {
    cell.contains(SEPARATOR) || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

/// Write one row, quoting cells that need it (`"` doubled inside quotes).
fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if first {
            first = false;
        } else {
            write!(w, "{}", SEPARATOR)?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Writes records as CSV with the [`JobRecord::COLUMNS`] header.
///
/// The header is written even for an empty run.
pub struct CsvSink<W: Write> {
    writer: W,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) a CSV file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_records(&mut self, records: &[JobRecord]) -> Result<(), SinkError> {
        write_row(&mut self.writer, &JobRecord::COLUMNS[..])?;
        for record in records {
            write_row(&mut self.writer, &record.to_row())?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
