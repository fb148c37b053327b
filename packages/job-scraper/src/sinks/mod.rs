//! Record sinks.

pub mod csv;
pub mod json;

pub use self::csv::CsvSink;
pub use self::json::JsonSink;

use std::path::Path;

use crate::error::SinkError;
use crate::traits::RecordSink;

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Open a file sink for the chosen format.
///
/// The file is created immediately, so a bad path is reported here rather
/// than after a run.
pub fn create_sink(path: &Path, format: OutputFormat) -> Result<Box<dyn RecordSink>, SinkError> {
    Ok(match format {
        OutputFormat::Csv => Box::new(CsvSink::create(path)?),
        OutputFormat::Json => Box::new(JsonSink::create(path)?),
    })
}
