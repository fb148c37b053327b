//! Output sink for finished records.

use crate::error::SinkError;
use crate::types::JobRecord;

/// Accepts the full record sequence once, at the end of a run.
pub trait RecordSink {
    fn write_records(&mut self, records: &[JobRecord]) -> Result<(), SinkError>;
}
