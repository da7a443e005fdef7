//! Output sink trait and error types

use crate::storage::ExtractedRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Records have already been flushed for this run")]
    AlreadyFlushed,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the records collected during a run
pub trait RecordSink {
    /// Writes all records, replacing whatever the destination held before
    ///
    /// # Returns
    ///
    /// The number of records written
    fn write_records(&self, records: &[ExtractedRecord]) -> OutputResult<usize>;

    /// Human-readable description of where records go
    fn destination(&self) -> String;
}
