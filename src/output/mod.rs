//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing the collected records to a CSV file
//! - Guarding that write so it happens once per run
//! - Recording and printing crawl statistics

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{CsvSink, CSV_HEADER};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, RecordSink};

use crate::storage::RecordStore;
use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot bridge between the record store and a sink
///
/// The first call to [`Flusher::flush`] snapshots the store and writes it;
/// every later call fails with [`OutputError::AlreadyFlushed`] without touching
/// the sink, whatever the outcome of the first write was.
pub struct Flusher {
    sink: Box<dyn RecordSink + Send + Sync>,
    records: RecordStore,
    flushed: AtomicBool,
}

impl Flusher {
    pub fn new(sink: Box<dyn RecordSink + Send + Sync>, records: RecordStore) -> Self {
        Self {
            sink,
            records,
            flushed: AtomicBool::new(false),
        }
    }

    /// Writes every record collected so far
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of records written
    /// * `Err(OutputError)` - The write failed or a flush already happened
    pub fn flush(&self) -> OutputResult<usize> {
        if self
            .flushed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(OutputError::AlreadyFlushed);
        }

        let records = self.records.snapshot();
        tracing::info!(
            "Flushing {} records to {}",
            records.len(),
            self.sink.destination()
        );
        self.sink.write_records(&records)
    }
}
