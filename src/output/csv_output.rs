//! CSV record sink

use crate::output::traits::{OutputResult, RecordSink};
use crate::storage::ExtractedRecord;
use std::path::{Path, PathBuf};

/// Header row of the output file
pub const CSV_HEADER: [&str; 3] = ["Company Name", "Phone Number", "Email"];

/// Writes records to a UTF-8 CSV file with a header row
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSink for CsvSink {
    fn write_records(&self, records: &[ExtractedRecord]) -> OutputResult<usize> {
        // The header is written by hand so that an empty run still produces it.
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        wtr.write_record(CSV_HEADER)?;
        for record in records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;

        tracing::info!(
            "Data successfully saved to {} ({} records)",
            self.path.display(),
            records.len()
        );
        Ok(records.len())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
