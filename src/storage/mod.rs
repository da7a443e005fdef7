//! In-memory storage for extracted contact records
//!
//! Records accumulate here for the whole run and are only written to disk by the
//! output layer at flush time.

mod record_store;

pub use record_store::{ExtractedRecord, RecordStore};
