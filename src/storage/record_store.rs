use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One contact tuple attributed to a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    #[serde(rename = "Company Name")]
    pub company_name: String,

    #[serde(rename = "Phone Number")]
    pub phone: String,

    #[serde(rename = "Email")]
    pub email: String,
}

impl ExtractedRecord {
    pub fn new(
        company_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// Append-only, ordered collection of records shared between the crawl loop and the flush path
///
/// Cloning the store clones the handle, not the records. Every append takes the
/// lock for exactly one record, so a concurrent `snapshot` always sees a fully
/// formed prefix of the collection order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<Mutex<Vec<ExtractedRecord>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single record
    pub fn push(&self, record: ExtractedRecord) {
        self.lock().push(record);
    }

    /// Copies the records collected so far, in collection order
    pub fn snapshot(&self) -> Vec<ExtractedRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-pushed record behind,
    // so the data is still usable after poisoning.
    fn lock(&self) -> MutexGuard<'_, Vec<ExtractedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
