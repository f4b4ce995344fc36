//! Record store boundary
//!
//! The import engine reads and writes the roster only through this trait.
//! One store instance is bound to one collection. Implementations own any
//! retry policy; the engine never retries.

use async_trait::async_trait;

use crate::app::models::{ExistingRecord, FieldMap, RecordId};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures at the record-store boundary
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The store could not be reached
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    /// The store refused a write
    #[error("write rejected: {message}")]
    Rejected { message: String },

    /// An update addressed a record that does not exist
    #[error("record not found: {id}")]
    NotFound { id: RecordId },

    /// Backing file could not be read or written
    #[error("store I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored data could not be (de)serialized
    #[error("store data error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn not_found(id: RecordId) -> Self {
        Self::NotFound { id }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }
}

/// Async access to one collection of roster records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Name of the bound collection, for diagnostics
    fn collection(&self) -> &str;

    /// Fetch every record in store order, optionally projected onto `fields`
    async fn fetch_all(&self, fields: Option<&[&str]>) -> StoreResult<Vec<ExistingRecord>>;

    /// Create a record and return its identifier
    async fn create_record(&self, fields: FieldMap) -> StoreResult<RecordId>;

    /// Overwrite the given fields of an existing record
    async fn update_record(&self, id: &RecordId, fields: FieldMap) -> StoreResult<()>;
}

/// Keep only the named fields of each record
pub(crate) fn project(records: Vec<ExistingRecord>, fields: Option<&[&str]>) -> Vec<ExistingRecord> {
    let Some(fields) = fields else {
        return records;
    };

    records
        .into_iter()
        .map(|mut record| {
            record.fields.retain(|name, _| fields.contains(&name.as_str()));
            record
        })
        .collect()
}
