//! Candidate index for O(1) identity lookups
//!
//! Holds a read-only snapshot of the target collection, fetched once per
//! import run, and indexes it by normalized `(first, last)` name. Matching
//! is exact after trimming and lowercasing both halves.
//!
//! When the collection itself holds two records with the same normalized
//! identity, the first one in fetch order is indexed and the other is
//! reported as a duplicate. Nothing else breaks the tie.

use crate::app::models::{ExistingRecord, IdentityKey};
use std::collections::HashMap;
use std::time::Instant;

pub mod loader;
pub mod metadata;
pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use metadata::LoadStats;

/// Collection fields holding the first and last name of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFields {
    pub first: String,
    pub last: String,
}

impl IdentityFields {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }
}

/// Snapshot of existing records indexed by normalized identity
#[derive(Debug, Clone)]
pub struct CandidateIndex {
    /// Records in fetch order
    pub(crate) records: Vec<ExistingRecord>,

    /// Normalized identity to position in `records`
    pub(crate) by_identity: HashMap<IdentityKey, usize>,

    pub(crate) identity_fields: IdentityFields,

    /// Collection the snapshot was taken from
    pub(crate) collection: String,

    pub(crate) load_time: Instant,
}

impl CandidateIndex {
    /// Create an empty index
    pub fn new(collection: impl Into<String>, identity_fields: IdentityFields) -> Self {
        Self {
            records: Vec::new(),
            by_identity: HashMap::new(),
            identity_fields,
            collection: collection.into(),
            load_time: Instant::now(),
        }
    }

    /// Number of records in the snapshot
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct identities that can be matched
    pub fn identity_count(&self) -> usize {
        self.by_identity.len()
    }

    pub fn identity_fields(&self) -> &IdentityFields {
        &self.identity_fields
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// When the snapshot was taken
    pub fn load_time(&self) -> Instant {
        self.load_time
    }
}
