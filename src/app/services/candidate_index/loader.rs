//! Candidate index loading
//!
//! Fetches the whole target collection once and builds the identity index.

use std::collections::hash_map::Entry;
use std::time::Instant;
use tracing::{info, warn};

use super::metadata::LoadStats;
use super::{CandidateIndex, IdentityFields};
use crate::Result;
use crate::app::adapters::record_store::RecordStore;
use crate::app::models::{ExistingRecord, IdentityKey};

impl CandidateIndex {
    /// Fetch the collection behind `store` and index it
    ///
    /// Only the identity fields plus `extra_fields` are requested. This is
    /// the single read of the collection for a run.
    ///
    /// # Errors
    /// * Returns `Error::Store` when the fetch fails
    pub async fn load(
        store: &dyn RecordStore,
        identity_fields: IdentityFields,
        extra_fields: &[&str],
    ) -> Result<(Self, LoadStats)> {
        let start_time = Instant::now();
        info!(
            "Loading candidate index from '{}' (identity: '{}' / '{}')",
            store.collection(),
            identity_fields.first,
            identity_fields.last
        );

        let mut fields = vec![identity_fields.first.as_str(), identity_fields.last.as_str()];
        fields.extend(extra_fields.iter().copied());

        let records = store.fetch_all(Some(fields.as_slice())).await?;

        let (index, mut stats) =
            Self::from_records(store.collection(), identity_fields, records);
        stats.load_duration = start_time.elapsed();

        info!("{}", stats.summary());
        Ok((index, stats))
    }

    /// Build an index from records already fetched, keeping fetch order
    pub fn from_records(
        collection: impl Into<String>,
        identity_fields: IdentityFields,
        records: Vec<ExistingRecord>,
    ) -> (Self, LoadStats) {
        let mut index = Self::new(collection, identity_fields);
        let mut stats = LoadStats::new();
        stats.records_fetched = records.len();

        for (position, record) in records.iter().enumerate() {
            let first = record.cell_as_string(&index.identity_fields.first);
            let last = record.cell_as_string(&index.identity_fields.last);

            if first.trim().is_empty() || last.trim().is_empty() {
                stats.blank_identities += 1;
                continue;
            }

            match index.by_identity.entry(IdentityKey::new(&first, &last)) {
                Entry::Vacant(e) => {
                    e.insert(position);
                    stats.records_indexed += 1;
                }
                Entry::Occupied(e) => {
                    // First record in fetch order wins
                    warn!(
                        "Duplicate identity '{} {}' in '{}': {} shadowed by {}",
                        first.trim(),
                        last.trim(),
                        index.collection,
                        record.id,
                        records[*e.get()].id
                    );
                    stats.duplicate_identities += 1;
                }
            }
        }

        index.records = records;
        (index, stats)
    }
}
