//! In-memory record store
//!
//! Backs dry runs and tests. Supports failure injection so partial-failure
//! behaviour of an import run can be exercised.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::record_store::{RecordStore, StoreError, StoreResult, project};
use crate::app::models::{ExistingRecord, FieldMap, RecordId, field_map_to_json};

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<ExistingRecord>,
    next_id: usize,
    writes_attempted: usize,
    fetches: usize,
}

/// Record store holding one collection in memory
#[derive(Debug)]
pub struct MemoryStore {
    collection: String,
    state: Mutex<MemoryState>,
    fail_on_write: Option<usize>,
    fail_fetch: bool,
}

impl MemoryStore {
    pub fn new(collection: impl Into<String>) -> Self {
        Self::with_records(collection, Vec::new())
    }

    /// Seed the store with existing records, kept in the given order
    pub fn with_records(collection: impl Into<String>, records: Vec<ExistingRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|record| record.id.0.strip_prefix("rec"))
            .filter_map(|n| n.parse::<usize>().ok())
            .max()
            .unwrap_or(0)
            .max(records.len())
            + 1;
        Self {
            collection: collection.into(),
            state: Mutex::new(MemoryState {
                records,
                next_id,
                ..Default::default()
            }),
            fail_on_write: None,
            fail_fetch: false,
        }
    }

    /// Reject the `n`-th write (1-based) and every write after it
    pub fn failing_on_write(mut self, n: usize) -> Self {
        self.fail_on_write = Some(n);
        self
    }

    /// Make every fetch fail as if the store were unreachable
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Snapshot of the current records
    pub async fn records(&self) -> Vec<ExistingRecord> {
        self.state.lock().await.records.clone()
    }

    pub async fn record_count(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Number of `fetch_all` calls served
    pub async fn fetch_count(&self) -> usize {
        self.state.lock().await.fetches
    }

    /// Number of create/update calls received, including rejected ones
    pub async fn writes_attempted(&self) -> usize {
        self.state.lock().await.writes_attempted
    }

    fn check_write(&self, state: &mut MemoryState) -> StoreResult<()> {
        state.writes_attempted += 1;
        match self.fail_on_write {
            Some(n) if state.writes_attempted >= n => Err(StoreError::rejected(format!(
                "injected failure on write {}",
                state.writes_attempted
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn fetch_all(&self, fields: Option<&[&str]>) -> StoreResult<Vec<ExistingRecord>> {
        if self.fail_fetch {
            return Err(StoreError::unavailable(format!(
                "collection '{}' is unreachable",
                self.collection
            )));
        }

        let mut state = self.state.lock().await;
        state.fetches += 1;
        Ok(project(state.records.clone(), fields))
    }

    async fn create_record(&self, fields: FieldMap) -> StoreResult<RecordId> {
        let mut state = self.state.lock().await;
        self.check_write(&mut state)?;

        let id = RecordId(format!("rec{:06}", state.next_id));
        state.next_id += 1;
        state.records.push(ExistingRecord {
            id: id.clone(),
            fields: field_map_to_json(&fields),
        });

        debug!("Created {} in '{}'", id, self.collection);
        Ok(id)
    }

    async fn update_record(&self, id: &RecordId, fields: FieldMap) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        self.check_write(&mut state)?;

        let record = state
            .records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| StoreError::not_found(id.clone()))?;
        record.apply(&fields);

        debug!("Updated {} in '{}'", id, self.collection);
        Ok(())
    }
}
