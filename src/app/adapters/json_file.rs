//! JSON-file record store
//!
//! Keeps one collection in `<dir>/<collection>.json` as an array of
//! `{ "id": ..., "fields": { ... } }` objects. Every write rewrites the file
//! through a temporary sibling and a rename, so a crash never leaves a
//! half-written collection.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::record_store::{RecordStore, StoreError, StoreResult, project};
use crate::app::models::{ExistingRecord, FieldMap, RecordId, field_map_to_json};

/// Record store backed by a JSON file per collection
#[derive(Debug)]
pub struct JsonFileStore {
    collection: String,
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store for `collection` inside `dir`
    pub fn new(dir: &Path, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        let path = dir.join(format!("{}.json", file_stem(&collection)));
        Self {
            collection,
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<Vec<ExistingRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No file for '{}' yet; treating as empty", self.collection);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::io(
                    format!("Failed to read {}", self.path.display()),
                    e,
                ));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::serialization(format!("Invalid records in {}", self.path.display()), e)
        })
    }

    async fn save(&self, records: &[ExistingRecord]) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::serialization("Failed to encode records", e))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::io(format!("Failed to create {}", parent.display()), e)
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::io(format!("Failed to write {}", tmp.display()), e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::io(format!("Failed to replace {}", self.path.display()), e))
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn fetch_all(&self, fields: Option<&[&str]>) -> StoreResult<Vec<ExistingRecord>> {
        let records = self.load().await?;
        info!(
            "Fetched {} records from '{}' ({})",
            records.len(),
            self.collection,
            self.path.display()
        );
        Ok(project(records, fields))
    }

    async fn create_record(&self, fields: FieldMap) -> StoreResult<RecordId> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let id = next_record_id(&records);
        records.push(ExistingRecord {
            id: id.clone(),
            fields: field_map_to_json(&fields),
        });
        self.save(&records).await?;

        debug!("Created {} in '{}'", id, self.collection);
        Ok(id)
    }

    async fn update_record(&self, id: &RecordId, fields: FieldMap) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let record = records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| StoreError::not_found(id.clone()))?;
        record.apply(&fields);
        self.save(&records).await?;

        debug!("Updated {} in '{}'", id, self.collection);
        Ok(())
    }
}

/// Next free `recNNNNNN` identifier
fn next_record_id(records: &[ExistingRecord]) -> RecordId {
    let max = records
        .iter()
        .filter_map(|record| record.id.0.strip_prefix("rec"))
        .filter_map(|n| n.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    RecordId(format!("rec{:06}", max + 1))
}

/// File-system friendly form of a collection name
fn file_stem(collection: &str) -> String {
    collection
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
