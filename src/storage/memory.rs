//! Volatile in-memory engine
//!
//! Selected with the `memory://` connection string. Contents are lost when
//! the process exits.

use std::sync::RwLock;

use crate::record::{validate_fields, Record, RecordFields};

use super::collection::{now_millis, Collection};
use super::errors::{StoreError, StoreResult};
use super::RecordStore;

/// In-memory record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<Record>> {
        let records = self.records.read().map_err(|_| StoreError::lock_poisoned())?;
        Ok(records.list())
    }

    fn insert(&self, fields: &RecordFields) -> StoreResult<Record> {
        let valid = validate_fields(fields)?;
        let mut records = self.records.write().map_err(|_| StoreError::lock_poisoned())?;

        let record = records.build_insert(valid, now_millis());
        records.put(record.clone());
        Ok(record)
    }

    fn replace(&self, id: &str, fields: &RecordFields) -> StoreResult<Record> {
        let valid = validate_fields(fields)?;
        let mut records = self.records.write().map_err(|_| StoreError::lock_poisoned())?;

        let record = records.build_replace(id, valid, now_millis())?;
        records.put(record.clone());
        Ok(record)
    }

    fn remove(&self, id: &str) -> StoreResult<Record> {
        let mut records = self.records.write().map_err(|_| StoreError::lock_poisoned())?;
        records.remove(id)
    }

    fn count(&self) -> StoreResult<usize> {
        let records = self.records.read().map_err(|_| StoreError::lock_poisoned())?;
        Ok(records.len())
    }
}
