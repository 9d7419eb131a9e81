//! In-memory collection state shared by both engines
//!
//! Records are kept in insertion order. Builders produce the next state of a
//! record without committing it, so a durable engine can log the change
//! first and apply it after the write succeeds.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

use crate::record::{Record, ValidatedFields};

use super::errors::{StoreError, StoreResult};

/// Current time truncated to the wire precision.
pub(crate) fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Next `updatedAt`: strictly after `previous` even if the clock did not move.
pub(crate) fn next_update_time(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records, newest `createdAt` first; ties go to the later insertion.
    pub fn list(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self.records.iter().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Builds a new record with a fresh id.
    pub fn build_insert(&self, fields: ValidatedFields, now: DateTime<Utc>) -> Record {
        let mut id = new_id();
        while self.get(&id).is_some() {
            id = new_id();
        }

        let (name, age, class) = fields.into_parts();
        Record {
            id,
            name,
            age,
            class,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds the replacement state of an existing record.
    pub fn build_replace(
        &self,
        id: &str,
        fields: ValidatedFields,
        now: DateTime<Utc>,
    ) -> StoreResult<Record> {
        let current = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let (name, age, class) = fields.into_parts();
        Ok(Record {
            id: current.id.clone(),
            name,
            age,
            class,
            created_at: current.created_at,
            updated_at: next_update_time(current.updated_at, now),
        })
    }

    /// Stores a record state; an existing id keeps its position.
    pub fn put(&mut self, record: Record) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    /// Removes a record, returning its last state.
    pub fn remove(&mut self, id: &str) -> StoreResult<Record> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.records.remove(idx))
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
