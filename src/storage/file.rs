//! Durable file engine
//!
//! Selected with `file://<dir>` or a bare path. State lives in
//! `<dir>/records.log`; the in-memory collection is rebuilt from the log on
//! open and every mutation is logged and synced before it is applied.

use std::path::Path;
use std::sync::Mutex;

use crate::record::{validate_fields, Record, RecordFields};

use super::collection::{now_millis, Collection};
use super::entry::{EntryKind, LogEntry};
use super::errors::{StoreError, StoreResult};
use super::reader::LogReader;
use super::writer::LogWriter;
use super::RecordStore;

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "records.log";

struct FileState {
    writer: LogWriter,
    records: Collection,
}

/// Append-only, checksummed record store.
pub struct FileStore {
    state: Mutex<FileState>,
}

impl FileStore {
    /// Opens the store rooted at `data_dir`, replaying any existing log.
    ///
    /// Fails with a corruption error if any log entry is damaged.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let log_path = data_dir.join(LOG_FILE_NAME);
        let records = if log_path.exists() {
            replay(&log_path)?
        } else {
            Collection::new()
        };
        let writer = LogWriter::open(&log_path)?;

        tracing::info!(
            path = %log_path.display(),
            records = records.len(),
            "record log opened"
        );

        Ok(Self {
            state: Mutex::new(FileState { writer, records }),
        })
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, FileState>> {
        self.state.lock().map_err(|_| StoreError::lock_poisoned())
    }
}

fn replay(log_path: &Path) -> StoreResult<Collection> {
    let mut reader = LogReader::open(log_path)?;
    let mut records = Collection::new();

    while let Some(entry) = reader.read_next()? {
        match entry.kind {
            EntryKind::Put => records.put(entry.record()?),
            EntryKind::Delete => {
                // A delete for an unknown id only happens if the log was edited
                if records.remove(&entry.record_id).is_err() {
                    tracing::warn!(id = %entry.record_id, "delete entry for unknown record");
                }
            }
        }
    }

    Ok(records)
}

impl RecordStore for FileStore {
    fn list(&self) -> StoreResult<Vec<Record>> {
        Ok(self.lock()?.records.list())
    }

    fn insert(&self, fields: &RecordFields) -> StoreResult<Record> {
        let valid = validate_fields(fields)?;
        let mut state = self.lock()?;

        let record = state.records.build_insert(valid, now_millis());
        state.writer.append(&LogEntry::put(&record)?)?;
        state.records.put(record.clone());
        Ok(record)
    }

    fn replace(&self, id: &str, fields: &RecordFields) -> StoreResult<Record> {
        let valid = validate_fields(fields)?;
        let mut state = self.lock()?;

        let record = state.records.build_replace(id, valid, now_millis())?;
        state.writer.append(&LogEntry::put(&record)?)?;
        state.records.put(record.clone());
        Ok(record)
    }

    fn remove(&self, id: &str) -> StoreResult<Record> {
        let mut state = self.lock()?;

        if state.records.get(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        state.writer.append(&LogEntry::delete(id))?;
        state.records.remove(id)
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.lock()?.records.len())
    }
}
