//! Storage engine for roster
//!
//! The engine is the sole writer of persisted records. It assigns ids and
//! timestamps and re-validates every write, independently of whatever the
//! caller checked.
//!
//! # Engines
//!
//! - [`MemoryStore`]: volatile, for development and tests
//! - [`FileStore`]: append-only log, checksum-verified, fsync per write
//!
//! # Invariants
//!
//! - Every stored record satisfies the field constraints
//! - Ids are unique and never reused
//! - `createdAt` never changes; `updatedAt` strictly increases per update

mod checksum;
mod collection;
mod entry;
mod errors;
mod file;
mod memory;
mod reader;
mod uri;
mod writer;

use std::sync::Arc;

use crate::record::{Record, RecordFields};

pub use checksum::{compute_checksum, verify_checksum};
pub use entry::{EntryKind, LogEntry};
pub use errors::{StoreError, StoreResult};
pub use file::{FileStore, LOG_FILE_NAME};
pub use memory::MemoryStore;
pub use reader::LogReader;
pub use uri::StoreUri;
pub use writer::LogWriter;

/// Operations the HTTP layer needs from a storage engine.
///
/// Each call is atomic with respect to the single record it touches.
pub trait RecordStore: Send + Sync {
    /// All records, most recently created first.
    fn list(&self) -> StoreResult<Vec<Record>>;

    /// Validates and persists a new record.
    fn insert(&self, fields: &RecordFields) -> StoreResult<Record>;

    /// Validates and overwrites all mutable fields of an existing record.
    fn replace(&self, id: &str, fields: &RecordFields) -> StoreResult<Record>;

    /// Removes a record permanently, returning its last state.
    fn remove(&self, id: &str) -> StoreResult<Record>;

    /// Number of stored records.
    fn count(&self) -> StoreResult<usize>;
}

/// Opens the engine named by a connection string.
pub fn open(uri: &str) -> StoreResult<Arc<dyn RecordStore>> {
    match uri.parse::<StoreUri>()? {
        StoreUri::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreUri::File(dir) => {
            let store = FileStore::open(&dir).map_err(|e| {
                if e.is_fatal() {
                    tracing::error!(dir = %dir.display(), error = %e, "record log is damaged");
                }
                e
            })?;
            Ok(Arc::new(store))
        }
    }
}
