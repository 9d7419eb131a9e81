//! Append-only log writer with fsync enforcement
//!
//! A mutation is acknowledged only after its entry is written and synced.
//! There are no in-place updates. Bytes past the last acknowledged entry are
//! cut off before the next append, so a failed write never strands later
//! entries behind a torn one.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::entry::LogEntry;
use super::errors::{StoreError, StoreResult};

/// Appends entries to the record log.
pub struct LogWriter {
    file: File,
    current_offset: u64,
    /// Set when a torn tail could not be cut off; no further appends.
    broken: bool,
}

impl LogWriter {
    /// Opens or creates the log file, creating parent directories if needed.
    pub fn open(log_path: &Path) -> StoreResult<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::io(
                        format!("Failed to create data directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(log_path)
            .map_err(|e| {
                StoreError::io(format!("Failed to open record log: {}", log_path.display()), e)
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read log metadata", e))?
            .len();

        Ok(Self {
            file,
            current_offset,
            broken: false,
        })
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends one entry and syncs it to disk.
    ///
    /// Returns the byte offset the entry was written at.
    pub fn append(&mut self, entry: &LogEntry) -> StoreResult<u64> {
        if self.broken {
            return Err(StoreError::unavailable(
                "record log has a torn tail that could not be removed",
            ));
        }
        self.discard_unacknowledged()?;

        let serialized = entry.serialize();
        let offset = self.current_offset;

        if let Err(e) = self.file.write_all(&serialized) {
            self.rollback();
            return Err(StoreError::io(
                format!("Failed to append entry for record {}", entry.record_id),
                e,
            ));
        }

        if let Err(e) = self.file.sync_all() {
            self.rollback();
            return Err(StoreError::io(
                format!("fsync failed after writing record {}", entry.record_id),
                e,
            ));
        }

        self.current_offset += serialized.len() as u64;

        Ok(offset)
    }

    /// Cuts the file back to the last acknowledged entry if anything follows it.
    fn discard_unacknowledged(&mut self) -> StoreResult<()> {
        let on_disk = self
            .file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read log metadata", e))?
            .len();

        if on_disk == self.current_offset {
            return Ok(());
        }
        if on_disk < self.current_offset {
            self.broken = true;
            return Err(StoreError::unavailable(format!(
                "record log shrank to {} bytes, {} were acknowledged",
                on_disk, self.current_offset
            )));
        }

        tracing::warn!(
            offset = self.current_offset,
            discarded = on_disk - self.current_offset,
            "discarding bytes past the last acknowledged entry"
        );
        self.rollback();
        if self.broken {
            return Err(StoreError::unavailable(
                "record log has a torn tail that could not be removed",
            ));
        }
        Ok(())
    }

    /// Truncates to the last acknowledged entry after a failed write.
    fn rollback(&mut self) {
        let restored = self
            .file
            .set_len(self.current_offset)
            .and_then(|_| self.file.sync_all());

        if let Err(e) = restored {
            tracing::error!(
                offset = self.current_offset,
                error = %e,
                "failed to truncate record log; refusing further writes"
            );
            self.broken = true;
        }
    }
}
