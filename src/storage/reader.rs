//! Sequential log reader with strict corruption detection
//!
//! Every entry is checksum-verified. Any failure stops the scan.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::entry::{LogEntry, MIN_ENTRY_SIZE};
use super::errors::{StoreError, StoreResult};

/// Reads a record log front to back.
pub struct LogReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl LogReader {
    /// Opens the log file for reading.
    pub fn open(log_path: &Path) -> StoreResult<Self> {
        let file = File::open(log_path).map_err(|e| {
            StoreError::io(format!("Failed to open record log: {}", log_path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read log metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Reads the next entry.
    ///
    /// - `Ok(Some(entry))` if an entry was read
    /// - `Ok(None)` at end of file
    /// - `Err(Corruption)` on a bad length, truncation or checksum mismatch
    pub fn read_next(&mut self) -> StoreResult<Option<LogEntry>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_ENTRY_SIZE as u64 {
            return Err(StoreError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Truncated log: {} bytes remaining, minimum entry size is {}",
                    remaining, MIN_ENTRY_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read entry length: {}", e),
            )
        })?;
        let entry_length = u32::from_le_bytes(len_buf) as u64;

        if entry_length < MIN_ENTRY_SIZE as u64 {
            return Err(StoreError::corruption_at_offset(
                self.current_offset,
                format!("Invalid entry length: {}", entry_length),
            ));
        }

        if entry_length > remaining {
            return Err(StoreError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Entry length {} exceeds remaining file size {}",
                    entry_length, remaining
                ),
            ));
        }

        let mut entry_buf = vec![0u8; entry_length as usize];
        entry_buf[0..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut entry_buf[4..]).map_err(|e| {
            StoreError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read entry body: {}", e),
            )
        })?;

        let (entry, consumed) = LogEntry::deserialize(&entry_buf)
            .map_err(|e| StoreError::corruption_at_offset(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;

        Ok(Some(entry))
    }

    /// Reads all remaining entries.
    pub fn read_all(&mut self) -> StoreResult<Vec<LogEntry>> {
        let mut entries = Vec::new();
        while let Some(entry) = self.read_next()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::writer::LogWriter;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_entries_in_append_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.log");

        {
            let mut writer = LogWriter::open(&path).unwrap();
            writer.append(&LogEntry::delete("a")).unwrap();
            writer.append(&LogEntry::delete("b")).unwrap();
        }

        let mut reader = LogReader::open(&path).unwrap();
        let ids: Vec<_> = reader
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.record_id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(reader.current_offset(), fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn test_trailing_garbage_is_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.log");

        {
            let mut writer = LogWriter::open(&path).unwrap();
            writer.append(&LogEntry::delete("a")).unwrap();
        }
        let mut contents = fs::read(&path).unwrap();
        contents.extend_from_slice(&[1, 2, 3]);
        fs::write(&path, contents).unwrap();

        let mut reader = LogReader::open(&path).unwrap();
        assert!(reader.read_next().unwrap().is_some());
        let err = reader.read_next().unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("Truncated log"));
    }
}
