//! Record log entry format
//!
//! ```text
//! +------------------+
//! | Entry Length     | (u32 LE, whole entry including this field)
//! +------------------+
//! | Kind             | (u8: 1 = put, 2 = delete)
//! +------------------+
//! | Record ID        | (length-prefixed string)
//! +------------------+
//! | Body             | (length-prefixed JSON bytes, empty for delete)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself.

use std::io::{self, Read};

use crate::record::Record;

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::StoreResult;

/// Smallest possible entry: length + kind + two empty strings + checksum
pub(crate) const MIN_ENTRY_SIZE: usize = 4 + 1 + 4 + 4 + 4;

/// What a log entry does to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Full record state (create or update)
    Put,
    /// Record removed
    Delete,
}

impl EntryKind {
    fn as_byte(self) -> u8 {
        match self {
            EntryKind::Put => 1,
            EntryKind::Delete => 2,
        }
    }

    fn from_byte(byte: u8) -> io::Result<Self> {
        match byte {
            1 => Ok(EntryKind::Put),
            2 => Ok(EntryKind::Delete),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown entry kind: {}", other),
            )),
        }
    }
}

/// One append-only log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub record_id: String,
    pub body: Vec<u8>,
}

impl LogEntry {
    /// Entry carrying the full state of a record.
    pub fn put(record: &Record) -> StoreResult<Self> {
        Ok(Self {
            kind: EntryKind::Put,
            record_id: record.id.clone(),
            body: serde_json::to_vec(record)?,
        })
    }

    /// Entry removing a record.
    pub fn delete(record_id: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Delete,
            record_id: record_id.into(),
            body: Vec::new(),
        }
    }

    /// Decodes the record carried by a put entry.
    pub fn record(&self) -> StoreResult<Record> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Serialize the complete entry to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let entry_length = (MIN_ENTRY_SIZE + self.record_id.len() + self.body.len()) as u32;

        let mut buf = Vec::with_capacity(entry_length as usize);
        buf.extend_from_slice(&entry_length.to_le_bytes());
        buf.push(self.kind.as_byte());

        buf.extend_from_slice(&(self.record_id.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.record_id.as_bytes());

        buf.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.body);

        let checksum = compute_checksum(&buf);
        buf.extend_from_slice(&checksum.to_le_bytes());

        buf
    }

    /// Deserialize an entry from bytes, verifying checksum.
    ///
    /// Returns the entry and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_ENTRY_SIZE {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "Entry too short"));
        }

        let entry_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if entry_length < MIN_ENTRY_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid entry length: {}", entry_length),
            ));
        }

        if data.len() < entry_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Entry truncated: expected {} bytes, got {}",
                    entry_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = entry_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let covered = &data[..checksum_offset];

        if !verify_checksum(covered, stored_checksum) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    compute_checksum(covered),
                    stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let mut kind_buf = [0u8; 1];
        cursor.read_exact(&mut kind_buf)?;
        let kind = EntryKind::from_byte(kind_buf[0])?;

        let record_id = String::from_utf8(read_bytes(&mut cursor)?).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
        })?;
        let body = read_bytes(&mut cursor)?;

        Ok((
            Self {
                kind,
                record_id,
                body,
            },
            entry_length,
        ))
    }
}

fn read_bytes<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;

    Ok(buf)
}
