//! Storage connection strings
//!
//! - `memory://` selects [`super::MemoryStore`]
//! - `file://<dir>` or a bare path selects [`super::FileStore`]

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::errors::StoreError;

/// Parsed storage connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUri {
    Memory,
    File(PathBuf),
}

impl FromStr for StoreUri {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(StoreError::unavailable("empty storage connection string"));
        }

        match s.split_once("://") {
            Some(("memory", "")) => Ok(StoreUri::Memory),
            Some(("memory", rest)) => Err(StoreError::unavailable(format!(
                "memory:// takes no location, got '{}'",
                rest
            ))),
            Some(("file", "")) => Err(StoreError::unavailable("file:// requires a directory")),
            Some(("file", path)) => Ok(StoreUri::File(PathBuf::from(path))),
            Some((scheme, _)) => Err(StoreError::unavailable(format!(
                "unsupported storage scheme '{}'",
                scheme
            ))),
            None => Ok(StoreUri::File(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for StoreUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreUri::Memory => write!(f, "memory://"),
            StoreUri::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}
