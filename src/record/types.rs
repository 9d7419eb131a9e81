//! Record type definitions
//!
//! Wire shape of a persisted record:
//!
//! ```text
//! {"_id": "...", "name": "...", "age": 16, "class": "...",
//!  "createdAt": "2026-10-18T09:30:00.123Z", "updatedAt": "..."}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque record identifier assigned by the storage engine.
pub type RecordId = String;

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Engine-assigned identifier, immutable after creation
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub name: String,
    pub age: u8,
    pub class: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// The mutable fields as a candidate, e.g. to prefill an edit form.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            name: self.name.clone(),
            age: i64::from(self.age),
            class: self.class.clone(),
        }
    }
}

/// Candidate `{name, age, class}` triple, not yet range-checked.
///
/// This is also the request body the client sends for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub name: String,
    pub age: i64,
    pub class: String,
}

impl RecordFields {
    pub fn new(name: impl Into<String>, age: i64, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            class: class.into(),
        }
    }
}

/// Fields that passed validation: trimmed, non-empty, age in range.
///
/// Only produced by [`super::validate_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub(super) name: String,
    pub(super) age: u8,
    pub(super) class: String,
}

impl ValidatedFields {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// Consumes into `(name, age, class)`.
    pub fn into_parts(self) -> (String, u8, String) {
        (self.name, self.age, self.class)
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
