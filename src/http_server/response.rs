//! # Response Envelope
//!
//! Every response, success or failure, is wrapped as:
//!
//! ```text
//! { success: bool, message?: string, data?: T, count?: int, error?: string }
//! ```
//!
//! Absent optionals are omitted from the JSON, never `null`.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Uniform response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
            error: None,
        }
    }

    /// Failed response with a human-readable message and detail.
    pub fn error(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            count: None,
            error: Some(detail.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<Vec<Record>> {
    /// List response: the records plus their count.
    pub fn list(records: Vec<Record>) -> Self {
        let count = records.len();
        Self {
            count: Some(count),
            ..Self::ok(records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_list_envelope_serialization() {
        let json = serde_json::to_value(Envelope::list(Vec::new())).unwrap();
        assert_eq!(json, json!({"success": true, "data": [], "count": 0}));
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let envelope: Envelope<Value> = Envelope::error("Record not found", "no record with id 'x'");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            json!({
                "success": false,
                "message": "Record not found",
                "error": "no record with id 'x'"
            })
        );
    }

    #[test]
    fn test_single_envelope_with_message() {
        let envelope = Envelope::ok(json!({"_id": "a"})).with_message("Record created");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["message"], "Record created");
        assert_eq!(json["data"]["_id"], "a");
        assert!(json.get("count").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_envelope_decodes_without_optionals() {
        let envelope: Envelope<Vec<Record>> =
            serde_json::from_value(json!({"success": false})).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }
}
