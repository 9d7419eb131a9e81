//! Record validation
//!
//! Two stages, both pure:
//!
//! 1. [`parse_candidate`]: presence and shape of a raw JSON body. Runs in the
//!    HTTP layer before any storage call.
//! 2. [`validate_fields`]: trimming, non-blank text, age range. Run by the
//!    storage engine on every write and by the client before submitting.
//!
//! Neither stage mutates its input.

use serde_json::Value;

use super::errors::{ValidationError, ValidationResult};
use super::types::{RecordFields, ValidatedFields};

/// Smallest accepted age
pub const MIN_AGE: i64 = 1;

/// Largest accepted age
pub const MAX_AGE: i64 = 100;

const FIELDS: [&str; 3] = ["name", "age", "class"];

/// Checks that `name`, `age` and `class` are present and correctly shaped.
///
/// A field is missing when absent, `null`, an empty string, or the number
/// zero. All three are checked for presence before any shape check.
/// `age` may be a JSON integer or a string holding one; extra keys are
/// ignored.
pub fn parse_candidate(body: &Value) -> ValidationResult<RecordFields> {
    let obj = body
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject(json_type_name(body)))?;

    for field in FIELDS {
        if obj.get(field).map_or(true, is_blank_value) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let name = string_field(obj, "name")?;
    let class = string_field(obj, "class")?;
    let age = age_field(obj)?;

    Ok(RecordFields { name, age, class })
}

/// Applies the field constraints, returning the normalized fields.
pub fn validate_fields(fields: &RecordFields) -> ValidationResult<ValidatedFields> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(blank_or_missing("name", &fields.name));
    }

    let class = fields.class.trim();
    if class.is_empty() {
        return Err(blank_or_missing("class", &fields.class));
    }

    if !(MIN_AGE..=MAX_AGE).contains(&fields.age) {
        return Err(ValidationError::AgeOutOfRange {
            actual: fields.age,
            min: MIN_AGE,
            max: MAX_AGE,
        });
    }

    Ok(ValidatedFields {
        name: name.to_string(),
        // Range checked above
        age: fields.age as u8,
        class: class.to_string(),
    })
}

fn blank_or_missing(field: &'static str, raw: &str) -> ValidationError {
    if raw.is_empty() {
        ValidationError::MissingField(field)
    } else {
        ValidationError::Blank(field)
    }
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn string_field(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> ValidationResult<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ValidationError::TypeMismatch {
            field,
            expected: "string",
            actual: json_type_name(other),
        }),
        None => Err(ValidationError::MissingField(field)),
    }
}

fn age_field(obj: &serde_json::Map<String, Value>) -> ValidationResult<i64> {
    let mismatch = |actual: &Value| ValidationError::TypeMismatch {
        field: "age",
        expected: "integer",
        actual: json_type_name(actual),
    };

    match obj.get("age") {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // Whole floats such as 16.0 are accepted; u64 beyond i64 is clamped
            // so the range check rejects it.
            if n.is_u64() {
                return Ok(i64::MAX);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                _ => Err(ValidationError::TypeMismatch {
                    field: "age",
                    expected: "integer",
                    actual: "float",
                }),
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| ValidationError::TypeMismatch {
            field: "age",
            expected: "integer",
            actual: "string",
        }),
        Some(other) => Err(mismatch(other)),
        None => Err(ValidationError::MissingField("age")),
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
