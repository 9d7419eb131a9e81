//! Record schema for roster
//!
//! The student record, the candidate fields a client submits, and the pure
//! validation rules shared by the HTTP layer, the storage engine and the
//! client.
//!
//! # Constraints
//!
//! - `name` and `class` are non-empty after trimming
//! - `age` is an integer in `[MIN_AGE, MAX_AGE]`
//! - `_id`, `createdAt` and `updatedAt` are owned by the storage engine

mod errors;
mod types;
mod validator;

pub use errors::{ValidationError, ValidationResult};
pub use types::{Record, RecordFields, RecordId, ValidatedFields};
pub use validator::{parse_candidate, validate_fields, MAX_AGE, MIN_AGE};
