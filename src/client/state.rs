//! Client state and the actions that mutate it
//!
//! [`ClientState`] is owned by a single writer. Every change goes through
//! [`ClientState::apply`] with a named [`Action`], so a session can be
//! replayed or logged action by action.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::record::{parse_candidate, validate_fields, Record, RecordFields, RecordId, ValidationResult};

use super::view::{derive_view, SortOrder};

/// Editable form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Age,
    Class,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(FormField::Name),
            "age" => Ok(FormField::Age),
            "class" => Ok(FormField::Class),
            other => Err(format!("unknown field '{}' (expected name, age or class)", other)),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Name => f.write_str("name"),
            FormField::Age => f.write_str("age"),
            FormField::Class => f.write_str("class"),
        }
    }
}

/// Pending create-or-edit form, kept as typed text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordForm {
    pub name: String,
    pub age: String,
    pub class: String,
}

impl RecordForm {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            age: record.age.to_string(),
            class: record.class.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Age => &self.age,
            FormField::Class => &self.class,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Age => self.age = value,
            FormField::Class => self.class = value,
        }
    }

    /// Runs the server's validation over the form and returns the body to send.
    pub fn to_fields(&self) -> ValidationResult<RecordFields> {
        let candidate = parse_candidate(&json!({
            "name": self.name,
            "age": self.age,
            "class": self.class,
        }))?;
        let valid = validate_fields(&candidate)?;
        Ok(RecordFields::new(valid.name(), i64::from(valid.age()), valid.class()))
    }
}

/// Named state transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    LoadStarted,
    Loaded { records: Vec<Record> },
    LoadFailed { error: String },
    FieldEdited { field: FormField, value: String },
    EditStarted { id: RecordId },
    EditCancelled,
    Created { record: Record },
    Updated { record: Record },
    Deleted { id: RecordId },
    SearchChanged { term: String },
    SortToggled,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientState {
    records: Vec<Record>,
    form: RecordForm,
    editing: Option<RecordId>,
    search: String,
    sort: SortOrder,
    loading: bool,
    load_error: Option<String>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoadStarted => {
                self.loading = true;
                self.load_error = None;
            }
            Action::Loaded { records } => {
                self.records = records;
                self.loading = false;
            }
            Action::LoadFailed { error } => {
                self.loading = false;
                self.load_error = Some(error);
            }
            Action::FieldEdited { field, value } => self.form.set(field, value),
            Action::EditStarted { id } => {
                if let Some(record) = self.find(&id) {
                    self.form = RecordForm::from_record(record);
                    self.editing = Some(id);
                }
            }
            Action::EditCancelled => self.reset_form(),
            Action::Created { record } => {
                self.records.insert(0, record);
                self.form = RecordForm::default();
            }
            Action::Updated { record } => {
                if let Some(slot) = self.records.iter_mut().find(|r| r.id == record.id) {
                    *slot = record;
                }
                self.reset_form();
            }
            Action::Deleted { id } => self.records.retain(|r| r.id != id),
            Action::SearchChanged { term } => self.search = term,
            Action::SortToggled => self.sort = self.sort.toggled(),
        }
    }

    fn reset_form(&mut self) {
        self.form = RecordForm::default();
        self.editing = None;
    }

    /// Cached records, in the order last received.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn form(&self) -> &RecordForm {
        &self.form
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Filtered and sorted view of the cache.
    pub fn view(&self) -> Vec<&Record> {
        derive_view(&self.records, &self.search, self.sort)
    }
}
