//! Client controller
//!
//! Runs each user flow against a [`RecordApi`] and folds the outcome into
//! [`ClientState`]. Local state only changes after a successful response;
//! every flow reports back with a [`Notice`].

use std::fmt;

use crate::record::Record;

use super::api_client::RecordApi;
use super::errors::ClientError;
use super::state::{Action, ClientState, FormField};

/// Shown when the initial load cannot reach the server.
pub const CONNECT_FAILURE: &str =
    "Cannot connect to the server. Please check that the backend is running.";

/// Outcome of a user flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Failure(String),
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "ok: {}", msg),
            Notice::Warning(msg) => write!(f, "warning: {}", msg),
            Notice::Failure(msg) => write!(f, "error: {}", msg),
        }
    }
}

pub struct App<A> {
    api: A,
    state: ClientState,
}

impl<A: RecordApi> App<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ClientState::new(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "client action");
        self.state.apply(action);
    }

    /// Replaces the cache with the server's collection.
    pub async fn load(&mut self) -> Option<Notice> {
        self.dispatch(Action::LoadStarted);

        match self.api.list().await {
            Ok(records) => {
                self.dispatch(Action::Loaded { records });
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load records");
                self.dispatch(Action::LoadFailed {
                    error: e.to_string(),
                });
                Some(Notice::Failure(CONNECT_FAILURE.to_string()))
            }
        }
    }

    /// Creates a record, or updates the one being edited.
    pub async fn submit(&mut self) -> Notice {
        let fields = match self.state.form().to_fields() {
            Ok(fields) => fields,
            Err(e) => {
                return Notice::Warning(format!("Please fill in all fields correctly: {}", e))
            }
        };

        match self.state.editing().map(str::to_string) {
            None => match self.api.create(&fields).await {
                Ok(record) => {
                    let name = record.name.clone();
                    self.dispatch(Action::Created { record });
                    Notice::Success(format!("Added record '{}'", name))
                }
                Err(e) => failure("create", &e),
            },
            Some(id) => match self.api.update(&id, &fields).await {
                Ok(record) => {
                    let name = record.name.clone();
                    self.dispatch(Action::Updated { record });
                    Notice::Success(format!("Updated record '{}'", name))
                }
                Err(e) => failure("update", &e),
            },
        }
    }

    /// Copies a cached record into the form and targets it for update.
    pub fn start_edit(&mut self, id: &str) -> Notice {
        let Some(record) = self.state.find(id) else {
            return Notice::Warning(format!("No record with id '{}'", id));
        };
        let name = record.name.clone();
        self.dispatch(Action::EditStarted { id: id.to_string() });
        Notice::Success(format!("Editing '{}'", name))
    }

    pub fn cancel_edit(&mut self) {
        self.dispatch(Action::EditCancelled);
    }

    /// Deletes a record once `confirm` accepts it.
    ///
    /// Returns `None` when the user declined.
    pub async fn delete<F>(&mut self, id: &str, confirm: F) -> Option<Notice>
    where
        F: FnOnce(&Record) -> bool,
    {
        let Some(record) = self.state.find(id) else {
            return Some(Notice::Warning(format!("No record with id '{}'", id)));
        };
        if !confirm(record) {
            return None;
        }

        let notice = match self.api.delete(id).await {
            Ok(deleted) => {
                self.dispatch(Action::Deleted {
                    id: deleted.id.clone(),
                });
                Notice::Success(format!("Deleted record '{}'", deleted.name))
            }
            Err(e) => failure("delete", &e),
        };
        Some(notice)
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.dispatch(Action::FieldEdited {
            field,
            value: value.into(),
        });
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.dispatch(Action::SearchChanged { term: term.into() });
    }

    pub fn toggle_sort(&mut self) {
        self.dispatch(Action::SortToggled);
    }
}

fn failure(operation: &str, err: &ClientError) -> Notice {
    tracing::warn!(operation, error = %err, "request failed");
    Notice::Failure(format!("Failed to {} record: {}", operation, err))
}
