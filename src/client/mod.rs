//! # Client
//!
//! Interactive client for the record API.
//!
//! - `api_client`: reqwest-backed [`RecordApi`]
//! - `state`: cached collection, form, and the [`Action`] reducer
//! - `view`: search filter and name sort, derived on demand
//! - `collate`: locale-aware name comparison
//! - `app`: flows (load, submit, edit, delete) producing [`Notice`]s
//! - `shell`: terminal front end

mod api_client;
mod app;
mod collate;
mod errors;
mod shell;
mod state;
mod view;

pub use api_client::{HttpRecordApi, RecordApi};
pub use app::{App, Notice, CONNECT_FAILURE};
pub use collate::locale_compare;
pub use errors::{ClientError, ClientResult};
pub use shell::{render, run_shell, ShellCommand, Target, HELP};
pub use state::{Action, ClientState, FormField, RecordForm};
pub use view::{derive_view, matches_search, SortOrder};
