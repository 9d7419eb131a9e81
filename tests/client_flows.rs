//! Client Flow Tests
//!
//! Runs the client controller and terminal shell against an in-process
//! engine, plus one pass of the reqwest client against a live server.

use std::io::Cursor;
use std::sync::Arc;

use roster::client::{
    run_shell, App, ClientError, ClientResult, FormField, HttpRecordApi, Notice, RecordApi,
};
use roster::http_server::{HttpServer, HttpServerConfig};
use roster::record::{Record, RecordFields};
use roster::storage::{MemoryStore, RecordStore, StoreError};

// =============================================================================
// Test Utilities
// =============================================================================

/// [`RecordApi`] that calls the engine directly, mapping errors the way the
/// HTTP layer does.
#[derive(Clone)]
struct InProcessApi {
    store: Arc<MemoryStore>,
}

fn api_error(err: StoreError) -> ClientError {
    let status = match &err {
        StoreError::Validation(_) => 400,
        StoreError::NotFound(_) => 404,
        _ => 500,
    };
    ClientError::Api {
        status,
        message: err.to_string(),
        detail: None,
    }
}

impl RecordApi for InProcessApi {
    async fn list(&self) -> ClientResult<Vec<Record>> {
        self.store.list().map_err(api_error)
    }

    async fn create(&self, fields: &RecordFields) -> ClientResult<Record> {
        self.store.insert(fields).map_err(api_error)
    }

    async fn update(&self, id: &str, fields: &RecordFields) -> ClientResult<Record> {
        self.store.replace(id, fields).map_err(api_error)
    }

    async fn delete(&self, id: &str) -> ClientResult<Record> {
        self.store.remove(id).map_err(api_error)
    }
}

fn new_app() -> (Arc<MemoryStore>, App<InProcessApi>) {
    let store = Arc::new(MemoryStore::new());
    let app = App::new(InProcessApi {
        store: store.clone(),
    });
    (store, app)
}

async fn add(app: &mut App<InProcessApi>, name: &str, age: &str, class: &str) -> Notice {
    app.set_field(FormField::Name, name);
    app.set_field(FormField::Age, age);
    app.set_field(FormField::Class, class);
    app.submit().await
}

// =============================================================================
// Controller Flows
// =============================================================================

#[tokio::test]
async fn test_create_prepends_without_refetch() {
    let (store, mut app) = new_app();
    assert_eq!(app.load().await, None);

    assert!(add(&mut app, "Lan", "16", "10A1").await.is_success());
    assert!(add(&mut app, "Minh", "17", "11B").await.is_success());

    let cached: Vec<_> = app.state().records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(cached, vec!["Minh", "Lan"]);
    assert_eq!(app.state().form().name, "");
    assert_eq!(store.count().unwrap(), 2);
}

#[tokio::test]
async fn test_edit_replaces_in_place() {
    let (store, mut app) = new_app();
    store.insert(&RecordFields::new("Lan", 16, "10A1")).unwrap();
    store.insert(&RecordFields::new("Minh", 17, "11B")).unwrap();
    app.load().await;

    let lan_id = app.state().records()[1].id.clone();
    assert!(app.start_edit(&lan_id).is_success());
    assert_eq!(app.state().form().age, "16");

    app.set_field(FormField::Age, "17");
    app.set_field(FormField::Class, "10A2");
    assert!(app.submit().await.is_success());

    let lan = &app.state().records()[1];
    assert_eq!(lan.id, lan_id);
    assert_eq!((lan.age, lan.class.as_str()), (17, "10A2"));
    assert_eq!(app.state().editing(), None);
    assert_eq!(store.list().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cancel_edit_makes_no_call() {
    let (store, mut app) = new_app();
    let record = store.insert(&RecordFields::new("Lan", 16, "10A1")).unwrap();
    app.load().await;

    app.start_edit(&record.id);
    app.set_field(FormField::Name, "Changed");
    app.cancel_edit();

    assert_eq!(app.state().editing(), None);
    assert_eq!(store.list().unwrap()[0], record);
}

#[tokio::test]
async fn test_delete_removes_by_id() {
    let (store, mut app) = new_app();
    let keep = store.insert(&RecordFields::new("Lan", 16, "10A1")).unwrap();
    let gone = store.insert(&RecordFields::new("Lan", 16, "10A1")).unwrap();
    app.load().await;

    let notice = app.delete(&gone.id, |record| record.name == "Lan").await;
    assert!(matches!(notice, Some(Notice::Success(_))));

    assert_eq!(app.state().records().len(), 1);
    assert_eq!(app.state().records()[0].id, keep.id);
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn test_stale_cache_delete_reports_failure() {
    let (store, mut app) = new_app();
    let record = store.insert(&RecordFields::new("Lan", 16, "10A1")).unwrap();
    app.load().await;

    // Removed behind the client's back
    store.remove(&record.id).unwrap();

    let notice = app.delete(&record.id, |_| true).await;
    assert!(matches!(notice, Some(Notice::Failure(_))));
    assert_eq!(app.state().records().len(), 1);
}

#[tokio::test]
async fn test_local_validation_blocks_submit() {
    let (store, mut app) = new_app();
    app.load().await;

    for (age, class) in [("", "10A1"), ("0", "10A1"), ("101", "10A1"), ("16", "   ")] {
        let notice = add(&mut app, "Lan", age, class).await;
        assert!(matches!(notice, Notice::Warning(_)), "age {:?} class {:?}", age, class);
    }
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_search_and_sort_do_not_touch_cache() {
    let (store, mut app) = new_app();
    for name in ["Anna", "anna Banana", "Bob"] {
        store.insert(&RecordFields::new(name, 16, "10A1")).unwrap();
    }
    app.load().await;

    app.set_search("anna");
    let names: Vec<_> = app.state().view().iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["Anna", "anna Banana"]);

    app.toggle_sort();
    let names: Vec<_> = app.state().view().iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["anna Banana", "Anna"]);

    assert_eq!(app.state().records().len(), 3);
}

// =============================================================================
// Terminal Shell
// =============================================================================

#[tokio::test]
async fn test_scripted_shell_session() {
    let (store, mut app) = new_app();
    let script = "\
set name Lan
set age 16
set class 10A1
submit
set name Minh
set age 17
set class 11B
submit
search lan
delete 1
y
search
delete 1
n
quit
";
    let mut out = Vec::new();
    run_shell(&mut app, Cursor::new(script), &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("No records yet"));
    assert!(out.contains("ok: Added record 'Lan'"));
    assert!(out.contains("(search results for \"lan\")"));
    assert!(out.contains("Delete record \"Lan\"? [y/N]"));
    assert!(out.contains("ok: Deleted record 'Lan'"));
    assert!(out.contains("Delete record \"Minh\"? [y/N]"));
    assert!(out.contains("Delete cancelled"));

    let remaining = store.list().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Minh");
}

#[tokio::test]
async fn test_shell_reports_bad_commands_and_continues() {
    let (_store, mut app) = new_app();
    let mut out = Vec::new();
    run_shell(&mut app, Cursor::new("frobnicate\nedit 3\nsubmit\n"), &mut out)
        .await
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("unknown command 'frobnicate'"));
    assert!(out.contains("No row 3 in the current view"));
    assert!(out.contains("warning: Please fill in all fields correctly"));
}

// =============================================================================
// HTTP Client
// =============================================================================

#[tokio::test]
async fn test_http_client_against_live_server() {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
    let router = HttpServer::with_config(HttpServerConfig::default(), store).router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let api = HttpRecordApi::new(&format!("http://{}", addr)).unwrap();

    let created = api.create(&RecordFields::new("Lan", 16, "10A1")).await.unwrap();
    assert_eq!(api.list().await.unwrap(), vec![created.clone()]);

    let updated = api
        .update(&created.id, &RecordFields::new("Lan", 17, "10A2"))
        .await
        .unwrap();
    assert_eq!(updated.age, 17);
    assert!(updated.updated_at > created.updated_at);

    let deleted = api.delete(&created.id).await.unwrap();
    assert_eq!(deleted, updated);

    let err = api.delete(&created.id).await.unwrap_err();
    assert!(err.is_not_found());

    match api.create(&RecordFields::new("Lan", 150, "10A1")).await {
        Err(ClientError::Api { status, message, .. }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Age must be between 1 and 100");
        }
        other => panic!("expected a 400, got {:?}", other),
    }
}
