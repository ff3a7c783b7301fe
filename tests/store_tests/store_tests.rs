//! Tests for Store
//!
//! These tests verify:
//! - The namespace and document operations of the store
//! - Id generation on create, full replace on update
//! - Command execution and the responses it produces
//! - Configuration handling

use std::fs;

use deodb::config::Config;
use deodb::protocol::{Command, Status};
use deodb::{DeoError, Document, ListOptions, SortDirection, Store, Value, ID_FIELD};
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().root_dir(temp_dir.path()).build();
    let store = Store::open(config).unwrap();
    (temp_dir, store)
}

fn doc(json: serde_json::Value) -> Document {
    Document::from_json(json).unwrap()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_does_not_create_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("deo");

    let store = Store::open_path(&root).unwrap();

    assert!(!root.exists());
    assert!(store.list_databases().unwrap().is_empty());
    assert_eq!(store.root(), root.as_path());
}

#[test]
fn test_open_rejects_bad_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .root_dir(temp_dir.path())
        .extension("a/b")
        .build();

    assert!(matches!(Store::open(config), Err(DeoError::InvalidInput(_))));
}

// =============================================================================
// Document Operation Tests
// =============================================================================

#[test]
fn test_create_document_generates_id() {
    let (temp, store) = setup_temp_store();

    let first = store
        .create_document("shop", "orders", doc(json!({"item": "pen"})))
        .unwrap();
    let second = store
        .create_document("shop", "orders", doc(json!({"item": "pen"})))
        .unwrap();

    let id = first.id().unwrap().to_string();
    assert_eq!(id.len(), 36);
    assert_ne!(first.id(), second.id());

    let path = temp
        .path()
        .join("shop")
        .join("orders")
        .join(format!("{}.msgpack", id));
    assert!(path.is_file());

    let loaded = store.load_document("shop", "orders", &id).unwrap();
    assert_eq!(loaded, first);
}

#[test]
fn test_create_document_overrides_caller_id() {
    let (_temp, store) = setup_temp_store();

    let created = store
        .create_document("shop", "orders", doc(json!({"_id": "mine"})))
        .unwrap();

    assert_ne!(created.id(), Some("mine"));
}

#[test]
fn test_update_document_replaces() {
    let (_temp, store) = setup_temp_store();

    let created = store
        .create_document("shop", "orders", doc(json!({"item": "pen", "qty": 3})))
        .unwrap();
    let id = created.id().unwrap().to_string();

    let mut replacement = doc(json!({"qty": 4}));
    replacement.set_id(id.as_str());
    store
        .update_document("shop", "orders", &id, replacement.clone())
        .unwrap();

    let loaded = store.load_document("shop", "orders", &id).unwrap();
    assert_eq!(loaded, replacement);
    assert!(!loaded.contains_key("item"));
}

#[test]
fn test_update_without_id_field_is_stored_verbatim() {
    let (_temp, store) = setup_temp_store();

    store
        .update_document("shop", "orders", "o9", doc(json!({"x": 1})))
        .unwrap();

    let loaded = store.load_document("shop", "orders", "o9").unwrap();
    assert!(loaded.get(ID_FIELD).is_none());
}

#[test]
fn test_delete_document_then_missing() {
    let (_temp, store) = setup_temp_store();

    store
        .save_document("shop", "orders", "o1", &doc(json!({})))
        .unwrap();
    store.delete_document("shop", "orders", "o1").unwrap();

    assert!(store.load_document("shop", "orders", "o1").unwrap_err().is_not_found());
    assert!(store.delete_document("shop", "orders", "o1").unwrap_err().is_not_found());
}

#[test]
fn test_list_documents_with_corrupt_file() {
    let (temp, store) = setup_temp_store();

    for id in ["a", "b", "c"] {
        let mut d = doc(json!({"n": 1}));
        d.set_id(id);
        store.save_document("shop", "orders", id, &d).unwrap();
    }
    fs::write(temp.path().join("shop/orders/b.msgpack"), b"\x93\x01\x02").unwrap();

    let docs = store
        .list_documents("shop", "orders", &ListOptions::new())
        .unwrap();
    let ids: Vec<&str> = docs.iter().filter_map(Document::id).collect();
    assert_eq!(ids, vec!["a", "c"]);

    assert!(matches!(
        store.load_document("shop", "orders", "b"),
        Err(DeoError::Corrupt { .. })
    ));
}

#[test]
fn test_list_documents_never_created() {
    let (_temp, store) = setup_temp_store();

    let docs = store
        .list_documents("nothing", "here", &ListOptions::new().offset(3))
        .unwrap();
    assert!(docs.is_empty());
}

#[test]
fn test_list_documents_unreadable_collection_fails() {
    let (temp, store) = setup_temp_store();

    fs::create_dir_all(temp.path().join("db")).unwrap();
    fs::write(temp.path().join("db/c"), b"not a directory").unwrap();

    let result = store.list_documents("db", "c", &ListOptions::new());
    assert!(matches!(result, Err(DeoError::Io(_))), "got {:?}", result);
}

#[test]
fn test_document_path_is_pure() {
    let (temp, store) = setup_temp_store();

    let a = store.document_path("db", "coll", "id").unwrap();
    let b = store.document_path("db", "coll", "id").unwrap();

    assert_eq!(a, b);
    assert_eq!(a, temp.path().join("db/coll/id.msgpack"));
    assert!(!temp.path().join("db").exists());
}

// =============================================================================
// Command Execution Tests
// =============================================================================

#[test]
fn test_execute_namespace_commands() {
    let (_temp, store) = setup_temp_store();

    let response = store.execute(Command::CreateDatabase { name: "shop".into() });
    assert_eq!(response.status, Status::Created);
    assert_eq!(
        response.message.as_deref(),
        Some("Database created successfully")
    );

    let response = store.execute(Command::CreateCollection {
        database: "shop".into(),
        name: "orders".into(),
    });
    assert_eq!(response.status, Status::Created);

    let response = store.execute(Command::ListDatabases);
    assert_eq!(response.data, Some(json!(["shop"])));

    let response = store.execute(Command::ListCollections {
        database: "shop".into(),
    });
    assert_eq!(response.data, Some(json!(["orders"])));

    let response = store.execute(Command::DeleteCollection {
        database: "shop".into(),
        name: "orders".into(),
    });
    assert_eq!(response.status, Status::Ok);

    let response = store.execute(Command::DeleteDatabase { name: "shop".into() });
    assert_eq!(response.status, Status::Ok);

    let response = store.execute(Command::ListDatabases);
    assert_eq!(response.data, Some(json!([])));
}

#[test]
fn test_execute_document_commands() {
    let (_temp, store) = setup_temp_store();

    let response = store.execute(Command::CreateDocument {
        database: "shop".into(),
        collection: "orders".into(),
        content: doc(json!({"item": "pen", "qty": 3})),
    });
    assert_eq!(response.status, Status::Created);
    let data = response.data.unwrap();
    let id = data["_id"].as_str().unwrap().to_string();
    assert_eq!(data["qty"], json!(3));

    let response = store.execute(Command::ReadDocument {
        database: "shop".into(),
        collection: "orders".into(),
        id: id.clone(),
    });
    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.data, Some(json!({"item": "pen", "qty": 3, "_id": id})));

    let response = store.execute(Command::UpdateDocument {
        database: "shop".into(),
        collection: "orders".into(),
        id: id.clone(),
        content: doc(json!({"item": "pencil", "_id": id})),
    });
    assert_eq!(response.status, Status::Ok);
    assert_eq!(
        response.message.as_deref(),
        Some("Document updated successfully")
    );

    let response = store.execute(Command::ListDocuments {
        database: "shop".into(),
        collection: "orders".into(),
        options: ListOptions::new()
            .filter("item", "pencil")
            .sort_by("item", SortDirection::Asc),
    });
    assert_eq!(response.data, Some(json!([{"item": "pencil", "_id": id}])));

    let response = store.execute(Command::DeleteDocument {
        database: "shop".into(),
        collection: "orders".into(),
        id: id.clone(),
    });
    assert_eq!(response.status, Status::Ok);

    let response = store.execute(Command::ReadDocument {
        database: "shop".into(),
        collection: "orders".into(),
        id,
    });
    assert_eq!(response.status, Status::NotFound);
    assert_eq!(response.message.as_deref(), Some("Document not found"));
}

#[test]
fn test_execute_rejects_traversal() {
    let (_temp, store) = setup_temp_store();

    let response = store.execute(Command::DeleteDatabase { name: "..".into() });
    assert_eq!(response.status, Status::BadRequest);
    assert_eq!(response.status.http_code(), 400);
}

#[test]
fn test_execute_corrupt_read_is_server_error() {
    let (temp, store) = setup_temp_store();
    let dir = temp.path().join("shop/orders");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("x.msgpack"), b"\xc1").unwrap();

    let response = store.execute(Command::ReadDocument {
        database: "shop".into(),
        collection: "orders".into(),
        id: "x".into(),
    });
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.message.as_deref(), Some("Failed to read document"));
    assert_eq!(response.data, None);
}

#[test]
fn test_float_values_survive_execute() {
    let (_temp, store) = setup_temp_store();

    store
        .save_document("m", "c", "f", &doc(json!({"ratio": 0.75})))
        .unwrap();

    let loaded = store.load_document("m", "c", "f").unwrap();
    assert_eq!(loaded.get("ratio"), Some(&Value::Float(0.75)));
}
