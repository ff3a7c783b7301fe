//! Protocol Tests
//!
//! Tests for request decoding, list query parsing and the response envelope.

use deodb::protocol::{
    decode_create_collection, decode_create_database, decode_document_body, decode_list_query,
    encode_response, split_query_string, Command, CommandType, Response, Status,
};
use deodb::{DeoError, Filter, ListOptions, Pagination, Sort, SortDirection, Value};
use serde_json::json;

// =============================================================================
// Body Decoding Tests
// =============================================================================

#[test]
fn test_decode_create_database() {
    let name = decode_create_database(br#"{"db_name": "shop"}"#).unwrap();
    assert_eq!(name, "shop");
}

#[test]
fn test_decode_create_database_missing_field() {
    let bodies: [&[u8]; 4] = [br#"{}"#, br#"{"name": "shop"}"#, br#"{"db_name": ""}"#, b"nope"];
    for body in bodies {
        let err = decode_create_database(body).unwrap_err();
        assert!(matches!(err, DeoError::Protocol(_)));
    }
}

#[test]
fn test_decode_create_collection() {
    let name = decode_create_collection(br#"{"collection_name": "orders"}"#).unwrap();
    assert_eq!(name, "orders");
    assert!(decode_create_collection(br#"{"db_name": "orders"}"#).is_err());
}

#[test]
fn test_decode_document_body() {
    let doc = decode_document_body(br#"{"item": "pen", "qty": 3}"#).unwrap();
    assert_eq!(doc.get("qty"), Some(&Value::Int(3)));

    let err = decode_document_body(b"[1, 2]").unwrap_err();
    assert!(matches!(err, DeoError::InvalidInput(_)));

    let err = decode_document_body(b"{broken").unwrap_err();
    assert!(matches!(err, DeoError::InvalidInput(_)));
}

// =============================================================================
// List Query Tests
// =============================================================================

#[test]
fn test_decode_list_query_empty() {
    let options = decode_list_query(Vec::<(String, String)>::new());
    assert_eq!(options, ListOptions::default());
}

#[test]
fn test_decode_list_query_full() {
    let options = decode_list_query(vec![
        ("filter[status]", "paid"),
        ("filter[qty]", "3"),
        ("sort_by", "total"),
        ("order", " DESC "),
        ("limit", "10"),
        ("offset", "20"),
        ("unrelated", "x"),
    ]);

    assert_eq!(
        options.filters,
        vec![Filter::eq("status", "paid"), Filter::eq("qty", "3")]
    );
    assert_eq!(options.sort, Some(Sort::new("total", SortDirection::Desc)));
    assert_eq!(
        options.pagination,
        Pagination {
            offset: 20,
            limit: Some(10)
        }
    );
}

#[test]
fn test_decode_list_query_order_defaults_to_asc() {
    let options = decode_list_query(vec![("sort_by", "name")]);
    assert_eq!(options.sort, Some(Sort::new("name", SortDirection::Asc)));

    let options = decode_list_query(vec![("order", "desc")]);
    assert_eq!(options.sort, None);
}

#[test]
fn test_decode_list_query_ignores_bad_numbers() {
    let options = decode_list_query(vec![("limit", "0"), ("offset", "-1")]);
    assert_eq!(options.pagination, Pagination::default());

    let options = decode_list_query(vec![("limit", "abc"), ("offset", "x")]);
    assert_eq!(options.pagination, Pagination::default());
}

#[test]
fn test_decode_list_query_first_filter_value_wins() {
    let options = decode_list_query(vec![("filter[a]", "1"), ("filter[a]", "2")]);
    assert_eq!(options.filters, vec![Filter::eq("a", "1")]);
}

#[test]
fn test_split_query_string() {
    let pairs = split_query_string("?filter[a]=1&sort_by=a&flag&");
    assert_eq!(
        pairs,
        vec![
            ("filter[a]".to_string(), "1".to_string()),
            ("sort_by".to_string(), "a".to_string()),
            ("flag".to_string(), String::new()),
        ]
    );
}

// =============================================================================
// Response Tests
// =============================================================================

#[test]
fn test_response_envelope() {
    let response = Response::created("Document created successfully", Some(json!({"a": 1})));
    assert_eq!(
        response.to_json(),
        json!({"success": true, "message": "Document created successfully", "data": {"a": 1}})
    );

    let response = Response::ok(json!(["shop"]));
    assert_eq!(response.to_json(), json!({"success": true, "data": ["shop"]}));

    let response = Response::not_found("Document not found");
    assert_eq!(
        response.to_json(),
        json!({"success": false, "message": "Document not found"})
    );
}

#[test]
fn test_encode_response_is_json() {
    let response = Response::done("Database deleted successfully");
    let bytes = encode_response(&response);
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["success"], json!(true));
}

#[test]
fn test_envelope_bytes_match_json() {
    let response = Response::created("Document created successfully", Some(json!({"n": 1.5})));
    let parsed: serde_json::Value = serde_json::from_slice(&response.to_bytes()).unwrap();
    assert_eq!(parsed, response.to_json());

    let response = Response::error("Failed to list documents");
    let parsed: serde_json::Value = serde_json::from_slice(&response.to_bytes()).unwrap();
    assert_eq!(parsed, json!({"success": false, "message": "Failed to list documents"}));
    assert!(parsed.get("data").is_none());
}

#[test]
fn test_from_error_mapping() {
    let not_found = DeoError::NotFound {
        database: "d".into(),
        collection: "c".into(),
        id: "i".into(),
    };
    assert_eq!(Response::from_error(&not_found, "x").status, Status::NotFound);

    let invalid = DeoError::InvalidInput("bad name".into());
    let response = Response::from_error(&invalid, "x");
    assert_eq!(response.status, Status::BadRequest);
    assert_eq!(response.message.as_deref(), Some("bad name"));

    let env = DeoError::Environment("no home".into());
    let response = Response::from_error(&env, "Failed to list databases");
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.message.as_deref(), Some("Failed to list databases"));
}

#[test]
fn test_status_codes() {
    assert_eq!(Status::Ok.http_code(), 200);
    assert_eq!(Status::Created.http_code(), 201);
    assert_eq!(Status::NotFound.http_code(), 404);
    assert!(!Status::Error.is_success());
}

// =============================================================================
// Command Tests
// =============================================================================

#[test]
fn test_command_routes() {
    let command = Command::ListDocuments {
        database: "d".into(),
        collection: "c".into(),
        options: ListOptions::new(),
    };
    assert_eq!(command.command_type(), CommandType::ListDocuments);
    assert_eq!(
        command.command_type().route(),
        ("GET", "/dbs/{db}/collections/{collection}/documents")
    );
    assert_eq!(CommandType::DeleteDatabase.route().0, "DELETE");
    assert_eq!(CommandType::UpdateDocument.as_str(), "update_document");
}
