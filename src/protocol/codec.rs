//! Protocol codec
//!
//! Decoding of transport inputs (JSON bodies, query parameters) into
//! commands, and encoding of responses.
//!
//! ## Request Bodies
//! - create database:   `{"db_name": "<name>"}`
//! - create collection: `{"collection_name": "<name>"}`
//! - create/update document: any JSON object
//!
//! ## List Query Parameters
//! - `filter[<field>]=<value>` equality filter, value compared as a string
//! - `sort_by=<field>`, `order=asc|desc` (default asc)
//! - `limit=<n>` only when n > 0, `offset=<n>` only when n >= 0

use serde::Deserialize;

use crate::document::{Document, Value};
use crate::error::{DeoError, Result};
use crate::query::{ListOptions, SortDirection};

use super::Response;

#[derive(Debug, Deserialize)]
struct CreateDatabaseRequest {
    db_name: String,
}

#[derive(Debug, Deserialize)]
struct CreateCollectionRequest {
    collection_name: String,
}

// =============================================================================
// Request Decoding
// =============================================================================

/// Decode the body of a create-database request
pub fn decode_create_database(body: &[u8]) -> Result<String> {
    let request: CreateDatabaseRequest = serde_json::from_slice(body)
        .map_err(|e| DeoError::Protocol(format!("Invalid request body: {}", e)))?;
    require_non_empty("db_name", request.db_name)
}

/// Decode the body of a create-collection request
pub fn decode_create_collection(body: &[u8]) -> Result<String> {
    let request: CreateCollectionRequest = serde_json::from_slice(body)
        .map_err(|e| DeoError::Protocol(format!("Invalid request body: {}", e)))?;
    require_non_empty("collection_name", request.collection_name)
}

/// Decode a document body; it must be a JSON object
pub fn decode_document_body(body: &[u8]) -> Result<Document> {
    let json: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| DeoError::InvalidInput(format!("Invalid JSON: {}", e)))?;
    Document::from_json(json)
}

/// Build list options from query parameters
///
/// Unknown keys are ignored; for a repeated filter key the first value wins.
pub fn decode_list_query<I, K, V>(params: I) -> ListOptions
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut options = ListOptions::new();
    let mut sort_by: Option<String> = None;
    let mut order: Option<String> = None;

    for (key, value) in params {
        let (key, value) = (key.as_ref(), value.as_ref());

        if let Some(field) = key
            .strip_prefix("filter[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            if !options.filters.iter().any(|f| f.field == field) {
                options = options.filter(field, Value::from(value));
            }
            continue;
        }

        match key {
            "sort_by" => sort_by = Some(value.to_string()),
            "order" => order = Some(value.to_string()),
            "limit" => {
                if let Ok(limit) = value.parse::<usize>() {
                    if limit > 0 {
                        options = options.limit(limit);
                    }
                }
            }
            "offset" => {
                if let Ok(offset) = value.parse::<usize>() {
                    options = options.offset(offset);
                }
            }
            _ => {}
        }
    }

    if let Some(field) = sort_by.filter(|f| !f.is_empty()) {
        let direction = SortDirection::parse(order.as_deref().unwrap_or("asc"));
        options = options.sort_by(field, direction);
    }

    options
}

/// Split a raw query string ("a=1&b=2") into key/value pairs
///
/// No percent-decoding: transports hand over already-decoded pairs when
/// they have them.
pub fn split_query_string(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

// =============================================================================
// Response Encoding
// =============================================================================

/// Encode a response envelope as JSON bytes
pub fn encode_response(response: &Response) -> Vec<u8> {
    response.to_bytes()
}

fn require_non_empty(field: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(DeoError::Protocol(format!("Invalid request body: {} is required", field)));
    }
    Ok(value)
}
