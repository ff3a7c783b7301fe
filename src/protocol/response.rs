//! Response definitions
//!
//! The envelope every command answers with:
//! `{ "success": bool, "message"?: string, "data"?: any }`.

use serde::Serialize;

use crate::error::DeoError;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    NotFound,
    BadRequest,
    Error,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Ok | Status::Created)
    }

    /// Matching HTTP status code
    pub fn http_code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::NotFound => 404,
            Status::BadRequest => 400,
            Status::Error => 500,
        }
    }
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Human-readable outcome
    pub message: Option<String>,

    /// Payload (document, list of names, list of documents)
    pub data: Option<serde_json::Value>,
}

impl Response {
    /// Create an OK response carrying data
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            status: Status::Ok,
            message: None,
            data: Some(data),
        }
    }

    /// Create an OK response with only a message
    pub fn done(message: &str) -> Self {
        Self {
            status: Status::Ok,
            message: Some(message.to_string()),
            data: None,
        }
    }

    /// Create a CREATED response
    pub fn created(message: &str, data: Option<serde_json::Value>) -> Self {
        Self {
            status: Status::Created,
            message: Some(message.to_string()),
            data,
        }
    }

    /// Create a NOT_FOUND response
    pub fn not_found(message: &str) -> Self {
        Self::failure(Status::NotFound, message)
    }

    /// Create a BAD_REQUEST response
    pub fn bad_request(message: &str) -> Self {
        Self::failure(Status::BadRequest, message)
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self::failure(Status::Error, message)
    }

    /// Translate an error, using `fallback` for internal failures
    ///
    /// Internal details stay out of the message; they are logged by the
    /// caller instead.
    pub fn from_error(err: &DeoError, fallback: &str) -> Self {
        match err {
            DeoError::NotFound { .. } => Self::not_found("Document not found"),
            DeoError::InvalidInput(msg) | DeoError::Protocol(msg) => Self::bad_request(msg),
            _ => Self::error(fallback),
        }
    }

    fn failure(status: Status, message: &str) -> Self {
        Self {
            status,
            message: Some(message.to_string()),
            data: None,
        }
    }

    fn envelope(&self) -> Envelope<'_> {
        Envelope {
            success: self.status.is_success(),
            message: self.message.as_deref(),
            data: self.data.as_ref(),
        }
    }

    /// The JSON envelope
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.envelope()).unwrap_or_default()
    }

    /// The JSON envelope as bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.envelope()).unwrap_or_default()
    }
}

/// Wire shape of a response
#[derive(Serialize)]
struct Envelope<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
}
