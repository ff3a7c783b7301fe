//! Document codec
//!
//! A document file is exactly one MessagePack map, nothing else:
//! no header, no checksum, no framing.

use crate::document::Document;
use crate::error::{DeoError, Result};

/// Encode a document to the bytes of its file
pub fn encode_document(document: &Document) -> Result<Vec<u8>> {
    rmp_serde::to_vec(document).map_err(|e| DeoError::Serialization(e.to_string()))
}

/// Decode the bytes of a document file
///
/// The error is returned raw so the caller can attach the file path.
pub fn decode_document(bytes: &[u8]) -> std::result::Result<Document, rmp_serde::decode::Error> {
    rmp_serde::from_slice(bytes)
}
