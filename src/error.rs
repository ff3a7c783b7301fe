//! Error types for deodb
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using DeoError
pub type Result<T> = std::result::Result<T, DeoError>;

/// Unified error type for deodb operations
#[derive(Debug, Error)]
pub enum DeoError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Document not found: {database}/{collection}/{id}")]
    NotFound {
        database: String,
        collection: String,
        id: String,
    },

    #[error("Corrupt document at {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Environment Errors
    // -------------------------------------------------------------------------
    /// The storage root could not be resolved
    #[error("Environment error: {0}")]
    Environment(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl DeoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeoError::NotFound { .. })
    }
}
