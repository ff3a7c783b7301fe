//! # deodb
//!
//! A minimal document store that keeps schema-less records on local disk:
//! - Two-level namespace: databases contain collections
//! - One MessagePack file per document
//! - Listing with equality filters, single-field sort and offset/limit
//! - Command/response contract for a transport layer to drive
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Transport (CLI, HTTP, ...)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command / Response
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                          Store                              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Storage   │─────────▶│    Query    │
//!   │ (dirs+files)│  scanned │ (filter,    │
//!   └─────────────┘   docs   │ sort, page) │
//!                            └─────────────┘
//! ```
//!
//! ## Limitations
//! No transactions and no write isolation: concurrent saves of the same
//! document race on the filesystem and the last writer wins.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod document;
pub mod storage;
pub mod query;
pub mod protocol;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DeoError, Result};
pub use config::Config;
pub use document::{Document, Value, ID_FIELD};
pub use query::{Filter, ListOptions, Pagination, Sort, SortDirection};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of deodb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
