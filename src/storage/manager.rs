//! Storage Manager
//!
//! All filesystem access of the store goes through here.
//!
//! ## Responsibilities
//! - Create, enumerate and remove database and collection directories
//! - Write, read and remove single document files
//! - Scan a collection directory for document files
//!
//! ## Concurrency:
//! No locks and no caching. Every call performs its own filesystem
//! operations and returns; concurrent saves to the same id race at the
//! filesystem level and the last writer wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::document::Document;
use crate::error::{DeoError, Result};

use super::codec::{decode_document, encode_document};
use super::layout::{validate_name, Layout};

/// Filesystem-backed storage for databases, collections and documents
#[derive(Debug, Clone)]
pub struct StorageManager {
    layout: Layout,
}

impl StorageManager {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    // =========================================================================
    // Databases
    // =========================================================================

    /// Names of all databases, sorted. A missing root means no databases.
    pub fn list_databases(&self) -> Result<Vec<String>> {
        list_subdirectories(self.layout.root())
    }

    /// Ensure the database directory exists (idempotent)
    pub fn create_database(&self, database: &str) -> Result<()> {
        let path = self.layout.database_path(database)?;
        fs::create_dir_all(&path)?;
        info!(database, path = %path.display(), "database ready");
        Ok(())
    }

    /// Remove the database and everything under it (idempotent)
    pub fn delete_database(&self, database: &str) -> Result<()> {
        let path = self.layout.database_path(database)?;
        remove_tree(&path)?;
        info!(database, "database deleted");
        Ok(())
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Names of all collections in a database, sorted
    pub fn list_collections(&self, database: &str) -> Result<Vec<String>> {
        list_subdirectories(&self.layout.database_path(database)?)
    }

    /// Ensure the collection directory exists, creating the database too
    pub fn create_collection(&self, database: &str, collection: &str) -> Result<()> {
        let path = self.layout.collection_path(database, collection)?;
        fs::create_dir_all(&path)?;
        info!(database, collection, "collection ready");
        Ok(())
    }

    /// Remove the collection and all of its documents (idempotent)
    pub fn delete_collection(&self, database: &str, collection: &str) -> Result<()> {
        let path = self.layout.collection_path(database, collection)?;
        remove_tree(&path)?;
        info!(database, collection, "collection deleted");
        Ok(())
    }

    // =========================================================================
    // Documents
    // =========================================================================

    pub fn document_path(&self, database: &str, collection: &str, id: &str) -> Result<PathBuf> {
        self.layout.document_path(database, collection, id)
    }

    /// Write a document file, replacing any previous content
    ///
    /// Missing parent directories are created. There is no temp-file
    /// rename: a crash mid-write can leave a truncated file, which the
    /// listing scan will then skip as corrupt.
    pub fn save_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        document: &Document,
    ) -> Result<()> {
        let path = self.layout.document_path(database, collection, id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes = encode_document(document)?;
        fs::write(&path, &bytes)?;

        debug!(path = %path.display(), bytes = bytes.len(), "document saved");
        Ok(())
    }

    /// Read and decode a document file
    pub fn load_document(&self, database: &str, collection: &str, id: &str) -> Result<Document> {
        let path = self.layout.document_path(database, collection, id)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(not_found(database, collection, id));
            }
            Err(e) => return Err(e.into()),
        };

        decode_document(&bytes).map_err(|e| DeoError::Corrupt {
            path,
            reason: e.to_string(),
        })
    }

    /// Remove a document file; a missing file is an error
    pub fn delete_document(&self, database: &str, collection: &str, id: &str) -> Result<()> {
        let path = self.layout.document_path(database, collection, id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "document deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found(database, collection, id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Load every document in a collection, in file name order
    ///
    /// - Missing collection → empty result
    /// - Entries without the document extension, directories, and files whose
    ///   id is not a plain name are ignored
    /// - Corrupt files (and files removed mid-scan) are skipped with a warning
    pub fn scan_collection(&self, database: &str, collection: &str) -> Result<Vec<Document>> {
        let dir = self.layout.collection_path(database, collection)?;

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_path = entry.path();
            if !file_path.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(id) = self.layout.parse_document_id(file_name) else {
                continue;
            };
            if let Err(e) = validate_name("document id", id) {
                debug!(file = file_name, error = %e, "ignoring entry with unusable id");
                continue;
            }
            ids.push(id.to_string());
        }
        ids.sort();

        let mut documents = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.load_document(database, collection, id) {
                Ok(document) => documents.push(document),
                Err(DeoError::Corrupt { path, reason }) => {
                    warn!(path = %path.display(), %reason, "skipping corrupt document");
                }
                Err(e) if e.is_not_found() => {
                    debug!(id = %id, "document vanished during scan");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            database,
            collection,
            files = ids.len(),
            loaded = documents.len(),
            "collection scanned"
        );
        Ok(documents)
    }
}

// =============================================================================
// Private Helpers
// =============================================================================

fn not_found(database: &str, collection: &str, id: &str) -> DeoError {
    DeoError::NotFound {
        database: database.to_string(),
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

/// Sorted names of the immediate subdirectories of `dir`
fn list_subdirectories(dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// `remove_dir_all` that treats a missing directory as success
fn remove_tree(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
