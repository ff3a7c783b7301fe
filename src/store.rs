//! Store Module
//!
//! The document store: the function-call contract a transport layer uses.
//!
//! ## Responsibilities
//! - Namespace management (databases, collections)
//! - Document persistence (save, load, delete by id)
//! - Document queries (scan, filter, sort, paginate)
//! - Routing `Command`s to the operations above

use std::path::{Path, PathBuf};

use tracing::{debug, error};
use uuid::Uuid;

use crate::config::Config;
use crate::document::Document;
use crate::error::{DeoError, Result};
use crate::protocol::{Command, Response};
use crate::query::ListOptions;
use crate::storage::{validate_name, Layout, StorageManager};

/// The document store
///
/// ## Concurrency Model
///
/// None. The store holds no locks, caches or handles; each call does its
/// own filesystem work. It is `Send + Sync` and can be shared across
/// request threads, but two writers saving the same id race and the last
/// write wins. Read-modify-write sequences done by callers are not atomic.
#[derive(Debug, Clone)]
pub struct Store {
    /// Store configuration
    config: Config,

    /// Filesystem access
    storage: StorageManager,
}

impl Store {
    /// Open a store over the configured root
    ///
    /// The root is not created here: a missing root is a valid store with
    /// no databases, and the first create call makes it.
    pub fn open(config: Config) -> Result<Self> {
        validate_name("extension", &config.extension)?;

        let layout = Layout::new(&config.root_dir, &config.extension);
        debug!(root = %config.root_dir.display(), ext = %config.extension, "store opened");

        Ok(Self {
            storage: StorageManager::new(layout),
            config,
        })
    }

    /// Open with a root path (convenience method)
    ///
    /// Uses default config with the specified root
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().root_dir(path).build())
    }

    /// Open the per-user store at `<home>/.deo`
    pub fn open_default() -> Result<Self> {
        Self::open(Config::from_home()?)
    }

    // =========================================================================
    // Namespaces
    // =========================================================================

    pub fn list_databases(&self) -> Result<Vec<String>> {
        self.storage.list_databases()
    }

    pub fn create_database(&self, name: &str) -> Result<()> {
        self.storage.create_database(name)
    }

    pub fn delete_database(&self, name: &str) -> Result<()> {
        self.storage.delete_database(name)
    }

    pub fn list_collections(&self, database: &str) -> Result<Vec<String>> {
        self.storage.list_collections(database)
    }

    pub fn create_collection(&self, database: &str, name: &str) -> Result<()> {
        self.storage.create_collection(database, name)
    }

    pub fn delete_collection(&self, database: &str, name: &str) -> Result<()> {
        self.storage.delete_collection(database, name)
    }

    // =========================================================================
    // Documents
    // =========================================================================

    /// Path of a document file
    pub fn document_path(&self, database: &str, collection: &str, id: &str) -> Result<PathBuf> {
        self.storage.document_path(database, collection, id)
    }

    /// Write `content` as the whole document (creates or replaces)
    ///
    /// `_id` is not touched; keeping it in sync with `id` is up to the caller.
    pub fn save_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        content: &Document,
    ) -> Result<()> {
        self.storage.save_document(database, collection, id, content)
    }

    pub fn load_document(&self, database: &str, collection: &str, id: &str) -> Result<Document> {
        self.storage.load_document(database, collection, id)
    }

    pub fn delete_document(&self, database: &str, collection: &str, id: &str) -> Result<()> {
        self.storage.delete_document(database, collection, id)
    }

    /// Save new content under a fresh UUID, embedding it as `_id`
    ///
    /// Returns the document as stored.
    pub fn create_document(
        &self,
        database: &str,
        collection: &str,
        mut content: Document,
    ) -> Result<Document> {
        let id = Uuid::new_v4().to_string();
        content.set_id(id.as_str());
        self.storage.save_document(database, collection, &id, &content)?;
        Ok(content)
    }

    /// Replace an existing or new document; returns the content as written
    pub fn update_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        content: Document,
    ) -> Result<Document> {
        self.storage.save_document(database, collection, id, &content)?;
        Ok(content)
    }

    /// List a collection through the filter → sort → window pipeline
    ///
    /// A collection that does not exist lists as empty.
    pub fn list_documents(
        &self,
        database: &str,
        collection: &str,
        options: &ListOptions,
    ) -> Result<Vec<Document>> {
        let documents = self.storage.scan_collection(database, collection)?;
        Ok(options.apply(documents))
    }

    // =========================================================================
    // Command Routing
    // =========================================================================

    /// Execute a command
    ///
    /// Routes commands to the operations above and translates the outcome
    /// into a response. Never fails: errors become error responses.
    pub fn execute(&self, command: Command) -> Response {
        let command_type = command.command_type();
        debug!(command = command_type.as_str(), "executing");

        let response = match command {
            Command::CreateDatabase { name } => match self.create_database(&name) {
                Ok(()) => Response::created("Database created successfully", None),
                Err(e) => self.failed(&e, "Failed to create database"),
            },
            Command::ListDatabases => match self.list_databases() {
                Ok(names) => Response::ok(names_json(names)),
                Err(e) => self.failed(&e, "Failed to list databases"),
            },
            Command::DeleteDatabase { name } => match self.delete_database(&name) {
                Ok(()) => Response::done("Database deleted successfully"),
                Err(e) => self.failed(&e, "Failed to delete database"),
            },
            Command::CreateCollection { database, name } => {
                match self.create_collection(&database, &name) {
                    Ok(()) => Response::created("Collection created successfully", None),
                    Err(e) => self.failed(&e, "Failed to create collection"),
                }
            }
            Command::ListCollections { database } => match self.list_collections(&database) {
                Ok(names) => Response::ok(names_json(names)),
                Err(e) => self.failed(&e, "Failed to list collections"),
            },
            Command::DeleteCollection { database, name } => {
                match self.delete_collection(&database, &name) {
                    Ok(()) => Response::done("Collection deleted successfully"),
                    Err(e) => self.failed(&e, "Failed to delete collection"),
                }
            }
            Command::CreateDocument {
                database,
                collection,
                content,
            } => match self.create_document(&database, &collection, content) {
                Ok(doc) => Response::created("Document created successfully", Some(doc.to_json())),
                Err(e) => self.failed(&e, "Failed to create document"),
            },
            Command::ReadDocument {
                database,
                collection,
                id,
            } => match self.load_document(&database, &collection, &id) {
                Ok(doc) => Response::ok(doc.to_json()),
                Err(e) => self.failed(&e, "Failed to read document"),
            },
            Command::UpdateDocument {
                database,
                collection,
                id,
                content,
            } => match self.update_document(&database, &collection, &id, content) {
                Ok(doc) => {
                    let mut response = Response::done("Document updated successfully");
                    response.data = Some(doc.to_json());
                    response
                }
                Err(e) => self.failed(&e, "Failed to update document"),
            },
            Command::DeleteDocument {
                database,
                collection,
                id,
            } => match self.delete_document(&database, &collection, &id) {
                Ok(()) => Response::done("Document deleted successfully"),
                Err(e) => self.failed(&e, "Failed to delete document"),
            },
            Command::ListDocuments {
                database,
                collection,
                options,
            } => match self.list_documents(&database, &collection, &options) {
                Ok(docs) => Response::ok(serde_json::Value::Array(
                    docs.iter().map(Document::to_json).collect(),
                )),
                Err(e) => self.failed(&e, "Failed to list documents"),
            },
        };

        debug!(
            command = command_type.as_str(),
            status = response.status.http_code(),
            "executed"
        );
        response
    }

    fn failed(&self, err: &DeoError, fallback: &str) -> Response {
        match err {
            DeoError::NotFound { .. } | DeoError::InvalidInput(_) | DeoError::Protocol(_) => {
                debug!(error = %err, "request rejected");
            }
            _ => error!(error = %err, "{}", fallback),
        }
        Response::from_error(err, fallback)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the storage root
    pub fn root(&self) -> &Path {
        &self.config.root_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn names_json(names: Vec<String>) -> serde_json::Value {
    serde_json::Value::Array(names.into_iter().map(serde_json::Value::String).collect())
}
