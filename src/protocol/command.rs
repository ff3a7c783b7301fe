//! Command definitions
//!
//! One variant per operation a transport layer can request.

use crate::document::Document;
use crate::query::ListOptions;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    CreateDatabase,
    ListDatabases,
    DeleteDatabase,
    CreateCollection,
    ListCollections,
    DeleteCollection,
    CreateDocument,
    ReadDocument,
    UpdateDocument,
    DeleteDocument,
    ListDocuments,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::CreateDatabase => "create_database",
            CommandType::ListDatabases => "list_databases",
            CommandType::DeleteDatabase => "delete_database",
            CommandType::CreateCollection => "create_collection",
            CommandType::ListCollections => "list_collections",
            CommandType::DeleteCollection => "delete_collection",
            CommandType::CreateDocument => "create_document",
            CommandType::ReadDocument => "read_document",
            CommandType::UpdateDocument => "update_document",
            CommandType::DeleteDocument => "delete_document",
            CommandType::ListDocuments => "list_documents",
        }
    }

    /// HTTP method and path a REST transport would route to this command
    pub fn route(&self) -> (&'static str, &'static str) {
        match self {
            CommandType::CreateDatabase => ("POST", "/dbs"),
            CommandType::ListDatabases => ("GET", "/dbs"),
            CommandType::DeleteDatabase => ("DELETE", "/dbs/{db}"),
            CommandType::CreateCollection => ("POST", "/dbs/{db}/collections"),
            CommandType::ListCollections => ("GET", "/dbs/{db}/collections"),
            CommandType::DeleteCollection => ("DELETE", "/dbs/{db}/collections/{collection}"),
            CommandType::CreateDocument => {
                ("POST", "/dbs/{db}/collections/{collection}/documents")
            }
            CommandType::ReadDocument => {
                ("GET", "/dbs/{db}/collections/{collection}/documents/{id}")
            }
            CommandType::UpdateDocument => {
                ("PUT", "/dbs/{db}/collections/{collection}/documents/{id}")
            }
            CommandType::DeleteDocument => {
                ("DELETE", "/dbs/{db}/collections/{collection}/documents/{id}")
            }
            CommandType::ListDocuments => ("GET", "/dbs/{db}/collections/{collection}/documents"),
        }
    }
}

/// A parsed command
#[derive(Debug, Clone)]
pub enum Command {
    CreateDatabase {
        name: String,
    },
    ListDatabases,
    DeleteDatabase {
        name: String,
    },
    CreateCollection {
        database: String,
        name: String,
    },
    ListCollections {
        database: String,
    },
    DeleteCollection {
        database: String,
        name: String,
    },
    /// Id is generated by the store
    CreateDocument {
        database: String,
        collection: String,
        content: Document,
    },
    ReadDocument {
        database: String,
        collection: String,
        id: String,
    },
    /// Full replace
    UpdateDocument {
        database: String,
        collection: String,
        id: String,
        content: Document,
    },
    DeleteDocument {
        database: String,
        collection: String,
        id: String,
    },
    ListDocuments {
        database: String,
        collection: String,
        options: ListOptions,
    },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::CreateDatabase { .. } => CommandType::CreateDatabase,
            Command::ListDatabases => CommandType::ListDatabases,
            Command::DeleteDatabase { .. } => CommandType::DeleteDatabase,
            Command::CreateCollection { .. } => CommandType::CreateCollection,
            Command::ListCollections { .. } => CommandType::ListCollections,
            Command::DeleteCollection { .. } => CommandType::DeleteCollection,
            Command::CreateDocument { .. } => CommandType::CreateDocument,
            Command::ReadDocument { .. } => CommandType::ReadDocument,
            Command::UpdateDocument { .. } => CommandType::UpdateDocument,
            Command::DeleteDocument { .. } => CommandType::DeleteDocument,
            Command::ListDocuments { .. } => CommandType::ListDocuments,
        }
    }
}
