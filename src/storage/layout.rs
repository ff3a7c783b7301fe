//! On-disk layout
//!
//! Maps names to paths under the storage root:
//! `{root}/{database}/{collection}/{id}.{ext}`.
//!
//! Every name is used as a single path segment, so anything that could
//! escape its parent directory is rejected before a path is built.

use std::path::{Path, PathBuf};

use crate::error::{DeoError, Result};

/// Path construction for databases, collections and documents
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    extension: String,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `{root}/{database}`
    pub fn database_path(&self, database: &str) -> Result<PathBuf> {
        validate_name("database", database)?;
        Ok(self.root.join(database))
    }

    /// `{root}/{database}/{collection}`
    pub fn collection_path(&self, database: &str, collection: &str) -> Result<PathBuf> {
        validate_name("collection", collection)?;
        Ok(self.database_path(database)?.join(collection))
    }

    /// `{root}/{database}/{collection}/{id}.{ext}`
    ///
    /// Pure: identical inputs always give an identical path.
    pub fn document_path(&self, database: &str, collection: &str, id: &str) -> Result<PathBuf> {
        validate_name("document id", id)?;
        Ok(self
            .collection_path(database, collection)?
            .join(self.document_file_name(id)))
    }

    /// "{id}.{ext}"
    pub fn document_file_name(&self, id: &str) -> String {
        format!("{}.{}", id, self.extension)
    }

    /// Parse a document id from a file name
    /// "o1.msgpack" → Some("o1"), "notes.txt" → None
    pub fn parse_document_id<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let id = file_name
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }
}

/// Reject names that are not a single, plain path segment
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DeoError::InvalidInput(format!("{} name is empty", kind)));
    }
    if name == "." || name == ".." {
        return Err(DeoError::InvalidInput(format!(
            "{} name '{}' is reserved",
            kind, name
        )));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(DeoError::InvalidInput(format!(
            "{} name '{}' contains a path separator",
            kind, name
        )));
    }
    Ok(())
}
