//! Configuration for deodb
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{DeoError, Result};

/// Name of the storage root directory created under the user's home
pub const ROOT_DIR_NAME: &str = ".deo";

/// Extension of document files
pub const DEFAULT_EXTENSION: &str = "msgpack";

/// Main configuration for a deodb store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all databases
    /// Internal structure:
    ///   {root_dir}/
    ///     └── {database}/
    ///           └── {collection}/
    ///                 └── {id}.msgpack
    pub root_dir: PathBuf,

    /// Extension (without the dot) that marks a file as a document
    pub extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./deo_data"),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Config rooted at `<home>/.deo`
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            DeoError::Environment("could not resolve the home directory".to_string())
        })?;

        Ok(Self::builder().root_dir(home.join(ROOT_DIR_NAME)).build())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage root directory
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the document file extension (leading dots are stripped)
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        self.config.extension = ext.trim_start_matches('.').to_string();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
