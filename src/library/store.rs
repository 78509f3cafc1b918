//! Flat-file persistence for the shelf.
//!
//! The whole collection is written as one pretty-printed JSON array and
//! rewritten after every mutation. The store is the only code that touches
//! the shelf file.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use super::shelf::Shelf;

/// Errors from reading or writing the shelf file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read shelf file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse shelf file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write shelf file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode shelf to JSON: {source}")]
    Encode { source: serde_json::Error },
}

/// File-backed store for a shelf
pub struct ShelfStore {
    path: PathBuf,
}

impl ShelfStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the configured default shelf path
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(crate::config::shelf_path()?))
    }

    /// Path to the shelf file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the shelf from disk.
    ///
    /// A missing file is an empty shelf, not an error.
    pub async fn load(&self) -> Result<Shelf, StoreError> {
        if !self.path.exists() {
            return Ok(Shelf::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Save the shelf to disk, overwriting the file.
    ///
    /// The write is not atomic: a crash mid-write can leave a truncated
    /// file behind.
    pub async fn save(&self, shelf: &Shelf) -> Result<(), StoreError> {
        // A bare file name has an empty parent; nothing to create then
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }

        let content = serde_json::to_string_pretty(shelf)
            .map_err(|source| StoreError::Encode { source })?;

        fs::write(&self.path, content)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }
}
