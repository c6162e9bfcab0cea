//! Store error types.

use crate::VersionId;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The working directory has no store yet.
    #[error("Store is not initialized")]
    NotInitialized,

    /// `init` was run on a directory that already has a store.
    #[error("Store is already initialized")]
    AlreadyInitialized,

    /// A working-directory file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// No version with this id exists.
    #[error("Version not found: {0}")]
    VersionNotFound(VersionId),

    /// Text that does not parse as a non-negative version id.
    #[error("Invalid version number: {0}")]
    InvalidVersionNumber(String),

    /// A path that cannot be tracked (outside the working directory, or
    /// inside the store itself).
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Writing to the store or the working directory failed.
    #[error("Failed to write {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from the store or the working directory failed.
    #[error("Failed to read {}: {source}", path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store metadata has unexpected contents.
    #[error("Store corrupted: {0}")]
    Corrupted(String),

    /// Project configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl StoreError {
    /// Wrap an IO error raised while writing `path`.
    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::StorageWrite {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap an IO error raised while reading `path`.
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::StorageRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a corrupted-store error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }

    /// Whether this error comes from the underlying filesystem.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::StorageWrite { .. } | Self::StorageRead { .. } | Self::Corrupted(_)
        )
    }
}
