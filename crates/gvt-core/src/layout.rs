//! On-disk layout of a store.
//!
//! ```text
//! <work_dir>/<store_dir>/
//!   HEAD                   # id of the newest version
//!   ACTIVE                 # id the working directory reflects
//!   index.txt              # tracked names, one per line
//!   versions/
//!     <id>/
//!       message.txt
//!       files/
//!         <name>           # full copy of each tracked file
//! ```

use crate::{StoreConfig, StoreError, StoreResult, VersionId};
use std::path::{Path, PathBuf};
use tokio::fs;

const HEAD_FILE: &str = "HEAD";
const ACTIVE_FILE: &str = "ACTIVE";
const INDEX_FILE: &str = "index.txt";
const VERSIONS_DIR: &str = "versions";
const MESSAGE_FILE: &str = "message.txt";
const FILES_DIR: &str = "files";

/// Resolved paths of a store and its working directory.
#[derive(Debug, Clone)]
pub struct StoreLayout {
    work_dir: PathBuf,
    root: PathBuf,
    store_dir_name: String,
}

impl StoreLayout {
    /// Compute the layout for `work_dir`. Performs no I/O.
    pub fn new(work_dir: impl Into<PathBuf>, config: &StoreConfig) -> Self {
        let work_dir = work_dir.into();
        let root = work_dir.join(&config.store_dir);
        Self {
            work_dir,
            root,
            store_dir_name: config.store_dir.clone(),
        }
    }

    /// The working directory whose files are tracked.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The hidden store directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name of the store directory, relative to the working directory.
    pub fn store_dir_name(&self) -> &str {
        &self.store_dir_name
    }

    pub fn head_file(&self) -> PathBuf {
        self.root.join(HEAD_FILE)
    }

    pub fn active_file(&self) -> PathBuf {
        self.root.join(ACTIVE_FILE)
    }

    pub fn index_file(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.root.join(VERSIONS_DIR)
    }

    pub fn version_dir(&self, id: VersionId) -> PathBuf {
        self.versions_dir().join(id.to_string())
    }

    pub fn message_file(&self, id: VersionId) -> PathBuf {
        self.version_dir(id).join(MESSAGE_FILE)
    }

    pub fn files_dir(&self, id: VersionId) -> PathBuf {
        self.version_dir(id).join(FILES_DIR)
    }

    /// Path of a tracked name in the working directory.
    pub fn work_file(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }
}

/// Write a file atomically (write to temp file, then rename).
pub(crate) async fn write_atomic(path: &Path, content: &[u8]) -> StoreResult<()> {
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content)
        .await
        .map_err(|e| StoreError::write(&temp_path, e))?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| StoreError::write(path, e))
}

/// Read a text file, returning `None` if it doesn't exist.
pub(crate) async fn read_optional(path: &Path) -> StoreResult<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::read(path, e)),
    }
}

/// Create a directory and its parents.
pub(crate) async fn create_dir_all(path: &Path) -> StoreResult<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| StoreError::write(path, e))
}
