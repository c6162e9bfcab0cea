//! Version storage implementation.

use crate::layout::{create_dir_all, read_optional, write_atomic};
use crate::version::NO_MESSAGE;
use crate::{
    RepoMetadata, StoreError, StoreLayout, StoreResult, TrackedIndex, Version, VersionId,
};
use gvt_util::path::to_slash;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Storage for immutable version records.
///
/// Each version is a directory holding its message and full copies of the
/// files that were tracked when it was created. See [`StoreLayout`] for the
/// directory structure.
#[derive(Debug, Clone)]
pub struct VersionStore {
    layout: StoreLayout,
}

impl VersionStore {
    pub fn new(layout: StoreLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Write version 0: an empty snapshot with the given message.
    pub(crate) async fn create_initial(&self, message: &str) -> StoreResult<Version> {
        let id = VersionId::INITIAL;
        create_dir_all(&self.layout.files_dir(id)).await?;
        write_atomic(&self.layout.message_file(id), message.as_bytes()).await?;

        Ok(Version {
            id,
            message: message.to_string(),
            files: Vec::new(),
        })
    }

    /// Create a new version capturing every tracked file.
    ///
    /// The new id is `head + 1`. Tracked files that no longer exist in the
    /// working directory are skipped. On success `head` and `active` both
    /// point at the new version and are persisted.
    ///
    /// This is not atomic: if a copy fails, a partially written version
    /// directory is left behind and `head` is not advanced. The next call
    /// reuses the id and clears that directory first.
    pub async fn create_version(
        &self,
        metadata: &mut RepoMetadata,
        index: &TrackedIndex,
        message: &str,
    ) -> StoreResult<Version> {
        if !metadata.is_initialized() {
            return Err(StoreError::NotInitialized);
        }

        let id = metadata.head.next().ok_or_else(|| {
            StoreError::corrupted(format!("no version id left after {}", metadata.head))
        })?;

        // A failed earlier attempt may have left a partial directory for this id
        let version_dir = self.layout.version_dir(id);
        if self.exists(id).await {
            warn!(version = %id, "Removing leftover directory of an unfinished version");
            fs::remove_dir_all(&version_dir)
                .await
                .map_err(|e| StoreError::write(&version_dir, e))?;
        }

        let files_dir = self.layout.files_dir(id);
        create_dir_all(&files_dir).await?;

        let mut files = Vec::with_capacity(index.len());
        for name in index.names() {
            let src = self.layout.work_file(name);

            match fs::metadata(&src).await {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    warn!(file = %name, "Skipping tracked path that is not a regular file");
                    continue;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!(file = %name, "Skipping tracked file missing from working directory");
                    continue;
                }
                Err(e) => return Err(StoreError::read(&src, e)),
            }

            let dst = files_dir.join(name);
            if let Some(parent) = dst.parent() {
                create_dir_all(parent).await?;
            }
            fs::copy(&src, &dst)
                .await
                .map_err(|e| StoreError::write(&dst, e))?;

            debug!(version = %id, file = %name, "Snapshotted");
            files.push(name.clone());
        }

        write_atomic(&self.layout.message_file(id), message.as_bytes()).await?;

        metadata.advance_to(id);
        metadata.save(&self.layout).await?;

        files.sort();
        info!("Created version {} with {} files", id, files.len());

        Ok(Version {
            id,
            message: message.to_string(),
            files,
        })
    }

    /// Check whether a version exists on disk.
    pub async fn exists(&self, id: VersionId) -> bool {
        fs::metadata(self.layout.version_dir(id))
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Get a version by id.
    pub async fn get(&self, id: VersionId) -> StoreResult<Version> {
        if !self.exists(id).await {
            return Err(StoreError::VersionNotFound(id));
        }

        Ok(Version {
            id,
            message: self.message(id).await?,
            files: self.list_files(id).await?,
        })
    }

    /// Full message of a version, or `"(no message)"` when it has none.
    pub async fn message(&self, id: VersionId) -> StoreResult<String> {
        Ok(read_optional(&self.layout.message_file(id))
            .await?
            .unwrap_or_else(|| NO_MESSAGE.to_string()))
    }

    /// Read the content a version captured for `name`.
    pub async fn read_file(&self, id: VersionId, name: &str) -> StoreResult<Vec<u8>> {
        if !self.exists(id).await {
            return Err(StoreError::VersionNotFound(id));
        }

        let path = self.layout.files_dir(id).join(name);
        fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::FileNotFound(PathBuf::from(name))
            } else {
                StoreError::read(&path, e)
            }
        })
    }

    /// Names of all files captured by a version, sorted.
    pub async fn list_files(&self, id: VersionId) -> StoreResult<Vec<String>> {
        let files_dir = self.layout.files_dir(id);
        let mut files = Vec::new();
        let mut pending = vec![files_dir.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                // A version without a files directory captured nothing
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::read(&dir, e)),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| StoreError::read(&dir, e))?
            {
                let path = entry.path();
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| StoreError::read(&path, e))?;

                if file_type.is_dir() {
                    pending.push(path);
                } else if let Some(name) = snapshot_name(&files_dir, &path) {
                    files.push(name);
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

fn snapshot_name(files_dir: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(files_dir).ok().map(to_slash)
}
