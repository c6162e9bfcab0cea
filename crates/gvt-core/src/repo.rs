//! The repository: every operation the command line exposes.

use crate::history::describe_version;
use crate::layout::create_dir_all;
use crate::{
    History, RepoMetadata, StoreConfig, StoreError, StoreLayout, StoreResult, TrackedIndex,
    Version, VersionId, VersionStore,
};
use gvt_util::path::resolve_name;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Result of [`Repository::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The file is now tracked and captured in a new version.
    Added(Version),
    /// The file was already tracked; nothing changed.
    AlreadyTracked(String),
}

/// Result of [`Repository::detach`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetachOutcome {
    /// The file is no longer tracked; a new version records that.
    Detached(Version),
    /// The file was not tracked; nothing changed.
    NotTracked(String),
}

/// Result of [`Repository::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new version captures the current content of all tracked files.
    Committed(Version),
    /// The file is not tracked; nothing changed.
    NotTracked(String),
}

/// A version store bound to one working directory.
pub struct Repository {
    config: StoreConfig,
    store: VersionStore,
    metadata: RepoMetadata,
}

impl Repository {
    /// Create a handle without reading anything from disk.
    ///
    /// The handle reports itself as uninitialized until [`Repository::load`]
    /// or [`Repository::initialize`] runs.
    pub fn new(work_dir: impl Into<PathBuf>, config: StoreConfig) -> Self {
        let layout = StoreLayout::new(work_dir, &config);
        Self {
            config,
            store: VersionStore::new(layout),
            metadata: RepoMetadata::default(),
        }
    }

    /// Open the store in `work_dir`, loading its persisted metadata.
    pub async fn load(work_dir: impl Into<PathBuf>, config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        let mut repo = Self::new(work_dir, config);
        repo.metadata = RepoMetadata::load(repo.layout()).await?;
        debug!(
            store = %repo.layout().root().display(),
            initialized = repo.metadata.initialized,
            head = %repo.metadata.head,
            active = %repo.metadata.active,
            "Loaded repository"
        );
        Ok(repo)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn layout(&self) -> &StoreLayout {
        self.store.layout()
    }

    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    pub fn metadata(&self) -> RepoMetadata {
        self.metadata
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata.is_initialized()
    }

    /// Id of the newest version.
    pub fn head(&self) -> VersionId {
        self.metadata.head
    }

    /// Id of the version the working directory reflects.
    pub fn active(&self) -> VersionId {
        self.metadata.active
    }

    /// Create the store with an empty version 0.
    pub async fn initialize(&mut self) -> StoreResult<Version> {
        if self.is_initialized() {
            return Err(StoreError::AlreadyInitialized);
        }

        create_dir_all(&self.layout().versions_dir()).await?;
        let version = self.store.create_initial(&self.config.init_message).await?;

        let metadata = RepoMetadata::initial();
        metadata.save(self.layout()).await?;
        self.metadata = metadata;

        info!(store = %self.layout().root().display(), "Initialized store");
        Ok(version)
    }

    /// Check whether a version exists on disk.
    pub async fn version_exists(&self, id: VersionId) -> StoreResult<bool> {
        self.ensure_initialized()?;
        Ok(self.store.exists(id).await)
    }

    /// Tracked names in the order they were added.
    pub async fn tracked_files(&self) -> StoreResult<Vec<String>> {
        self.ensure_initialized()?;
        Ok(TrackedIndex::load(self.layout()).await?.names().to_vec())
    }

    /// Check whether a path is tracked.
    pub async fn is_tracked(&self, path: &Path) -> StoreResult<bool> {
        self.ensure_initialized()?;
        let name = self.resolve(path)?;
        Ok(TrackedIndex::load(self.layout()).await?.is_tracked(&name))
    }

    /// Start tracking a file and capture it in a new version.
    ///
    /// The version message defaults to `file added: <name>`.
    pub async fn add(&mut self, path: &Path, message: Option<&str>) -> StoreResult<AddOutcome> {
        self.ensure_initialized()?;
        let name = self.resolve(path)?;
        self.ensure_work_file(path, &name).await?;

        let mut index = TrackedIndex::load(self.layout()).await?;
        if !index.track(&name) {
            debug!(file = %name, "Already tracked");
            return Ok(AddOutcome::AlreadyTracked(name));
        }
        index.save(self.layout()).await?;

        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("file added: {name}"));
        let version = self.snapshot(&index, &message).await?;
        Ok(AddOutcome::Added(version))
    }

    /// Stop tracking a file and record that in a new version.
    ///
    /// The file itself stays in the working directory. The version message
    /// is `file detached: <name>`, followed by `message` on its own line.
    pub async fn detach(
        &mut self,
        path: &Path,
        message: Option<&str>,
    ) -> StoreResult<DetachOutcome> {
        self.ensure_initialized()?;
        let name = self.resolve(path)?;

        let mut index = TrackedIndex::load(self.layout()).await?;
        if !index.untrack(&name) {
            debug!(file = %name, "Not tracked");
            return Ok(DetachOutcome::NotTracked(name));
        }
        index.save(self.layout()).await?;

        let mut full_message = format!("file detached: {name}");
        if let Some(extra) = message {
            full_message.push('\n');
            full_message.push_str(extra);
        }
        let version = self.snapshot(&index, &full_message).await?;
        Ok(DetachOutcome::Detached(version))
    }

    /// Record the current content of every tracked file in a new version.
    ///
    /// `path` must exist and be tracked. The version message defaults to
    /// `file committed: <name>`.
    pub async fn commit(
        &mut self,
        path: &Path,
        message: Option<&str>,
    ) -> StoreResult<CommitOutcome> {
        self.ensure_initialized()?;
        let name = self.resolve(path)?;
        self.ensure_work_file(path, &name).await?;

        let index = TrackedIndex::load(self.layout()).await?;
        if !index.is_tracked(&name) {
            debug!(file = %name, "Not tracked");
            return Ok(CommitOutcome::NotTracked(name));
        }

        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("file committed: {name}"));
        let version = self.snapshot(&index, &message).await?;
        Ok(CommitOutcome::Committed(version))
    }

    /// Create a new version of all tracked files with the given message.
    pub async fn create_version(&mut self, message: &str) -> StoreResult<Version> {
        self.ensure_initialized()?;
        let index = TrackedIndex::load(self.layout()).await?;
        self.snapshot(&index, message).await
    }

    /// Get a version by id.
    pub async fn get_version(&self, id: VersionId) -> StoreResult<Version> {
        self.ensure_initialized()?;
        self.store.get(id).await
    }

    /// Read the content a version captured for `name`.
    pub async fn read_file(&self, id: VersionId, name: &str) -> StoreResult<Vec<u8>> {
        self.ensure_initialized()?;
        self.store.read_file(id, name).await
    }

    /// History from head down to version 0, at most `limit` entries.
    pub fn history(&self, limit: Option<usize>) -> StoreResult<History> {
        self.ensure_initialized()?;
        Ok(History::new(self.store.clone(), self.head(), limit))
    }

    /// Describe a version: its id followed by its full message.
    pub async fn describe_version(&self, id: VersionId) -> StoreResult<String> {
        self.ensure_initialized()?;
        describe_version(&self.store, id).await
    }

    /// Restore a version into the working directory and mark it active.
    ///
    /// Returns the names that were restored. The tracked-file index is not
    /// changed.
    pub async fn checkout(&mut self, id: VersionId) -> StoreResult<Vec<String>> {
        self.ensure_initialized()?;
        let restored = self.store.restore(id).await?;

        self.metadata.active = id;
        self.metadata.save(self.layout()).await?;

        Ok(restored)
    }

    async fn snapshot(&mut self, index: &TrackedIndex, message: &str) -> StoreResult<Version> {
        self.store
            .create_version(&mut self.metadata, index, message)
            .await
    }

    fn ensure_initialized(&self) -> StoreResult<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    /// Turn a user-supplied path into a tracked name.
    fn resolve(&self, path: &Path) -> StoreResult<String> {
        let name = resolve_name(self.layout().work_dir(), path).ok_or_else(|| {
            StoreError::InvalidPath(format!(
                "{} is not inside the working directory",
                path.display()
            ))
        })?;

        let store_dir = self.layout().store_dir_name();
        let first = name.split('/').next().unwrap_or_default();
        if first == store_dir {
            return Err(StoreError::InvalidPath(format!(
                "{} is inside the store directory",
                path.display()
            )));
        }

        Ok(name)
    }

    /// Require `name` to be an existing regular file in the working directory.
    async fn ensure_work_file(&self, path: &Path, name: &str) -> StoreResult<()> {
        let full_path = self.layout().work_file(name);
        match fs::metadata(&full_path).await {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(StoreError::InvalidPath(format!(
                "{} is not a regular file",
                path.display()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::FileNotFound(path.to_path_buf()))
            }
            Err(e) => Err(StoreError::read(&full_path, e)),
        }
    }
}
