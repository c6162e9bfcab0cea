//! Repository metadata: the persisted head/active counters.

use crate::layout::{read_optional, write_atomic};
use crate::{StoreError, StoreLayout, StoreResult, VersionId};
use std::path::Path;
use tracing::debug;

/// Head and active version ids of a store.
///
/// Constructing a value performs no I/O; use [`RepoMetadata::load`] to read
/// the persisted state and [`RepoMetadata::save`] to write it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoMetadata {
    /// Id of the most recently created version.
    pub head: VersionId,

    /// Id of the version the working directory reflects.
    pub active: VersionId,

    /// Whether the store exists in this working directory.
    pub initialized: bool,
}

impl RepoMetadata {
    /// Metadata of a freshly initialized store.
    pub fn initial() -> Self {
        Self {
            head: VersionId::INITIAL,
            active: VersionId::INITIAL,
            initialized: true,
        }
    }

    /// Load metadata from disk.
    ///
    /// A store is initialized when both `HEAD` and `ACTIVE` exist; otherwise
    /// an uninitialized value is returned.
    pub async fn load(layout: &StoreLayout) -> StoreResult<Self> {
        let head_file = layout.head_file();
        let active_file = layout.active_file();

        let (Some(head), Some(active)) = (
            read_optional(&head_file).await?,
            read_optional(&active_file).await?,
        ) else {
            debug!(store = %layout.root().display(), "No store metadata found");
            return Ok(Self::default());
        };

        Ok(Self {
            head: parse_id(&head_file, &head)?,
            active: parse_id(&active_file, &active)?,
            initialized: true,
        })
    }

    /// Persist head and active ids.
    pub async fn save(&self, layout: &StoreLayout) -> StoreResult<()> {
        write_atomic(&layout.head_file(), self.head.to_string().as_bytes()).await?;
        write_atomic(&layout.active_file(), self.active.to_string().as_bytes()).await
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Record a newly created version as both head and active.
    pub(crate) fn advance_to(&mut self, id: VersionId) {
        self.head = id;
        self.active = id;
    }
}

fn parse_id(path: &Path, content: &str) -> StoreResult<VersionId> {
    let id: VersionId = content.trim().parse().map_err(|_| {
        StoreError::corrupted(format!(
            "{} does not contain a version id: {:?}",
            path.display(),
            content.trim()
        ))
    })?;

    // Every stored id must leave room for the next version
    if id.next().is_none() {
        return Err(StoreError::corrupted(format!(
            "{} holds an out of range version id: {}",
            path.display(),
            id
        )));
    }
    Ok(id)
}
