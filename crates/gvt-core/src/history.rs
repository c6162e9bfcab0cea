//! History traversal and version inspection.

use crate::version::summary_of;
use crate::{StoreError, StoreResult, VersionId, VersionStore};
use futures::{Stream, TryStreamExt};
use std::fmt;

/// One line of history: a version id and the first line of its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: VersionId,
    pub summary: String,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.summary)
    }
}

/// A view of the history from head down to version 0, newest first.
///
/// Nothing is read until the entries are consumed, and every call to
/// [`History::entries`] starts again from head.
#[derive(Debug, Clone)]
pub struct History {
    store: VersionStore,
    head: VersionId,
    len: u64,
}

impl History {
    /// History of `store` as of `head`, keeping at most `limit` entries
    /// (`None` keeps all of them).
    pub fn new(store: VersionStore, head: VersionId, limit: Option<usize>) -> Self {
        let available = head.get().saturating_add(1);
        let len = match limit {
            Some(limit) => available.min(limit as u64),
            None => available,
        };
        Self { store, head, len }
    }

    /// Number of entries this history yields.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ids covered by this history, strictly descending from head.
    pub fn ids(&self) -> impl Iterator<Item = VersionId> {
        let head = self.head.get();
        (0..self.len).map(move |offset| VersionId::new(head - offset))
    }

    /// Stream the entries, reading each message as it is polled.
    pub fn entries(&self) -> impl Stream<Item = StoreResult<HistoryEntry>> + '_ {
        async_stream::try_stream! {
            for id in self.ids() {
                let message = self.store.message(id).await?;
                yield HistoryEntry {
                    id,
                    summary: summary_of(&message).to_string(),
                };
            }
        }
    }

    /// Read every entry.
    pub async fn collect(&self) -> StoreResult<Vec<HistoryEntry>> {
        self.entries().try_collect().await
    }

    /// Render the history one entry per line.
    pub async fn render(&self) -> StoreResult<String> {
        let entries = self.collect().await?;
        Ok(entries.iter().map(|entry| format!("{entry}\n")).collect())
    }
}

/// Describe a version: its id followed by its full message.
pub async fn describe_version(store: &VersionStore, id: VersionId) -> StoreResult<String> {
    if !store.exists(id).await {
        return Err(StoreError::VersionNotFound(id));
    }
    let message = store.message(id).await?;
    Ok(format!("Version: {id}\n{message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RepoMetadata, StoreConfig, StoreLayout, TrackedIndex};
    use futures::StreamExt;
    use tempfile::TempDir;
    use tokio::fs;

    /// A store with versions 0..=head, each named "version <id>".
    async fn store_with_versions(dir: &TempDir, head: u64) -> (VersionStore, RepoMetadata) {
        let store = VersionStore::new(StoreLayout::new(dir.path(), &StoreConfig::default()));
        store.create_initial("version 0").await.unwrap();
        let mut metadata = RepoMetadata::initial();
        metadata.save(store.layout()).await.unwrap();

        let index = TrackedIndex::default();
        for id in 1..=head {
            let message = format!("version {id}\nmore detail");
            store
                .create_version(&mut metadata, &index, &message)
                .await
                .unwrap();
        }
        (store, metadata)
    }

    #[tokio::test]
    async fn test_full_history_is_newest_first() {
        let dir = TempDir::new().unwrap();
        let (store, metadata) = store_with_versions(&dir, 3).await;

        let history = History::new(store, metadata.head, None);
        let entries = history.collect().await.unwrap();

        let ids: Vec<u64> = entries.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, [3, 2, 1, 0]);
        assert_eq!(entries[0].summary, "version 3");
        assert_eq!(entries[3].summary, "version 0");
    }

    #[tokio::test]
    async fn test_limit_keeps_most_recent() {
        let dir = TempDir::new().unwrap();
        let (store, metadata) = store_with_versions(&dir, 4).await;

        for limit in [1usize, 2, 5, 9] {
            let history = History::new(store.clone(), metadata.head, Some(limit));
            let entries = history.collect().await.unwrap();

            assert_eq!(entries.len(), limit.min(5));
            assert_eq!(entries[0].id, metadata.head);
            assert!(entries.windows(2).all(|w| w[0].id > w[1].id));
        }

        let empty = History::new(store, metadata.head, Some(0));
        assert!(empty.is_empty());
        assert!(empty.collect().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_entries_can_be_restarted() {
        let dir = TempDir::new().unwrap();
        let (store, metadata) = store_with_versions(&dir, 2).await;
        let history = History::new(store, metadata.head, None);

        let first: Vec<_> = history.entries().take(1).collect().await;
        assert_eq!(first.len(), 1);

        let again = history.collect().await.unwrap();
        assert_eq!(again.len(), 3);
        assert_eq!(again[0].id, VersionId::new(2));
    }

    #[tokio::test]
    async fn test_missing_message_is_reported() {
        let dir = TempDir::new().unwrap();
        let (store, metadata) = store_with_versions(&dir, 1).await;
        fs::remove_file(store.layout().message_file(VersionId::new(1)))
            .await
            .unwrap();

        let history = History::new(store, metadata.head, None);
        assert_eq!(
            history.render().await.unwrap(),
            "1: (no message)\n0: version 0\n"
        );
    }

    #[tokio::test]
    async fn test_describe_version() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store_with_versions(&dir, 2).await;

        let description = describe_version(&store, VersionId::new(2)).await.unwrap();
        assert_eq!(description, "Version: 2\nversion 2\nmore detail");

        let err = describe_version(&store, VersionId::new(99))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::VersionNotFound(_)));
    }

    #[test]
    fn test_history_at_largest_head_does_not_overflow() {
        let dir = TempDir::new().unwrap();
        let store = VersionStore::new(StoreLayout::new(dir.path(), &StoreConfig::default()));
        let head = VersionId::new(u64::MAX);

        let history = History::new(store, head, Some(2));
        assert_eq!(history.len(), 2);
        let ids: Vec<VersionId> = history.ids().collect();
        assert_eq!(ids, [head, VersionId::new(u64::MAX - 1)]);
    }
}
