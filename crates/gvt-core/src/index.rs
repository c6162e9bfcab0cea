//! Tracked-file index.
//!
//! The index lists the names under version control, one per line, in the
//! order they were added. Stored as `<store>/index.txt` and rewritten in
//! full on every change.

use crate::layout::{read_optional, write_atomic};
use crate::{StoreLayout, StoreResult};
use tracing::debug;

/// Ordered, duplicate-free set of tracked file names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedIndex {
    names: Vec<String>,
}

impl TrackedIndex {
    /// Load the index, or return an empty index if it was never written.
    pub async fn load(layout: &StoreLayout) -> StoreResult<Self> {
        let content = read_optional(&layout.index_file()).await?;
        Ok(content.as_deref().map(Self::parse).unwrap_or_default())
    }

    /// Save the index, replacing the previous file.
    pub async fn save(&self, layout: &StoreLayout) -> StoreResult<()> {
        let path = layout.index_file();
        debug!(path = %path.display(), count = self.names.len(), "Writing index");
        write_atomic(&path, self.render().as_bytes()).await
    }

    fn parse(content: &str) -> Self {
        let mut index = Self::default();
        for line in content.lines() {
            let name = line.trim_end_matches('\r');
            if !name.is_empty() {
                index.track(name);
            }
        }
        index
    }

    fn render(&self) -> String {
        self.names.iter().map(|name| format!("{name}\n")).collect()
    }

    /// Check if a name is tracked.
    pub fn is_tracked(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Add a name. Returns `false` if it was already tracked.
    pub fn track(&mut self, name: &str) -> bool {
        if self.is_tracked(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Remove a name. Returns `false` if it was not tracked.
    pub fn untrack(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    /// Tracked names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreConfig;
    use tempfile::TempDir;
    use tokio::fs;

    #[test]
    fn test_empty_index() {
        let index = TrackedIndex::default();
        assert!(index.is_empty());
        assert!(!index.is_tracked("a.txt"));
    }

    #[test]
    fn test_track_is_idempotent() {
        let mut once = TrackedIndex::default();
        assert!(once.track("a.txt"));

        let mut twice = TrackedIndex::default();
        twice.track("a.txt");
        assert!(!twice.track("a.txt"));

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_untrack_missing_is_noop() {
        let mut index = TrackedIndex::default();
        index.track("a.txt");
        let before = index.clone();

        assert!(!index.untrack("b.txt"));
        assert_eq!(index, before);

        assert!(index.untrack("a.txt"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let mut index = TrackedIndex::default();
        index.track("c.txt");
        index.track("a.txt");
        index.track("b.txt");
        index.untrack("a.txt");
        assert_eq!(index.names(), ["c.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let layout = StoreLayout::new(dir.path(), &StoreConfig::default());
        fs::create_dir_all(layout.root()).await.unwrap();

        // Never written: empty
        assert!(TrackedIndex::load(&layout).await.unwrap().is_empty());

        let mut index = TrackedIndex::default();
        index.track("a.txt");
        index.track("notes/b.txt");
        index.save(&layout).await.unwrap();

        let content = fs::read_to_string(layout.index_file()).await.unwrap();
        assert_eq!(content, "a.txt\nnotes/b.txt\n");
        assert_eq!(TrackedIndex::load(&layout).await.unwrap(), index);
    }

    #[tokio::test]
    async fn test_load_skips_blank_and_duplicate_lines() {
        let dir = TempDir::new().unwrap();
        let layout = StoreLayout::new(dir.path(), &StoreConfig::default());
        fs::create_dir_all(layout.root()).await.unwrap();
        fs::write(layout.index_file(), "a.txt\r\n\na.txt\nb.txt")
            .await
            .unwrap();

        let index = TrackedIndex::load(&layout).await.unwrap();
        assert_eq!(index.names(), ["a.txt", "b.txt"]);
    }
}
