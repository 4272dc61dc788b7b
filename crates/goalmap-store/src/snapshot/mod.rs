//! Snapshot repository
//!
//! Stores the whole goal tree as one JSON value under a well-known key.
//! Loading never fails: a missing, unreadable or malformed snapshot yields the
//! built-in sample tree together with the reason.

mod validate;

pub use validate::{check_shape, parse_snapshot};

use std::fmt;

use goalmap_core::errors::ExError;
use goalmap_core::model::{Node, Tree};
use goalmap_core::persistence::SnapshotSink;
use goalmap_core::rules::check_height;
use goalmap_core::sample::sample_tree;

use crate::errors::{persistence_error, serialization_error, Result};
use crate::kv::KvStore;

/// Key the tree is stored under unless configured otherwise
pub const DEFAULT_SNAPSHOT_KEY: &str = "goalmap.tree";

/// Why [`SnapshotRepo::load`] fell back to the sample tree
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// Nothing stored under the key
    Missing,
    /// The backend could not be read
    ReadFailed(String),
    /// The stored value failed validation
    Malformed(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Missing => write!(f, "no stored snapshot"),
            FallbackReason::ReadFailed(msg) => write!(f, "snapshot could not be read: {}", msg),
            FallbackReason::Malformed(msg) => write!(f, "snapshot is malformed: {}", msg),
        }
    }
}

/// Outcome of loading the stored tree
#[derive(Debug, Clone)]
pub enum SnapshotLoad {
    Restored(Tree),
    Fallback { tree: Tree, reason: FallbackReason },
}

impl SnapshotLoad {
    pub fn tree(&self) -> &Tree {
        match self {
            SnapshotLoad::Restored(tree) | SnapshotLoad::Fallback { tree, .. } => tree,
        }
    }

    pub fn into_tree(self) -> Tree {
        match self {
            SnapshotLoad::Restored(tree) | SnapshotLoad::Fallback { tree, .. } => tree,
        }
    }

    pub fn is_restored(&self) -> bool {
        matches!(self, SnapshotLoad::Restored(_))
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            SnapshotLoad::Restored(_) => None,
            SnapshotLoad::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Tree snapshot persistence over any [`KvStore`]
pub struct SnapshotRepo<K: KvStore> {
    store: K,
    key: String,
}

impl<K: KvStore> SnapshotRepo<K> {
    /// Repository using [`DEFAULT_SNAPSHOT_KEY`]
    pub fn new(store: K) -> Self {
        Self::with_key(store, DEFAULT_SNAPSHOT_KEY)
    }

    pub fn with_key(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn into_store(self) -> K {
        self.store
    }

    /// Write `tree` as the current snapshot
    ///
    /// A tree that [`load`](Self::load) would reject for its height is
    /// refused, leaving the stored snapshot untouched.
    ///
    /// # Errors
    /// * `InvalidInput` - The tree is deeper than `MAX_TREE_HEIGHT`
    /// * `Serialization` - The tree could not be encoded
    /// * `Persistence` - The backend write failed (the backend error is the source)
    pub fn save(&mut self, tree: &Node) -> Result<()> {
        check_height(tree).map_err(|e| ExError::from(e).with_op("save_snapshot"))?;
        let json =
            serde_json::to_string(tree).map_err(|e| serialization_error("save_snapshot", e))?;
        self.store
            .set(&self.key, &json)
            .map_err(|e| persistence_error("save_snapshot", &self.key, e))?;
        tracing::debug!(key = %self.key, bytes = json.len(), "saved snapshot");
        Ok(())
    }

    /// Load the stored tree, or the sample tree with the reason it was needed
    pub fn load(&self) -> SnapshotLoad {
        let text = match self.store.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored snapshot, using sample tree");
                return fallback(FallbackReason::Missing);
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    err_code = e.code(),
                    "snapshot read failed, using sample tree"
                );
                return fallback(FallbackReason::ReadFailed(e.to_string()));
            }
        };

        match parse_snapshot(&text) {
            Ok(tree) => {
                tracing::debug!(
                    key = %self.key,
                    node_count = tree.node_count(),
                    "restored snapshot"
                );
                SnapshotLoad::Restored(tree)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "malformed snapshot, using sample tree");
                fallback(FallbackReason::Malformed(e.to_string()))
            }
        }
    }

    /// Forget the stored snapshot
    ///
    /// # Errors
    /// * `Persistence` - The backend removal failed
    pub fn clear(&mut self) -> Result<()> {
        self.store
            .remove(&self.key)
            .map_err(|e| persistence_error("clear_snapshot", &self.key, e))
    }
}

fn fallback(reason: FallbackReason) -> SnapshotLoad {
    SnapshotLoad::Fallback {
        tree: sample_tree(),
        reason,
    }
}

impl<K: KvStore> SnapshotSink for SnapshotRepo<K> {
    fn save(&mut self, tree: &Node) -> std::result::Result<(), ExError> {
        SnapshotRepo::save(self, tree)
    }

    fn clear(&mut self) -> std::result::Result<(), ExError> {
        SnapshotRepo::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    #[test]
    fn test_empty_store_falls_back_to_sample() {
        let repo = SnapshotRepo::new(MemoryKvStore::new());
        let load = repo.load();
        assert!(!load.is_restored());
        assert_eq!(load.reason(), Some(&FallbackReason::Missing));
        assert_eq!(load.tree().title, "Annual Company Goals");
    }

    #[test]
    fn test_save_then_load_restores() {
        let mut repo = SnapshotRepo::new(MemoryKvStore::new());
        let tree = Node::root("Mine")
            .with_child(Node::new("a", "A").with_progress(0.5))
            .into_tree();
        repo.save(&tree).unwrap();

        let load = repo.load();
        assert!(load.is_restored());
        assert_eq!(load.into_tree(), tree);
    }

    #[test]
    fn test_clear_forgets_snapshot() {
        let mut repo = SnapshotRepo::with_key(MemoryKvStore::new(), "custom");
        repo.save(&Node::root("Mine")).unwrap();
        assert!(repo.store().get("custom").unwrap().is_some());

        repo.clear().unwrap();
        assert_eq!(repo.load().reason(), Some(&FallbackReason::Missing));
    }
}
