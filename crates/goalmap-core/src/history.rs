//! History Manager: bounded, navigable log of tree versions
//!
//! Entries are whole-tree snapshots. Because trees share unchanged subtrees,
//! keeping many versions costs little more than the edited paths.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::ExError;
use crate::model::Tree;
use crate::persistence::SnapshotSink;

/// Number of versions kept by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of retained versions (at least 1)
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Bounded undo/redo log
///
/// Invariant: `entries` is never empty and `current < entries.len()`.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Tree>,
    current: usize,
    capacity: usize,
}

impl History {
    /// Start a history whose only entry is `initial`
    pub fn new(initial: Tree) -> Self {
        Self::with_config(initial, HistoryConfig::default())
    }

    pub fn with_config(initial: Tree, config: HistoryConfig) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            entries,
            current: 0,
            capacity: config.capacity.max(1),
        }
    }

    /// The tree at the current index
    pub fn current(&self) -> &Tree {
        &self.entries[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    /// Record `tree` as the newest version
    ///
    /// Drops any redo future, appends, and evicts the oldest entries beyond
    /// capacity. The new entry is current, so it is never evicted.
    ///
    /// A `tree` that is the current entry itself (`Arc::ptr_eq`) is not
    /// recorded: no entry is added and the redo future is kept. Structurally
    /// equal but separately built trees are recorded as usual.
    pub fn commit(&mut self, tree: Tree) {
        if Arc::ptr_eq(self.current(), &tree) {
            tracing::debug!("commit skipped, tree unchanged");
            return;
        }
        self.entries.truncate(self.current + 1);
        self.entries.push_back(tree);
        self.current = self.entries.len() - 1;

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.current -= 1;
        }
        tracing::debug!(
            history_len = self.entries.len(),
            current = self.current,
            "committed tree version"
        );
    }

    /// [`commit`](Self::commit), then write the new tree to `sink`
    ///
    /// The in-memory commit stands even when the write fails. The current
    /// tree is written even when `commit` skipped an unchanged tree.
    ///
    /// # Errors
    /// Whatever `sink.save` reports.
    pub fn commit_and_persist(
        &mut self,
        tree: Tree,
        sink: &mut dyn SnapshotSink,
    ) -> Result<(), ExError> {
        self.commit(tree);
        sink.save(self.current())
    }

    /// Step back one version; `None` (and no change) at the oldest entry
    pub fn undo(&mut self) -> Option<&Tree> {
        if !self.can_undo() {
            return None;
        }
        self.current -= 1;
        Some(self.current())
    }

    /// Step forward one version; `None` (and no change) at the newest entry
    pub fn redo(&mut self) -> Option<&Tree> {
        if !self.can_redo() {
            return None;
        }
        self.current += 1;
        Some(self.current())
    }

    /// All retained versions, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &Tree> {
        self.entries.iter()
    }
}
