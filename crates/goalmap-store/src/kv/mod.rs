//! Key-value persistence port
//!
//! The snapshot repository only needs string get/set/remove. Backends:
//! - [`MemoryKvStore`]: process-local map, used by tests and ephemeral sessions
//! - [`FsKvStore`]: one file per key with atomic temp→rename writes
//! - [`SqliteKvStore`]: a single `kv` table in SQLite

mod atomic;
mod fs_store;
mod sqlite;

pub use atomic::atomic_write;
pub use fs_store::FsKvStore;
pub use sqlite::SqliteKvStore;

use std::collections::HashMap;

use crate::errors::Result;

/// String key-value store
pub trait KvStore {
    /// Value stored under `key`, `None` if absent
    ///
    /// # Errors
    /// Backend read failure.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Backend write failure.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Forget `key`; removing an absent key succeeds
    ///
    /// # Errors
    /// Backend write failure.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<K: KvStore + ?Sized> KvStore for Box<K> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
