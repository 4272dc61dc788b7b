//! GoalMap Store - Snapshot persistence over key-value backends
//!
//! Provides:
//! - A string key-value port (`KvStore`) with in-memory, filesystem and
//!   SQLite backends
//! - SQLite schema with a small migrations runner
//! - The snapshot repository that saves, validates and restores the goal tree
//!   under one well-known key, falling back to the built-in sample

pub mod db;
pub mod errors;
pub mod kv;
pub mod migrations;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use kv::{FsKvStore, KvStore, MemoryKvStore, SqliteKvStore};
pub use snapshot::{FallbackReason, SnapshotLoad, SnapshotRepo, DEFAULT_SNAPSHOT_KEY};
