//! Persistence port
//!
//! The history manager writes every committed tree through a
//! [`SnapshotSink`]. The concrete backend lives outside the core (see the
//! `goalmap-store` crate); tests inject their own sinks.

use crate::errors::ExError;
use crate::model::Node;

/// Destination for committed tree snapshots
pub trait SnapshotSink {
    /// Persist `tree` as the latest snapshot
    ///
    /// # Errors
    /// Backend-specific; callers treat failures as non-fatal.
    fn save(&mut self, tree: &Node) -> Result<(), ExError>;

    /// Forget the stored snapshot
    ///
    /// # Errors
    /// Backend-specific; callers treat failures as non-fatal.
    fn clear(&mut self) -> Result<(), ExError>;
}

/// Sink that stores nothing
///
/// # Example
/// ```
/// use goalmap_core::model::Node;
/// use goalmap_core::persistence::{NoopSnapshotSink, SnapshotSink};
///
/// let mut sink = NoopSnapshotSink;
/// assert!(sink.save(&Node::root("Goals")).is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSnapshotSink;

impl SnapshotSink for NoopSnapshotSink {
    fn save(&mut self, _tree: &Node) -> Result<(), ExError> {
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ExError> {
        Ok(())
    }
}
