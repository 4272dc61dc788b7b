//! GoalMap Core - weighted goal tree engine
//!
//! This crate provides the pure, UI-independent parts of GoalMap:
//! - Immutable goal tree with structural sharing and CRUD operations
//! - Importance-weighted progress rollup
//! - Radial sunburst layout with depth clamping and continuation slivers
//! - Bounded undo/redo history with a persistence port
//! - Snapshot validation and sanitisation
//!
//! Nothing here renders, animates or touches storage directly.

pub mod apply;
pub mod commands;
pub mod errors;
pub mod history;
pub mod layout;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod persistence;
pub mod rollup;
pub mod rules;
pub mod sample;

// Used by the logging macros
pub use goalmap_core_types as core_types;

// Re-export commonly used types
pub use apply::{apply, Applied};
pub use commands::Command;
pub use errors::{ExError, ExErrorKind, GoalMapError, Result};
pub use history::{History, HistoryConfig};
pub use layout::{layout, LayoutConfig, RadialLayout};
pub use model::{ContinuationSliver, Node, RenderNode, SliverKind, Tree};
pub use persistence::{NoopSnapshotSink, SnapshotSink};
pub use rollup::{progress_rollup, RollupIndex};
