//! GoalMap Engine - Session orchestration
//!
//! Coordinates the core engine and the snapshot store on behalf of a UI
//! shell: one [`Session`] owns the undo history, the focus and selection
//! state and the persistence port.

pub mod config;
pub mod session;

pub use config::SessionConfig;
pub use session::Session;
