//! Migration framework
//!
//! Provides:
//! - Idempotent, transactional migration runner
//! - Embedded SQL migrations

mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
