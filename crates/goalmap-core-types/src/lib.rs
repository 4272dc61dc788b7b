//! Core types shared across GoalMap facilities
//!
//! This crate provides foundational types used by the error handling,
//! logging and persistence layers:
//!
//! - **Identifiers**: the well-known root id and fresh node id generation
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{generate_node_id, NodeId, ROOT_ID};
