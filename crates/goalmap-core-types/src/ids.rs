//! Node identifiers
//!
//! Node ids are opaque strings. The designated root of every goal tree uses
//! [`ROOT_ID`]; every other node gets a fresh id from [`generate_node_id`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the designated root node. Never deleted, never renamed.
pub const ROOT_ID: &str = "root";

/// Prefix applied to generated node ids
pub const NODE_ID_PREFIX: &str = "node_";

/// Generate a fresh, time-ordered node id (`node_<uuid v7>`)
pub fn generate_node_id() -> String {
    format!("{}{}", NODE_ID_PREFIX, Uuid::now_v7().simple())
}

/// Typed wrapper for a node id crossing an API boundary
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generate a new node id
    pub fn new() -> Self {
        Self(generate_node_id())
    }

    /// The root id
    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root id
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_and_prefixed() {
        let id1 = generate_node_id();
        let id2 = generate_node_id();

        assert_ne!(id1, id2);
        assert!(id1.starts_with(NODE_ID_PREFIX));
        assert_ne!(id1, ROOT_ID);
    }

    #[test]
    fn test_root_id() {
        assert!(NodeId::root().is_root());
        assert!(!NodeId::new().is_root());
        assert_eq!(format!("{}", NodeId::root()), ROOT_ID);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let id = NodeId::from("feat1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"feat1\"");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
