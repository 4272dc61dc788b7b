//! Load-time snapshot validation
//!
//! A stored snapshot is trusted only after three gates: the JSON shape check
//! (every node an object with string `id`, string `title` and an array
//! `children`), typed deserialisation, and the tree invariants. Numeric
//! fields are sanitised before the invariant check.

use goalmap_core::errors::{GoalMapError, Result};
use goalmap_core::model::{Node, Tree};
use goalmap_core::rules::{sanitize_tree, validate_tree};
use serde_json::Value;

/// Parse and validate a stored snapshot
///
/// # Errors
/// * `InvalidSnapshot` - Not JSON, wrong shape, or fields of the wrong type
/// * `EmptyNodeId` / `DuplicateNodeId` - Ids break the tree invariants
pub fn parse_snapshot(text: &str) -> Result<Tree> {
    let value: Value = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
    check_shape(&value)?;

    let node: Node = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
    let tree = sanitize_tree(&node);
    validate_tree(&tree)?;
    Ok(tree)
}

/// Check the minimal node shape on every node of a raw JSON tree
///
/// # Errors
/// * `InvalidSnapshot` - Naming the first offending path
pub fn check_shape(value: &Value) -> Result<()> {
    let mut stack: Vec<(&Value, String)> = vec![(value, "$".to_string())];

    while let Some((node, path)) = stack.pop() {
        let Some(object) = node.as_object() else {
            return Err(invalid(format!("{} is not an object", path)));
        };
        for field in ["id", "title"] {
            if !object.get(field).is_some_and(Value::is_string) {
                return Err(invalid(format!("{}.{} must be a string", path, field)));
            }
        }
        let Some(children) = object.get("children").and_then(Value::as_array) else {
            return Err(invalid(format!("{}.children must be an array", path)));
        };
        for (i, child) in children.iter().enumerate() {
            stack.push((child, format!("{}.children[{}]", path, i)));
        }
    }
    Ok(())
}

fn invalid(reason: String) -> GoalMapError {
    GoalMapError::InvalidSnapshot { reason }
}
