//! Tree invariant checks
//!
//! Trees built through [`crate::ops::tree_ops`] and [`crate::apply`] keep
//! these invariants by construction. Trees arriving from outside (a loaded
//! snapshot, a hand-built fixture) are checked here.

use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::{GoalMapError, Result};
use crate::model::{Node, Tree, DEFAULT_IMPORTANCE, MAX_TREE_HEIGHT, MIN_IMPORTANCE};

/// Check every node in the tree
///
/// # Errors
/// * `EmptyNodeId` - A node has an empty or whitespace-only id
/// * `DuplicateNodeId` - An id occurs more than once
/// * `InvalidImportance` - Importance is negative or not finite
/// * `InvalidProgress` - Progress is outside [0, 1] or not finite
/// * `DepthLimitExceeded` - A node sits more than [`MAX_TREE_HEIGHT`] levels down
pub fn validate_tree(tree: &Node) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&Node, usize)> = vec![(tree, 0)];

    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_TREE_HEIGHT {
            return Err(depth_exceeded(node));
        }
        if node.id.trim().is_empty() {
            return Err(GoalMapError::EmptyNodeId {
                title: node.title.clone(),
            });
        }
        if !seen.insert(node.id.as_str()) {
            return Err(GoalMapError::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }
        if !node.importance.is_finite() || node.importance < 0.0 {
            return Err(GoalMapError::InvalidImportance {
                node_id: node.id.clone(),
                value: node.importance,
            });
        }
        if !(0.0..=1.0).contains(&node.progress_self) {
            return Err(GoalMapError::InvalidProgress {
                node_id: node.id.clone(),
                value: node.progress_self,
            });
        }
        stack.extend(node.children.iter().map(|c| (c.as_ref(), depth + 1)));
    }
    Ok(())
}

/// Check only the height limit
///
/// # Errors
/// * `DepthLimitExceeded` - Naming the first node found below the limit
pub fn check_height(tree: &Node) -> Result<()> {
    let mut stack: Vec<(&Node, usize)> = vec![(tree, 0)];
    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_TREE_HEIGHT {
            return Err(depth_exceeded(node));
        }
        stack.extend(node.children.iter().map(|c| (c.as_ref(), depth + 1)));
    }
    Ok(())
}

fn depth_exceeded(node: &Node) -> GoalMapError {
    GoalMapError::DepthLimitExceeded {
        node_id: node.id.clone(),
        max: MAX_TREE_HEIGHT,
    }
}

/// Copy of `tree` with numeric fields forced into range
///
/// Progress is clamped into [0, 1] (NaN becomes 0); importance below
/// [`MIN_IMPORTANCE`] is raised to it (non-finite becomes
/// [`DEFAULT_IMPORTANCE`]). Ids and structure are left alone.
pub fn sanitize_tree(tree: &Node) -> Tree {
    struct Frame<'a> {
        node: &'a Node,
        next_child: usize,
        children: Vec<Arc<Node>>,
    }

    let mut stack = vec![Frame {
        node: tree,
        next_child: 0,
        children: Vec::with_capacity(tree.children.len()),
    }];
    let mut result = None;

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        if frame.next_child < node.children.len() {
            let child = node.children[frame.next_child].as_ref();
            frame.next_child += 1;
            stack.push(Frame {
                node: child,
                next_child: 0,
                children: Vec::with_capacity(child.children.len()),
            });
            continue;
        }

        let Some(done) = stack.pop() else { break };
        let rebuilt = Arc::new(Node {
            importance: sanitize_importance(done.node.importance),
            progress_self: sanitize_progress(done.node.progress_self),
            children: done.children,
            ..Node::clone(done.node)
        });
        match stack.last_mut() {
            Some(parent) => parent.children.push(rebuilt),
            None => result = Some(rebuilt),
        }
    }

    result.unwrap_or_else(|| Arc::new(tree.clone()))
}

fn sanitize_importance(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_IMPORTANCE)
    } else {
        DEFAULT_IMPORTANCE
    }
}

fn sanitize_progress(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
