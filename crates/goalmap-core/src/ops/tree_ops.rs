//! Tree Store: pure operations over an immutable goal tree
//!
//! Every mutation returns a new [`Tree`]. Only the nodes on the path from the
//! root to the edited node are copied; all other subtrees are shared with the
//! input. When an operation changes nothing, the returned tree is the input
//! `Arc` itself (`Arc::ptr_eq` holds).
//!
//! Traversals use explicit stacks so arbitrarily deep trees cannot exhaust
//! the call stack.

use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::{GoalMapError, Result};
use crate::model::{Node, Tree, MAX_TREE_HEIGHT, MIN_IMPORTANCE};

/// Result of a delete or promote
#[derive(Debug, Clone)]
pub struct Removal {
    pub tree: Tree,
    /// Parent of the removed node; `None` when the id was not found
    pub new_selected_id: Option<String>,
}

impl Removal {
    fn unchanged(tree: &Tree) -> Self {
        Self {
            tree: Arc::clone(tree),
            new_selected_id: None,
        }
    }

    /// Whether the operation found its target
    pub fn applied(&self) -> bool {
        self.new_selected_id.is_some()
    }
}

// ===== LOOKUP =====

/// Depth-first search for `id`; returns the first (and only) match
pub fn find_node_by_id<'a>(tree: &'a Node, id: &str) -> Option<&'a Node> {
    let mut stack: Vec<&Node> = vec![tree];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev().map(|c| c.as_ref()));
    }
    None
}

/// Shared handle to the subtree rooted at `id`
pub fn find_subtree<'a>(tree: &'a Tree, id: &str) -> Option<&'a Tree> {
    let mut stack: Vec<&Tree> = vec![tree];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}

/// Nodes from the root down to `id`, inclusive
///
/// Empty when `id` is not in the tree; callers check the length.
pub fn find_node_path<'a>(tree: &'a Node, id: &str) -> Vec<&'a Node> {
    match index_path(tree, id) {
        Some(indices) => {
            let mut path = Vec::with_capacity(indices.len() + 1);
            let mut cursor = tree;
            path.push(cursor);
            for idx in indices {
                cursor = cursor.children[idx].as_ref();
                path.push(cursor);
            }
            path
        }
        None => Vec::new(),
    }
}

/// Direct parent of `id`; `None` for the root or a missing id
pub fn find_parent<'a>(tree: &'a Node, id: &str) -> Option<&'a Node> {
    let path = find_node_path(tree, id);
    if path.len() < 2 {
        return None;
    }
    Some(path[path.len() - 2])
}

/// Share of `id`'s importance among its siblings, in [0, 1]
///
/// The root (no siblings) has share 1. Returns `None` for a missing id.
pub fn importance_share(tree: &Node, id: &str) -> Option<f64> {
    let node = find_node_by_id(tree, id)?;
    let total = match find_parent(tree, id) {
        Some(parent) => parent.children_importance(),
        None => node.importance,
    };
    if total > 0.0 {
        Some(node.importance / total)
    } else {
        Some(1.0)
    }
}

/// Child-index path from the root to `id` (empty for the root itself)
fn index_path(tree: &Node, id: &str) -> Option<Vec<usize>> {
    if tree.id == id {
        return Some(Vec::new());
    }
    // Each frame: node being scanned and the next child index to visit
    let mut frames: Vec<(&Node, usize)> = vec![(tree, 0)];
    let mut path: Vec<usize> = Vec::new();
    while let Some(frame) = frames.last_mut() {
        let node = frame.0;
        let next = frame.1;
        if next < node.children.len() {
            frame.1 += 1;
            let child = node.children[next].as_ref();
            path.push(next);
            if child.id == id {
                return Some(path);
            }
            frames.push((child, 0));
        } else {
            frames.pop();
            path.pop();
        }
    }
    None
}

/// Replace the node at `path` with `edit(node)`, copying only its ancestors
fn edit_at(tree: &Tree, path: &[usize], edit: impl FnOnce(&Node) -> Node) -> Tree {
    let mut ancestors: Vec<&Tree> = Vec::with_capacity(path.len());
    let mut cursor = tree;
    for &idx in path {
        ancestors.push(cursor);
        cursor = &cursor.children[idx];
    }

    let mut current = Arc::new(edit(cursor.as_ref()));
    for (ancestor, &idx) in ancestors.into_iter().rev().zip(path.iter().rev()) {
        let mut copy = Node::clone(ancestor);
        copy.children[idx] = current;
        current = Arc::new(copy);
    }
    current
}

// ===== UPDATE =====

/// Replace the node whose id matches `updated.id`
///
/// No-op (returns the input) when the id is absent.
pub fn update_node_in_tree(tree: &Tree, updated: Node) -> Tree {
    try_update_node_in_tree(tree, updated).unwrap_or_else(|_| Arc::clone(tree))
}

/// [`update_node_in_tree`] that reports a missing id
///
/// # Errors
/// * `NodeNotFound` - If no node has `updated.id`
pub fn try_update_node_in_tree(tree: &Tree, updated: Node) -> Result<Tree> {
    let path = index_path(tree, &updated.id).ok_or_else(|| GoalMapError::NodeNotFound {
        node_id: updated.id.clone(),
    })?;
    Ok(edit_at(tree, &path, |_| updated))
}

/// Update a node and rebalance its siblings' importance
///
/// When the importance changes by `delta`, every other sibling gives up
/// `delta * (own importance / untouched total)`, floored at
/// [`MIN_IMPORTANCE`]. Without the floor the group total is conserved; a
/// sibling pinned at the floor absorbs no further decrease.
///
/// Falls back to a plain [`update_node_in_tree`] for the root, for an
/// unchanged importance, and when the siblings' total is zero.
pub fn update_node_rebalancing(tree: &Tree, updated: Node) -> Tree {
    let Some(path) = index_path(tree, &updated.id) else {
        return Arc::clone(tree);
    };
    let Some((&idx, parent_path)) = path.split_last() else {
        return edit_at(tree, &path, |_| updated);
    };

    edit_at(tree, parent_path, |parent| {
        let original = &parent.children[idx];
        let delta = updated.importance - original.importance;
        let others_total: f64 = parent
            .children
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, c)| c.importance)
            .sum();

        let mut copy = parent.clone();
        if delta != 0.0 && others_total > 0.0 {
            for (i, child) in copy.children.iter_mut().enumerate() {
                if i == idx {
                    continue;
                }
                let shift = delta * (child.importance / others_total);
                let mut sibling = Node::clone(child);
                sibling.importance = (sibling.importance - shift).max(MIN_IMPORTANCE);
                *child = Arc::new(sibling);
            }
        }
        copy.children[idx] = Arc::new(updated);
        copy
    })
}

// ===== INSERT =====

/// Append `new_node` to `parent_id`'s children
///
/// Silently returns the input when the parent is missing, the new subtree
/// would duplicate an existing id or reach below [`MAX_TREE_HEIGHT`]; use
/// [`try_add_node_to_tree`] to detect it.
pub fn add_node_to_tree(tree: &Tree, parent_id: &str, new_node: Node) -> Tree {
    try_add_node_to_tree(tree, parent_id, new_node).unwrap_or_else(|_| Arc::clone(tree))
}

/// [`add_node_to_tree`] that reports why nothing was added
///
/// # Errors
/// * `ParentNotFound` - If `parent_id` is not in the tree
/// * `DuplicateNodeId` - If any id in `new_node`'s subtree already exists
/// * `DepthLimitExceeded` - If the new subtree would reach below [`MAX_TREE_HEIGHT`]
pub fn try_add_node_to_tree(tree: &Tree, parent_id: &str, new_node: Node) -> Result<Tree> {
    let path = index_path(tree, parent_id).ok_or_else(|| GoalMapError::ParentNotFound {
        node_id: parent_id.to_string(),
    })?;

    // path.len() is the parent's depth
    if path.len() + 1 + new_node.height() > MAX_TREE_HEIGHT {
        return Err(GoalMapError::DepthLimitExceeded {
            node_id: new_node.id.clone(),
            max: MAX_TREE_HEIGHT,
        });
    }

    let existing: HashSet<String> = tree.subtree_ids().into_iter().collect();
    if let Some(dup) = new_node
        .subtree_ids()
        .into_iter()
        .find(|id| existing.contains(id))
    {
        return Err(GoalMapError::DuplicateNodeId { node_id: dup });
    }

    Ok(edit_at(tree, &path, |parent| {
        let mut copy = parent.clone();
        copy.children.push(Arc::new(new_node));
        copy
    }))
}

// ===== DELETE =====

/// Delete `id` and its whole subtree
///
/// A missing id is a no-op with `new_selected_id == None`.
///
/// # Errors
/// * `RootImmutable` - If `id` is the tree's root
pub fn remove_node_from_tree(tree: &Tree, id: &str) -> Result<Removal> {
    if tree.id == id {
        return Err(GoalMapError::RootImmutable {
            op: "remove_node".to_string(),
        });
    }
    let Some(path) = index_path(tree, id) else {
        return Ok(Removal::unchanged(tree));
    };
    let Some((&idx, parent_path)) = path.split_last() else {
        return Ok(Removal::unchanged(tree));
    };

    let mut parent_id = None;
    let new_tree = edit_at(tree, parent_path, |parent| {
        parent_id = Some(parent.id.clone());
        let mut copy = parent.clone();
        copy.children.remove(idx);
        copy
    });

    tracing::debug!(node_id = id, "removed subtree");
    Ok(Removal {
        tree: new_tree,
        new_selected_id: parent_id,
    })
}

/// Delete `id` but lift its children into its slot in the parent
///
/// Promoted children split the deleted node's importance in proportion to
/// their own (evenly if they all weigh zero), so the parent's total
/// importance is unchanged. A node without children is simply removed.
///
/// # Errors
/// * `RootImmutable` - If `id` is the tree's root
pub fn promote_children_in_tree(tree: &Tree, id: &str) -> Result<Removal> {
    if tree.id == id {
        return Err(GoalMapError::RootImmutable {
            op: "promote_children".to_string(),
        });
    }
    let Some(path) = index_path(tree, id) else {
        return Ok(Removal::unchanged(tree));
    };
    let Some((&idx, parent_path)) = path.split_last() else {
        return Ok(Removal::unchanged(tree));
    };

    let mut parent_id = None;
    let new_tree = edit_at(tree, parent_path, |parent| {
        parent_id = Some(parent.id.clone());
        let target = &parent.children[idx];
        let promoted = rescale_children(target);
        let mut copy = parent.clone();
        copy.children.splice(idx..=idx, promoted);
        copy
    });

    tracing::debug!(node_id = id, "promoted children");
    Ok(Removal {
        tree: new_tree,
        new_selected_id: parent_id,
    })
}

/// Target's children with importance rescaled to sum to the target's
fn rescale_children(target: &Node) -> Vec<Arc<Node>> {
    let total = target.children_importance();
    let even_share = target.importance / target.children.len().max(1) as f64;
    target
        .children
        .iter()
        .map(|child| {
            let mut promoted = Node::clone(child);
            promoted.importance = if total > 0.0 {
                target.importance * (child.importance / total)
            } else {
                even_share
            };
            Arc::new(promoted)
        })
        .collect()
}
