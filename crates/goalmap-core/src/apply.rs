//! Functional-boundary apply function
//!
//! [`apply`] is the strict entry point for edits: it validates the command,
//! runs the matching Tree Store operation and reports a missing target or a
//! forbidden root edit as a typed error instead of a silent no-op.
//!
//! ## Example
//!
//! ```
//! use goalmap_core::{apply, sample::sample_tree, Command};
//!
//! let tree = sample_tree();
//! let applied = apply(&tree, Command::AddChild { parent_id: "hr".to_string() }).unwrap();
//! assert_eq!(applied.tree.node_count(), tree.node_count() + 1);
//! ```

use std::collections::HashSet;

use crate::commands::{Command, NEW_CHILD_TITLE, NEW_SIBLING_TITLE};
use crate::errors::{GoalMapError, Result};
use crate::model::{Node, Tree, MAX_TREE_HEIGHT, MIN_IMPORTANCE};
use crate::ops::tree_ops;
use crate::rules::validate_tree;

/// Outcome of a successful command
#[derive(Debug, Clone)]
pub struct Applied {
    pub tree: Tree,
    /// Node the shell should select next: the new node after an add, the
    /// parent after a delete or promote, otherwise the edited node
    pub selected_id: String,
}

/// Apply `cmd` to `tree`
///
/// The input tree is never modified; on error the caller keeps using it.
///
/// # Errors
/// * `NodeNotFound` / `ParentNotFound` - The target id is not in the tree
/// * `RootImmutable` - Delete, promote or add-sibling aimed at the root
/// * `InvalidTitle` - Empty or whitespace-only title
/// * `InvalidImportance` - Importance below the floor or not finite
/// * `InvalidProgress` - Progress outside [0, 1]
/// * `DuplicateNodeId` - An added or replacement subtree reuses an id
/// * `DepthLimitExceeded` - The edit would reach below [`MAX_TREE_HEIGHT`]
pub fn apply(tree: &Tree, cmd: Command) -> Result<Applied> {
    match cmd {
        Command::UpdateNode { node } => {
            validate_fields(&node)?;
            let selected_id = node.id.clone();
            check_replacement(tree, &node)?;
            Ok(Applied {
                tree: tree_ops::update_node_rebalancing(tree, node),
                selected_id,
            })
        }

        Command::Rename { node_id, title } => edit(tree, &node_id, |node| {
            node.title = title;
        }),

        Command::SetImportance {
            node_id,
            importance,
        } => edit(tree, &node_id, |node| {
            node.importance = importance;
        }),

        Command::SetProgress { node_id, progress } => edit(tree, &node_id, |node| {
            node.progress_self = progress;
        }),

        Command::SetColor { node_id, color } => edit(tree, &node_id, |node| {
            node.color = color;
        }),

        Command::SetContext { node_id, context } => edit(tree, &node_id, |node| {
            node.context = context;
        }),

        Command::AddChild { parent_id } => {
            let parent = tree_ops::find_node_by_id(tree, &parent_id).ok_or_else(|| {
                GoalMapError::ParentNotFound {
                    node_id: parent_id.clone(),
                }
            })?;
            let child = new_leaf(NEW_CHILD_TITLE, parent.color.clone());
            let selected_id = child.id.clone();
            Ok(Applied {
                tree: tree_ops::try_add_node_to_tree(tree, &parent_id, child)?,
                selected_id,
            })
        }

        Command::AddSibling { sibling_id } => {
            require(tree, &sibling_id)?;
            let parent = tree_ops::find_parent(tree, &sibling_id).ok_or_else(|| {
                GoalMapError::RootImmutable {
                    op: "add_sibling".to_string(),
                }
            })?;
            let sibling = new_leaf(NEW_SIBLING_TITLE, parent.color.clone());
            let parent_id = parent.id.clone();
            let selected_id = sibling.id.clone();
            Ok(Applied {
                tree: tree_ops::try_add_node_to_tree(tree, &parent_id, sibling)?,
                selected_id,
            })
        }

        Command::Delete { node_id } => {
            let removal = tree_ops::remove_node_from_tree(tree, &node_id)?;
            removed(removal, node_id)
        }

        Command::PromoteChildren { node_id } => {
            let removal = tree_ops::promote_children_in_tree(tree, &node_id)?;
            removed(removal, node_id)
        }
    }
}

fn require<'a>(tree: &'a Tree, id: &str) -> Result<&'a Node> {
    tree_ops::find_node_by_id(tree, id).ok_or_else(|| GoalMapError::NodeNotFound {
        node_id: id.to_string(),
    })
}

/// A replacement subtree must keep ids unique and stay within the height limit
fn check_replacement(tree: &Tree, node: &Node) -> Result<()> {
    let target = tree_ops::find_subtree(tree, &node.id).ok_or_else(|| {
        GoalMapError::NodeNotFound {
            node_id: node.id.clone(),
        }
    })?;
    let depth = tree_ops::find_node_path(tree, &node.id).len().saturating_sub(1);
    if depth + node.height() > MAX_TREE_HEIGHT {
        return Err(GoalMapError::DepthLimitExceeded {
            node_id: node.id.clone(),
            max: MAX_TREE_HEIGHT,
        });
    }
    validate_tree(node)?;

    let replaced: HashSet<String> = target.subtree_ids().into_iter().collect();
    let outside: HashSet<String> = tree
        .subtree_ids()
        .into_iter()
        .filter(|id| !replaced.contains(id))
        .collect();
    match node.subtree_ids().into_iter().find(|id| outside.contains(id)) {
        Some(dup) => Err(GoalMapError::DuplicateNodeId { node_id: dup }),
        None => Ok(()),
    }
}

/// Copy the target, change it, validate, write back (rebalancing siblings
/// if importance moved)
fn edit(tree: &Tree, node_id: &str, change: impl FnOnce(&mut Node)) -> Result<Applied> {
    let mut node = require(tree, node_id)?.clone();
    change(&mut node);
    validate_fields(&node)?;
    Ok(Applied {
        tree: tree_ops::update_node_rebalancing(tree, node),
        selected_id: node_id.to_string(),
    })
}

fn removed(removal: tree_ops::Removal, node_id: String) -> Result<Applied> {
    match removal.new_selected_id {
        Some(selected_id) => Ok(Applied {
            tree: removal.tree,
            selected_id,
        }),
        None => Err(GoalMapError::NodeNotFound { node_id }),
    }
}

fn new_leaf(title: &str, color: Option<String>) -> Node {
    let mut node = Node::with_generated_id(title);
    node.color = color;
    node
}

fn validate_fields(node: &Node) -> Result<()> {
    if node.title.trim().is_empty() {
        return Err(GoalMapError::InvalidTitle {
            node_id: node.id.clone(),
        });
    }
    if !node.importance.is_finite() || node.importance < MIN_IMPORTANCE {
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
    Ok(())
}
