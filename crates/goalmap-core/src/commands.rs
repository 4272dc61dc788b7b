//! Command inventory for user edits
//!
//! Every edit the UI shell can request is a [`Command`]; [`crate::apply`]
//! turns one into a new tree.

use crate::model::Node;

/// Title given to a node created by [`Command::AddChild`]
pub const NEW_CHILD_TITLE: &str = "New Subgoal";

/// Title given to a node created by [`Command::AddSibling`]
pub const NEW_SIBLING_TITLE: &str = "New Goal";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace a node wholesale; an importance change rebalances siblings
    UpdateNode { node: Node },

    Rename { node_id: String, title: String },

    /// Change importance, rebalancing siblings
    SetImportance { node_id: String, importance: f64 },

    SetProgress { node_id: String, progress: f64 },

    /// Set or clear the explicit colour
    SetColor {
        node_id: String,
        color: Option<String>,
    },

    SetContext {
        node_id: String,
        context: Option<String>,
    },

    /// Append a fresh "New Subgoal" leaf under `parent_id`
    AddChild { parent_id: String },

    /// Append a fresh "New Goal" leaf next to `sibling_id`
    AddSibling { sibling_id: String },

    /// Remove a node and its subtree
    Delete { node_id: String },

    /// Remove a node, lifting its children into its place
    PromoteChildren { node_id: String },
}

impl Command {
    /// Operation name used in logs and errors
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::UpdateNode { .. } => "update_node",
            Command::Rename { .. } => "rename_node",
            Command::SetImportance { .. } => "set_importance",
            Command::SetProgress { .. } => "set_progress",
            Command::SetColor { .. } => "set_color",
            Command::SetContext { .. } => "set_context",
            Command::AddChild { .. } => "add_child",
            Command::AddSibling { .. } => "add_sibling",
            Command::Delete { .. } => "delete_node",
            Command::PromoteChildren { .. } => "promote_children",
        }
    }

    /// Node the command is aimed at
    pub fn target_id(&self) -> &str {
        match self {
            Command::UpdateNode { node } => &node.id,
            Command::Rename { node_id, .. }
            | Command::SetImportance { node_id, .. }
            | Command::SetProgress { node_id, .. }
            | Command::SetColor { node_id, .. }
            | Command::SetContext { node_id, .. }
            | Command::Delete { node_id }
            | Command::PromoteChildren { node_id } => node_id,
            Command::AddChild { parent_id } => parent_id,
            Command::AddSibling { sibling_id } => sibling_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_and_op_name() {
        let cmd = Command::AddChild {
            parent_id: "root".to_string(),
        };
        assert_eq!(cmd.target_id(), "root");
        assert_eq!(cmd.op_name(), "add_child");

        let cmd = Command::UpdateNode {
            node: Node::new("n1", "N"),
        };
        assert_eq!(cmd.target_id(), "n1");
    }

    #[test]
    fn test_op_names_are_distinct() {
        let cmds = [
            Command::Delete {
                node_id: "a".to_string(),
            },
            Command::PromoteChildren {
                node_id: "a".to_string(),
            },
        ];
        assert_ne!(cmds[0].op_name(), cmds[1].op_name());
        assert_ne!(cmds[0], cmds[1]);
    }
}
