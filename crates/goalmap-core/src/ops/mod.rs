pub mod tree_ops;

pub use tree_ops::{
    add_node_to_tree, find_node_by_id, find_node_path, find_parent, find_subtree,
    importance_share, promote_children_in_tree, remove_node_from_tree, try_add_node_to_tree,
    try_update_node_in_tree, update_node_in_tree, update_node_rebalancing, Removal,
};
