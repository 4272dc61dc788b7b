#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{assert_close, promote_tree};
use goalmap_core::errors::GoalMapError;
use goalmap_core::model::Node;
use goalmap_core::ops::{find_node_by_id, promote_children_in_tree};

#[test]
fn test_promote_splits_importance_evenly_weighted_children() {
    let tree = promote_tree();
    let removal = promote_children_in_tree(&tree, "p").unwrap();

    assert_eq!(removal.new_selected_id.as_deref(), Some("parent"));
    assert!(find_node_by_id(&removal.tree, "p").is_none());

    let parent = find_node_by_id(&removal.tree, "parent").unwrap();
    let ids: Vec<_> = parent.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["before", "x", "y", "after"]);

    assert_close(find_node_by_id(&removal.tree, "x").unwrap().importance, 1.5);
    assert_close(find_node_by_id(&removal.tree, "y").unwrap().importance, 1.5);

    let old_total = find_node_by_id(&tree, "parent").unwrap().children_importance();
    assert_close(parent.children_importance(), old_total);
}

#[test]
fn test_promote_keeps_grandchildren_and_progress() {
    let tree = promote_tree();
    let removal = promote_children_in_tree(&tree, "p").unwrap();
    assert_close(find_node_by_id(&removal.tree, "y").unwrap().progress_self, 1.0);
}

#[test]
fn test_promote_proportional_weights() {
    let tree = Node::root("Goals")
        .with_child(
            Node::new("p", "P")
                .with_importance(6.0)
                .with_child(Node::new("x", "X").with_importance(1.0))
                .with_child(Node::new("y", "Y").with_importance(2.0)),
        )
        .into_tree();

    let removal = promote_children_in_tree(&tree, "p").unwrap();
    assert_close(find_node_by_id(&removal.tree, "x").unwrap().importance, 2.0);
    assert_close(find_node_by_id(&removal.tree, "y").unwrap().importance, 4.0);
}

#[test]
fn test_promote_zero_weight_children_split_evenly() {
    let tree = Node::root("Goals")
        .with_child(
            Node::new("p", "P")
                .with_importance(3.0)
                .with_child(Node::new("x", "X").with_importance(0.0))
                .with_child(Node::new("y", "Y").with_importance(0.0))
                .with_child(Node::new("z", "Z").with_importance(0.0)),
        )
        .into_tree();

    let removal = promote_children_in_tree(&tree, "p").unwrap();
    for id in ["x", "y", "z"] {
        assert_close(find_node_by_id(&removal.tree, id).unwrap().importance, 1.0);
    }
}

#[test]
fn test_promote_leaf_is_plain_remove() {
    let tree = promote_tree();
    let removal = promote_children_in_tree(&tree, "after").unwrap();
    let parent = find_node_by_id(&removal.tree, "parent").unwrap();
    assert_eq!(parent.children.len(), 2);
    assert_eq!(removal.new_selected_id.as_deref(), Some("parent"));
}

#[test]
fn test_promote_root_forbidden() {
    let tree = promote_tree();
    let err = promote_children_in_tree(&tree, "root").unwrap_err();
    assert_eq!(
        err,
        GoalMapError::RootImmutable {
            op: "promote_children".to_string()
        }
    );
}

#[test]
fn test_promote_missing_is_unchanged() {
    let tree = promote_tree();
    let removal = promote_children_in_tree(&tree, "ghost").unwrap();
    assert!(!removal.applied());
    assert_eq!(removal.tree, tree);
}
