use std::sync::Arc;

use goalmap_core::model::{Node, Tree};
use proptest::prelude::*;

/// Root with two leaves A (importance 4) and B (importance 2)
#[allow(dead_code)]
pub fn two_child_tree() -> Tree {
    Node::root("Goals")
        .with_child(Node::new("a", "A").with_importance(4.0))
        .with_child(Node::new("b", "B").with_importance(2.0))
        .into_tree()
}

/// Root > Parent > P(importance 3) > {X, Y}, plus a sibling of P
#[allow(dead_code)]
pub fn promote_tree() -> Tree {
    Node::root("Goals")
        .with_child(
            Node::new("parent", "Parent")
                .with_child(Node::new("before", "Alpha").with_importance(2.0))
                .with_child(
                    Node::new("p", "P")
                        .with_importance(3.0)
                        .with_child(Node::new("x", "X").with_progress(0.5))
                        .with_child(Node::new("y", "Y").with_progress(1.0)),
                )
                .with_child(Node::new("after", "Zeta").with_importance(1.0)),
        )
        .into_tree()
}

/// Linear chain root > n1 > n2 > ... > n{len}
#[allow(dead_code)]
pub fn chain_tree(len: usize) -> Tree {
    let mut node: Option<Node> = None;
    for i in (1..=len).rev() {
        let mut current = Node::new(format!("n{i}"), format!("Level {i}"));
        if let Some(child) = node.take() {
            current = current.with_child(child);
        }
        node = Some(current);
    }
    let mut root = Node::root("Chain");
    if let Some(child) = node {
        root = root.with_child(child);
    }
    root.into_tree()
}

/// One row of a generated tree: (parent choice, importance, progress)
#[allow(dead_code)]
pub type NodeSpec = (usize, f64, f64);

/// Build a tree where node `i` hangs under node `choice % i`
///
/// Node ids are `n{i}`, with `n0` being the root (id `root`).
#[allow(dead_code)]
pub fn build_tree(specs: &[NodeSpec]) -> Tree {
    let count = specs.len() + 1;
    let mut parents = vec![0usize; count];
    for (offset, (choice, _, _)) in specs.iter().enumerate() {
        let i = offset + 1;
        parents[i] = choice % i;
    }

    let mut built: Vec<Option<Node>> = (0..count)
        .map(|i| {
            if i == 0 {
                Some(Node::root("Generated"))
            } else {
                let (_, importance, progress) = specs[i - 1];
                Some(
                    Node::new(format!("n{i}"), format!("T{:03}", (i * 37) % 101))
                        .with_importance(importance)
                        .with_progress(progress),
                )
            }
        })
        .collect();

    // Children always have larger indices than their parents
    for i in (1..count).rev() {
        if let Some(child) = built[i].take() {
            if let Some(parent) = built[parents[i]].as_mut() {
                parent.children.push(Arc::new(child));
            }
        }
    }
    built[0].take().unwrap_or_else(|| Node::root("Generated")).into_tree()
}

#[allow(dead_code)]
pub fn tree_strategy(max_nodes: usize) -> impl Strategy<Value = Tree> {
    prop::collection::vec((any::<usize>(), 0.1f64..10.0, 0.0f64..=1.0), 0..max_nodes)
        .prop_map(|specs| build_tree(&specs))
}

/// Trees whose importances may be zero
#[allow(dead_code)]
pub fn weighted_tree_strategy(max_nodes: usize) -> impl Strategy<Value = Tree> {
    prop::collection::vec(
        (
            any::<usize>(),
            prop_oneof![Just(0.0f64), 0.1f64..10.0],
            0.0f64..=1.0,
        ),
        0..max_nodes,
    )
    .prop_map(|specs| build_tree(&specs))
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
