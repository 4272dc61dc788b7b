//! Progress Rollup: importance-weighted progress aggregation
//!
//! - A leaf reports its own `progress_self` verbatim.
//! - An internal node reports the importance-weighted mean of its children's
//!   rollups.
//! - When the children's importance sums to exactly zero the node falls back
//!   to its own `progress_self`.

use std::collections::HashMap;

use crate::model::Node;

/// Rolled-up progress of `node`'s subtree, in [0, 1]
pub fn progress_rollup(node: &Node) -> f64 {
    post_order(node, |_, _| {})
}

/// Rollup of every node in a subtree, computed in one pass
///
/// Built once per layout call so each render node and continuation sliver
/// looks its value up instead of re-walking the subtree.
#[derive(Debug, Clone, Default)]
pub struct RollupIndex {
    values: HashMap<String, f64>,
}

impl RollupIndex {
    pub fn build(root: &Node) -> Self {
        let mut values = HashMap::new();
        post_order(root, |node, value| {
            values.insert(node.id.clone(), value);
        });
        Self { values }
    }

    /// Rollup for `id`; `None` if `id` was not under the indexed root
    pub fn get(&self, id: &str) -> Option<f64> {
        self.values.get(id).copied()
    }

    /// Rollup for `node`, computed directly if it was not indexed
    pub fn of(&self, node: &Node) -> f64 {
        self.get(&node.id).unwrap_or_else(|| progress_rollup(node))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

struct Frame<'a> {
    node: &'a Node,
    next_child: usize,
    weighted_sum: f64,
    weight_total: f64,
}

impl<'a> Frame<'a> {
    fn new(node: &'a Node) -> Self {
        Self {
            node,
            next_child: 0,
            weighted_sum: 0.0,
            weight_total: 0.0,
        }
    }

    fn value(&self) -> f64 {
        if self.node.children.is_empty() || self.weight_total == 0.0 {
            return self.node.progress_self;
        }
        let mean = self.weighted_sum / self.weight_total;
        if mean.is_finite() {
            mean.clamp(0.0, 1.0)
        } else {
            self.node.progress_self
        }
    }
}

/// Iterative post-order walk; `visit` sees each node with its rollup.
/// Returns the root's rollup.
fn post_order<'a>(root: &'a Node, mut visit: impl FnMut(&'a Node, f64)) -> f64 {
    let mut stack = vec![Frame::new(root)];
    let mut result = root.progress_self;

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        if frame.next_child < node.children.len() {
            let child = node.children[frame.next_child].as_ref();
            frame.next_child += 1;
            stack.push(Frame::new(child));
            continue;
        }

        let Some(done) = stack.pop() else { break };
        let value = done.value();
        visit(done.node, value);

        match stack.last_mut() {
            Some(parent) => {
                parent.weighted_sum += done.node.importance * value;
                parent.weight_total += done.node.importance;
            }
            None => result = value,
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_is_verbatim() {
        let leaf = Node::new("l", "L").with_progress(0.37);
        assert_eq!(progress_rollup(&leaf), 0.37);
    }

    #[test]
    fn test_weighted_mean() {
        let node = Node::root("R")
            .with_progress(0.9)
            .with_child(Node::new("a", "A").with_importance(3.0).with_progress(1.0))
            .with_child(Node::new("b", "B").with_importance(1.0).with_progress(0.0));
        assert!((progress_rollup(&node) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weight_falls_back_to_self() {
        let node = Node::root("R")
            .with_progress(0.4)
            .with_child(Node::new("a", "A").with_importance(0.0).with_progress(1.0));
        assert_eq!(progress_rollup(&node), 0.4);
    }

    #[test]
    fn test_nested_rollup() {
        // ux: (0.9 + 0.2) / 2 = 0.55
        let ux = Node::new("ux", "UX")
            .with_child(Node::new("r", "Research").with_progress(0.9))
            .with_child(Node::new("d", "Design").with_progress(0.2));
        let root = Node::root("R")
            .with_child(ux)
            .with_child(Node::new("f", "F").with_progress(0.45));
        assert!((progress_rollup(&root) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_index_matches_direct() {
        let root = Node::root("R")
            .with_child(
                Node::new("a", "A")
                    .with_importance(2.0)
                    .with_child(Node::new("a1", "A1").with_progress(0.3)),
            )
            .with_child(Node::new("b", "B").with_progress(0.8));
        let index = RollupIndex::build(&root);
        assert_eq!(index.len(), 4);
        assert_eq!(index.get("a"), Some(0.3));
        assert_eq!(index.get("root"), Some(progress_rollup(&root)));
        assert_eq!(index.get("missing"), None);
    }
}
