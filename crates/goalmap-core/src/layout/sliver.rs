//! Continuation slivers for nodes whose children sit beyond the rendered
//! depth
//!
//! A collapsed node gets a thin band just inside its outer radius. Wide
//! arcs split the band among the hidden children (same importance-weighted
//! split as real rings, separated by a small pixel gap); narrow arcs get a
//! single merged band that expands the node itself.

use std::f64::consts::TAU;

use super::config::LayoutConfig;
use super::radial::allocate_spans;
use crate::model::{ContinuationSliver, RenderNode, SliverKind};
use crate::rollup::RollupIndex;

/// Slivers for `owner`; empty if it has no children
pub fn continuation_slivers(
    owner: &RenderNode,
    rollup: &RollupIndex,
    config: &LayoutConfig,
) -> Vec<ContinuationSliver> {
    let node = &owner.node;
    if node.children.is_empty() {
        return Vec::new();
    }

    let band = config
        .sliver_thickness_px
        .min(owner.r1 - owner.r0)
        .max(0.0);
    let r1 = owner.r1;
    let r0 = r1 - band;

    let merged = || {
        vec![ContinuationSliver {
            kind: SliverKind::Merged,
            target_id: node.id.clone(),
            theta0: owner.theta0,
            theta1: owner.theta1,
            r0,
            r1,
            display_progress: owner.display_progress,
        }]
    };

    if owner.outer_arc_length() < 2.0 * config.min_label_px {
        return merged();
    }
    let spans = allocate_spans(node, owner.theta0, owner.theta1);
    if spans.is_empty() {
        return merged();
    }

    let mid_radius = (r0 + r1) / 2.0;
    let gap = if mid_radius > 0.0 {
        config.sliver_gap_px / mid_radius
    } else {
        0.0
    };
    // On a full circle the first and last slivers are neighbours too
    let wraps = (owner.angular_span() - TAU).abs() < 1e-9;
    let last = spans.len() - 1;

    spans
        .into_iter()
        .enumerate()
        .filter_map(|(i, (child, t0, t1))| {
            let s0 = if i > 0 || wraps { t0 + gap / 2.0 } else { t0 };
            let s1 = if i < last || wraps { t1 - gap / 2.0 } else { t1 };
            if s1 <= s0 || (s1 - s0) * mid_radius < config.min_sliver_arc_px {
                return None;
            }
            Some(ContinuationSliver {
                kind: SliverKind::Child,
                target_id: child.id.clone(),
                theta0: s0,
                theta1: s1,
                r0,
                r1,
                display_progress: rollup.of(child),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use std::sync::Arc;

    fn owner(node: Node, theta0: f64, theta1: f64, r0: f64, r1: f64) -> RenderNode {
        RenderNode {
            node_id: node.id.clone(),
            depth: 1,
            theta0,
            theta1,
            r0,
            r1,
            node: Arc::new(node),
            color: "#000000".to_string(),
            display_progress: 0.25,
            has_collapsed_children: true,
            slivers: Vec::new(),
        }
    }

    fn parent() -> Node {
        Node::new("p", "P").with_children([
            Node::new("x", "X").with_importance(1.0).with_progress(0.5),
            Node::new("y", "Y").with_importance(1.0).with_progress(1.0),
        ])
    }

    #[test]
    fn test_narrow_arc_merges() {
        let cfg = LayoutConfig::default();
        // outer arc = 0.1 * 200 = 20px < 48px
        let rn = owner(parent(), 0.0, 0.1, 150.0, 200.0);
        let index = RollupIndex::build(&rn.node);
        let slivers = continuation_slivers(&rn, &index, &cfg);

        assert_eq!(slivers.len(), 1);
        assert_eq!(slivers[0].kind, SliverKind::Merged);
        assert_eq!(slivers[0].target_id, "p");
        assert_eq!(slivers[0].display_progress, 0.25);
        assert_eq!(slivers[0].r1, 200.0);
        assert_eq!(slivers[0].r0, 194.0);
    }

    #[test]
    fn test_wide_arc_subdivides_with_gap() {
        let cfg = LayoutConfig::default();
        let rn = owner(parent(), 0.0, 1.0, 150.0, 200.0);
        let index = RollupIndex::build(&rn.node);
        let slivers = continuation_slivers(&rn, &index, &cfg);

        assert_eq!(slivers.len(), 2);
        assert_eq!(slivers[0].target_id, "x");
        assert_eq!(slivers[1].target_id, "y");
        assert_eq!(slivers[0].theta0, 0.0);
        assert_eq!(slivers[1].theta1, 1.0);
        let gap = slivers[1].theta0 - slivers[0].theta1;
        assert!((gap * 197.0 - 2.0).abs() < 1e-9);
        assert_eq!(slivers[0].display_progress, 0.5);
        assert_eq!(slivers[1].display_progress, 1.0);
    }

    #[test]
    fn test_tiny_child_sliver_dropped() {
        let cfg = LayoutConfig::default();
        let node = Node::new("p", "P").with_children([
            Node::new("big", "Big").with_importance(1000.0),
            Node::new("tiny", "Tiny").with_importance(0.1),
        ]);
        let rn = owner(node, 0.0, 1.0, 150.0, 200.0);
        let index = RollupIndex::build(&rn.node);
        let slivers = continuation_slivers(&rn, &index, &cfg);

        assert_eq!(slivers.len(), 1);
        assert_eq!(slivers[0].target_id, "big");
    }

    #[test]
    fn test_zero_weight_children_merge() {
        let cfg = LayoutConfig::default();
        let node = Node::new("p", "P").with_child(Node::new("z", "Z").with_importance(0.0));
        let rn = owner(node, 0.0, 1.0, 150.0, 200.0);
        let slivers = continuation_slivers(&rn, &RollupIndex::default(), &cfg);

        assert_eq!(slivers.len(), 1);
        assert_eq!(slivers[0].kind, SliverKind::Merged);
    }
}
