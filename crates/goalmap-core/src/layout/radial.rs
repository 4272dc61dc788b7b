use std::f64::consts::TAU;
use std::sync::Arc;

use super::config::LayoutConfig;
use super::sliver::continuation_slivers;
use crate::model::{Node, RenderNode, Tree};
use crate::rollup::RollupIndex;

/// Ring sizing derived from the viewport and the focused subtree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Outer radius available to the chart
    pub max_radius: f64,
    /// Radius of the centre hub
    pub hub_radius: f64,
    /// Number of rings drawn outside the hub
    pub allowed_depth: usize,
    /// Radial thickness of each ring (0 when only the hub is drawn)
    pub ring_thickness: f64,
}

impl RingGeometry {
    /// Size the rings for a subtree of `subtree_height` in a viewport
    ///
    /// Rendered depth is the smallest of the subtree height, the mode's depth
    /// cap, and how many rings of `min_ring_thickness_px` fit between the hub
    /// and the outer radius.
    pub fn compute(
        subtree_height: usize,
        width: f64,
        height: f64,
        zoomed: bool,
        config: &LayoutConfig,
    ) -> Self {
        let max_radius = (width.min(height) / 2.0 - config.margin_px).max(0.0);
        let hub_radius = config.center_radius_px.max(0.0).min(max_radius);
        let remaining = max_radius - hub_radius;

        let size_cap = if config.min_ring_thickness_px > 0.0 {
            (remaining / config.min_ring_thickness_px).floor() as usize
        } else {
            usize::MAX
        };
        let allowed_depth = subtree_height
            .min(config.depth_cap(zoomed))
            .min(size_cap);
        let ring_thickness = if allowed_depth > 0 {
            remaining / allowed_depth as f64
        } else {
            0.0
        };

        Self {
            max_radius,
            hub_radius,
            allowed_depth,
            ring_thickness,
        }
    }

    /// Inner and outer radius of a ring; depth 0 is the hub
    pub fn radii(&self, depth: usize) -> (f64, f64) {
        if depth == 0 {
            return (0.0, self.hub_radius);
        }
        let d = depth as f64;
        (
            self.hub_radius + (d - 1.0) * self.ring_thickness,
            self.hub_radius + d * self.ring_thickness,
        )
    }
}

/// Split `[theta0, theta1)` among `node`'s children by importance, in title
/// order. Empty when the children's importance sums to zero.
pub(crate) fn allocate_spans(node: &Node, theta0: f64, theta1: f64) -> Vec<(&Arc<Node>, f64, f64)> {
    let total = node.children_importance();
    if !(total > 0.0) || !total.is_finite() {
        return Vec::new();
    }
    let sorted = node.sorted_children();
    let last = sorted.len().saturating_sub(1);
    let span = theta1 - theta0;

    let mut start = theta0;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, child)| {
            // Pin the final edge so siblings tile the parent exactly
            let end = if i == last {
                theta1
            } else {
                start + span * (child.importance / total)
            };
            let span_start = start;
            start = end;
            (child, span_start, end)
        })
        .collect()
}

/// Radial layout with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct RadialLayout {
    config: LayoutConfig,
}

impl RadialLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `focused` in a `width` x `height` viewport
    ///
    /// Output is in traversal order: parent before children, siblings by
    /// title. The input tree is never modified; default colours are computed
    /// into the render nodes only.
    pub fn compute(&self, focused: &Tree, width: f64, height: f64, zoomed: bool) -> Vec<RenderNode> {
        let geometry = RingGeometry::compute(focused.height(), width, height, zoomed, &self.config);
        let rollup = RollupIndex::build(focused);

        let mut out = Vec::new();
        let mut stack: Vec<(&Arc<Node>, usize, f64, f64)> = vec![(focused, 0, 0.0, TAU)];

        while let Some((node, depth, theta0, theta1)) = stack.pop() {
            let (r0, r1) = geometry.radii(depth);
            let at_boundary = depth >= geometry.allowed_depth;

            let mut render = RenderNode {
                node_id: node.id.clone(),
                depth,
                theta0,
                theta1,
                r0,
                r1,
                node: Arc::clone(node),
                color: node
                    .color
                    .clone()
                    .unwrap_or_else(|| self.config.color_for_depth(depth).to_string()),
                display_progress: rollup.of(node),
                has_collapsed_children: at_boundary && !node.children.is_empty(),
                slivers: Vec::new(),
            };
            if render.has_collapsed_children {
                render.slivers = continuation_slivers(&render, &rollup, &self.config);
            }
            out.push(render);

            if at_boundary {
                continue;
            }
            for (child, c0, c1) in allocate_spans(node, theta0, theta1).into_iter().rev() {
                stack.push((child, depth + 1, c0, c1));
            }
        }

        tracing::debug!(
            focus_id = %focused.id,
            render_len = out.len(),
            allowed_depth = geometry.allowed_depth,
            "computed radial layout"
        );
        out
    }
}

/// Lay out `focused` with the default configuration
pub fn layout(focused: &Tree, width: f64, height: f64, zoomed: bool) -> Vec<RenderNode> {
    RadialLayout::default().compute(focused, width, height, zoomed)
}
