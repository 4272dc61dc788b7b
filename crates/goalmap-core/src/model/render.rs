use std::sync::Arc;

use super::node::Node;

/// One positioned arc produced by the radial layout
///
/// Angles are radians measured clockwise from twelve o'clock; radii are
/// pixels from the chart centre. Render nodes are recomputed on every layout
/// call and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub node_id: String,
    /// Ring index, 0 = the centre hub
    pub depth: usize,
    pub theta0: f64,
    pub theta1: f64,
    pub r0: f64,
    pub r1: f64,
    /// Source node (shared, never mutated)
    pub node: Arc<Node>,
    /// Explicit colour or the depth-derived palette entry
    pub color: String,
    /// Importance-weighted rollup of the subtree's progress
    pub display_progress: f64,
    /// Real children exist but sit beyond the rendered depth
    pub has_collapsed_children: bool,
    /// Continuation slivers; empty unless `has_collapsed_children`
    pub slivers: Vec<ContinuationSliver>,
}

impl RenderNode {
    pub fn angular_span(&self) -> f64 {
        self.theta1 - self.theta0
    }

    pub fn mid_radius(&self) -> f64 {
        (self.r0 + self.r1) / 2.0
    }

    /// Arc length along the ring's middle, where labels are drawn
    pub fn arc_length(&self) -> f64 {
        self.angular_span() * self.mid_radius()
    }

    /// Arc length along the outer edge
    pub fn outer_arc_length(&self) -> f64 {
        self.angular_span() * self.r1
    }

    /// Whether the title fits along the arc at `char_px` pixels per character
    pub fn label_fits(&self, char_px: f64) -> bool {
        (self.node.title.chars().count() as f64) * char_px < self.arc_length()
    }

    /// Radius where the filled progress band starts (progress fills inward
    /// from the outer edge)
    pub fn progress_inner_radius(&self) -> f64 {
        self.r1 - (self.r1 - self.r0) * self.display_progress
    }
}

/// What clicking a continuation sliver does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliverKind {
    /// Arc too short to subdivide; expands the owning node itself
    Merged,
    /// Stands for one hidden child; jumps focus to that child
    Child,
}

/// Thin band just inside a collapsed node's outer radius, standing for
/// hidden depth
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuationSliver {
    pub kind: SliverKind,
    /// Node that becomes focused when the sliver is clicked
    pub target_id: String,
    pub theta0: f64,
    pub theta1: f64,
    pub r0: f64,
    pub r1: f64,
    /// Rollup of the target (the owning node for a merged sliver)
    pub display_progress: f64,
}

impl ContinuationSliver {
    pub fn mid_radius(&self) -> f64 {
        (self.r0 + self.r1) / 2.0
    }

    pub fn arc_length(&self) -> f64 {
        (self.theta1 - self.theta0) * self.mid_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn render(title: &str, span: f64, r0: f64, r1: f64) -> RenderNode {
        RenderNode {
            node_id: "n".to_string(),
            depth: 1,
            theta0: 0.0,
            theta1: span,
            r0,
            r1,
            node: Arc::new(Node::new("n", title)),
            color: "#000000".to_string(),
            display_progress: 0.5,
            has_collapsed_children: false,
            slivers: Vec::new(),
        }
    }

    #[test]
    fn test_arc_lengths() {
        let rn = render("A", PI, 100.0, 200.0);
        assert!((rn.arc_length() - PI * 150.0).abs() < 1e-9);
        assert!((rn.outer_arc_length() - PI * 200.0).abs() < 1e-9);
        assert_eq!(rn.progress_inner_radius(), 150.0);
    }

    #[test]
    fn test_label_fits() {
        let wide = render("Short", PI, 100.0, 200.0);
        let narrow = render("A much longer title here", 0.01, 100.0, 200.0);
        assert!(wide.label_fits(8.0));
        assert!(!narrow.label_fits(8.0));
    }
}
