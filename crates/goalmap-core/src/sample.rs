//! Built-in sample tree
//!
//! Shown on first launch and whenever a stored snapshot is missing or
//! malformed.

use crate::model::{Node, Tree};

/// The "Annual Company Goals" sample
pub fn sample_tree() -> Tree {
    Node::root("Annual Company Goals")
        .with_progress(0.3)
        .with_child(
            Node::new("product", "Product Development")
                .with_importance(4.0)
                .with_progress(0.5)
                .with_child(leaf("feat1", "Feature A Launch", 3.0, 0.8))
                .with_child(leaf("feat2", "Feature B R&D", 2.0, 0.3))
                .with_child(
                    Node::new("ux", "UX Overhaul")
                        .with_progress(0.4)
                        .with_child(leaf("ux-research", "User Research", 1.0, 0.9))
                        .with_child(leaf("ux-design", "Design System Update", 1.0, 0.2)),
                ),
        )
        .with_child(
            Node::new("marketing", "Marketing & Sales")
                .with_importance(3.0)
                .with_progress(0.2)
                .with_child(leaf("campaign", "Q3 Campaign", 2.0, 0.1))
                .with_child(leaf("seo", "SEO Improvement", 1.0, 0.5))
                .with_child(leaf("sales-team", "Expand Sales Team", 2.0, 0.0)),
        )
        .with_child(
            Node::new("hr", "Human Resources")
                .with_importance(2.0)
                .with_progress(0.7)
                .with_child(leaf("hiring", "Hire 10 Engineers", 1.0, 0.9))
                .with_child(leaf("culture", "Improve Company Culture", 1.0, 0.5)),
        )
        .into_tree()
}

fn leaf(id: &str, title: &str, importance: f64, progress: f64) -> Node {
    Node::new(id, title)
        .with_importance(importance)
        .with_progress(progress)
}
