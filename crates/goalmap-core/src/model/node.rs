use std::sync::Arc;

use serde::{Deserialize, Serialize};

use goalmap_core_types::{generate_node_id, ROOT_ID};

/// Floor for a node's importance; the importance slider never goes below it.
pub const MIN_IMPORTANCE: f64 = 0.1;

/// Importance given to freshly created nodes and to snapshots that omit it.
pub const DEFAULT_IMPORTANCE: f64 = 1.0;

/// Deepest level a node may sit below the root.
///
/// Each level costs two levels of JSON nesting in a snapshot, so this keeps
/// every storable tree inside the decoder's nesting limit. The checked
/// operations ([`crate::apply`], `try_add_node_to_tree`) refuse edits past
/// it, which also bounds the recursion of the derived `Drop`, `PartialEq`
/// and `Serialize` impls. Hand-built trees are not checked until they are
/// validated or saved.
pub const MAX_TREE_HEIGHT: usize = 60;

/// A shared, immutable goal tree.
///
/// Mutations never touch a `Node` in place: every operation in
/// [`crate::ops::tree_ops`] builds a new root and shares every untouched
/// subtree with the input through the `Arc`s.
pub type Tree = Arc<Node>;

/// Node - one goal in the weighted goal tree
///
/// Siblings are unordered; layout and iteration sort them by `title`.
/// The derived impls recurse through `children`, so trees are kept within
/// [`MAX_TREE_HEIGHT`] levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Opaque unique identifier (the root always uses [`ROOT_ID`])
    pub id: String,

    /// Display string, also the sibling sort key
    pub title: String,

    /// Sibling-relative weight used for angular allocation and rollup
    #[serde(default = "default_importance")]
    pub importance: f64,

    /// Own completion in [0, 1], excluding descendants
    #[serde(default, rename = "progress", alias = "progressSelf")]
    pub progress_self: f64,

    /// Explicit colour; derived from depth at layout time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Free-text annotation, opaque to the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default)]
    pub children: Vec<Arc<Node>>,
}

fn default_importance() -> f64 {
    DEFAULT_IMPORTANCE
}

impl Node {
    /// Create a leaf with default importance and zero progress
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            importance: DEFAULT_IMPORTANCE,
            progress_self: 0.0,
            color: None,
            context: None,
            children: Vec::new(),
        }
    }

    /// Fresh opaque id for a new node (`node_<uuid v7>`)
    pub fn generate_id() -> String {
        generate_node_id()
    }

    /// Create a leaf with a freshly generated id
    pub fn with_generated_id(title: impl Into<String>) -> Self {
        Self::new(Self::generate_id(), title)
    }

    /// Create an empty root node
    pub fn root(title: impl Into<String>) -> Self {
        Self::new(ROOT_ID, title)
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress_self = progress;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Append several children
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    /// Wrap into a shareable [`Tree`]
    pub fn into_tree(self) -> Tree {
        Arc::new(self)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this node carries the well-known root id
    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }

    /// Sum of the direct children's importance
    pub fn children_importance(&self) -> f64 {
        self.children.iter().map(|c| c.importance).sum()
    }

    /// Children in layout order: by title (case-sensitive, bytewise), then id
    pub fn sorted_children(&self) -> Vec<&Arc<Node>> {
        let mut sorted: Vec<&Arc<Node>> = self.children.iter().collect();
        sorted.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        sorted
    }

    /// Longest root-to-leaf edge count below this node (0 for a leaf)
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&Node, usize)> = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children.iter().map(|c| (c.as_ref(), depth + 1)));
        }
        max_depth
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node> = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter().map(|c| c.as_ref()));
        }
        count
    }

    /// Ids of this node and every descendant, in depth-first pre-order
    pub fn subtree_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        let mut stack: Vec<&Node> = vec![self];
        while let Some(node) = stack.pop() {
            ids.push(node.id.clone());
            stack.extend(node.children.iter().rev().map(|c| c.as_ref()));
        }
        ids
    }
}
