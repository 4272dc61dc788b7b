pub mod node;
pub mod render;

pub use node::{Node, Tree, DEFAULT_IMPORTANCE, MAX_TREE_HEIGHT, MIN_IMPORTANCE};
pub use render::{ContinuationSliver, RenderNode, SliverKind};
