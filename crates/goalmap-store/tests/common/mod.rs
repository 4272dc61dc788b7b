use goalmap_core::errors::{ExError, ExErrorKind};
use goalmap_core::model::{Node, Tree};
use goalmap_store::KvStore;

/// Small hand-built tree distinct from the sample
#[allow(dead_code)]
pub fn custom_tree() -> Tree {
    Node::root("Personal Goals")
        .with_progress(0.1)
        .with_child(
            Node::new("health", "Health")
                .with_importance(2.0)
                .with_color("#2ca02c")
                .with_child(Node::new("run", "Run a 10k").with_progress(0.6))
                .with_child(
                    Node::new("sleep", "Sleep 8h")
                        .with_progress(0.3)
                        .with_context("Track with the watch"),
                ),
        )
        .with_child(Node::new("learn", "Learn Rust").with_importance(3.0).with_progress(0.4))
        .into_tree()
}

/// Store whose every operation fails
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct BrokenKvStore;

impl KvStore for BrokenKvStore {
    fn get(&self, _key: &str) -> Result<Option<String>, ExError> {
        Err(ExError::new(ExErrorKind::Io).with_message("device unavailable"))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), ExError> {
        Err(ExError::new(ExErrorKind::Io).with_message("quota exceeded"))
    }

    fn remove(&mut self, _key: &str) -> Result<(), ExError> {
        Err(ExError::new(ExErrorKind::Io).with_message("device unavailable"))
    }
}
