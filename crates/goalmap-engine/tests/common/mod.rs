use std::sync::{Arc, Mutex};

use goalmap_core::errors::{ExError, ExErrorKind};
use goalmap_core::model::Node;
use goalmap_core::persistence::SnapshotSink;

/// Sink that records saved titles and can be switched to failing
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct SharedSink {
    pub saved: Arc<Mutex<Vec<Node>>>,
    pub clears: Arc<Mutex<usize>>,
    pub failing: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl SharedSink {
    pub fn saves(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    pub fn last_saved(&self) -> Option<Node> {
        self.saved.lock().unwrap().last().cloned()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

impl SnapshotSink for SharedSink {
    fn save(&mut self, tree: &Node) -> Result<(), ExError> {
        if *self.failing.lock().unwrap() {
            return Err(ExError::new(ExErrorKind::Io).with_message("storage quota exceeded"));
        }
        self.saved.lock().unwrap().push(tree.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ExError> {
        if *self.failing.lock().unwrap() {
            return Err(ExError::new(ExErrorKind::Persistence).with_message("storage locked"));
        }
        *self.clears.lock().unwrap() += 1;
        Ok(())
    }
}
