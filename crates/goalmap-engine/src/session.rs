//! Interactive session over one goal tree
//!
//! A [`Session`] is what a UI shell holds: the undo history, the focused and
//! selected node ids, a pending focus transition and the snapshot sink every
//! committed tree is written to.
//!
//! ## Logging Ownership
//!
//! The session owns lifecycle logging for user-facing operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Core and store code only use `tracing::debug!()`/`tracing::warn!()`.
//!
//! ## Persistence failures
//!
//! A failed snapshot write never rolls back the in-memory state. The
//! operation completes, the failure is logged at warn, and the caller gets an
//! `ExErrorKind::Persistence` error so it can tell the user that changes may
//! not survive a reload.

use std::time::Instant;

use goalmap_core::errors::{ExError, ExErrorKind, GoalMapError};
use goalmap_core::history::History;
use goalmap_core::layout::RadialLayout;
use goalmap_core::model::{Node, RenderNode, Tree};
use goalmap_core::ops::{find_node_by_id, find_node_path, find_parent, find_subtree};
use goalmap_core::persistence::{NoopSnapshotSink, SnapshotSink};
use goalmap_core::sample::sample_tree;
use goalmap_core::{apply, log_op_end, log_op_error, log_op_start, Command};
use goalmap_store::{FallbackReason, KvStore, SnapshotRepo};

use crate::config::SessionConfig;

/// Focus change waiting for its transition window to elapse
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingFocus {
    node_id: String,
    due: Instant,
}

pub struct Session {
    config: SessionConfig,
    layout: RadialLayout,
    history: History,
    sink: Box<dyn SnapshotSink>,
    focused_id: String,
    selected_id: String,
    pending_focus: Option<PendingFocus>,
    startup_fallback: Option<FallbackReason>,
}

impl Session {
    /// Session over `initial`, focused and selected on its root
    pub fn new(initial: Tree, sink: Box<dyn SnapshotSink>, config: SessionConfig) -> Self {
        let root_id = initial.id.clone();
        Self {
            layout: RadialLayout::new(config.layout.clone()),
            history: History::with_config(initial, config.history),
            sink,
            focused_id: root_id.clone(),
            selected_id: root_id,
            pending_focus: None,
            startup_fallback: None,
            config,
        }
    }

    /// Session over the sample tree that persists nothing
    pub fn ephemeral(config: SessionConfig) -> Self {
        Self::new(sample_tree(), Box::new(NoopSnapshotSink), config)
    }

    /// Session over the tree stored in `store`
    ///
    /// A missing or malformed snapshot starts the session from the sample
    /// tree; [`startup_fallback`](Self::startup_fallback) tells why.
    pub fn restore<K: KvStore + 'static>(store: K, config: SessionConfig) -> Self {
        log_op_start!("restore_session");
        let start = Instant::now();

        let repo = SnapshotRepo::with_key(store, config.snapshot_key.clone());
        let load = repo.load();
        let fallback = load.reason().cloned();

        let mut session = Self::new(load.into_tree(), Box::new(repo), config);
        session.startup_fallback = fallback;

        log_op_end!(
            "restore_session",
            duration_ms = start.elapsed().as_millis() as u64,
            restored = session.startup_fallback.is_none()
        );
        session
    }

    // ===== STATE =====

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The current tree version
    pub fn tree(&self) -> &Tree {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Why the session started from the sample tree, if it did
    pub fn startup_fallback(&self) -> Option<&FallbackReason> {
        self.startup_fallback.as_ref()
    }

    pub fn focused_id(&self) -> &str {
        &self.focused_id
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    /// Target of a focus change still inside its transition window
    pub fn pending_focus_id(&self) -> Option<&str> {
        self.pending_focus.as_ref().map(|p| p.node_id.as_str())
    }

    /// The focused subtree; the whole tree if the focused node is gone
    pub fn focused_subtree(&self) -> &Tree {
        find_subtree(self.tree(), &self.focused_id).unwrap_or(self.tree())
    }

    pub fn focused_node(&self) -> &Node {
        self.focused_subtree()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        find_node_by_id(self.tree(), &self.selected_id)
    }

    pub fn parent_of_selected(&self) -> Option<&Node> {
        find_parent(self.tree(), &self.selected_id)
    }

    /// Nodes from the root down to the focused node
    pub fn breadcrumbs(&self) -> Vec<&Node> {
        let path = find_node_path(self.tree(), &self.focused_id);
        if path.is_empty() {
            vec![self.tree().as_ref()]
        } else {
            path
        }
    }

    /// Whether the view is focused below the root
    pub fn is_zoomed(&self) -> bool {
        self.focused_subtree().id != self.tree().id
    }

    // ===== NAVIGATION =====

    /// Select a node without moving focus
    ///
    /// # Errors
    /// * `NodeNotFound` - `id` is not in the current tree
    pub fn select(&mut self, id: &str) -> Result<(), GoalMapError> {
        self.require(id)?;
        self.selected_id = id.to_string();
        Ok(())
    }

    /// Start a focus transition to `id`
    ///
    /// Focus and selection move once [`settle`](Self::settle) is called at or
    /// after `now + transition_ms`; a zero-length transition moves them at
    /// once. A newer request replaces a pending one.
    ///
    /// # Errors
    /// * `NodeNotFound` - `id` is not in the current tree
    pub fn request_focus(&mut self, id: &str, now: Instant) -> Result<(), GoalMapError> {
        self.require(id)?;
        if self.config.transition_ms == 0 {
            self.pending_focus = None;
            self.set_focus(id.to_string());
            return Ok(());
        }
        self.pending_focus = Some(PendingFocus {
            node_id: id.to_string(),
            due: now + self.config.transition(),
        });
        Ok(())
    }

    /// Complete a pending focus transition whose window has elapsed
    ///
    /// Returns whether focus moved. A pending target deleted in the meantime
    /// is dropped.
    pub fn settle(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_focus.take() else {
            return false;
        };
        if now < pending.due {
            self.pending_focus = Some(pending);
            return false;
        }
        if find_node_by_id(self.tree(), &pending.node_id).is_none() {
            tracing::debug!(node_id = %pending.node_id, "pending focus target vanished");
            return false;
        }
        self.set_focus(pending.node_id);
        true
    }

    /// Focus and select `id` immediately, cancelling any pending transition
    ///
    /// # Errors
    /// * `NodeNotFound` - `id` is not in the current tree
    pub fn focus_now(&mut self, id: &str) -> Result<(), GoalMapError> {
        self.require(id)?;
        self.pending_focus = None;
        self.set_focus(id.to_string());
        Ok(())
    }

    /// Breadcrumb navigation; clicking the current focus does nothing
    ///
    /// Returns whether a transition was started.
    ///
    /// # Errors
    /// * `NodeNotFound` - `id` is not in the current tree
    pub fn breadcrumb_click(&mut self, id: &str, now: Instant) -> Result<bool, GoalMapError> {
        if id == self.focused_id {
            return Ok(false);
        }
        self.request_focus(id, now)?;
        Ok(true)
    }

    /// Centre-hub click: step focus out to the focused node's parent
    ///
    /// Returns whether a transition was started (never at the root).
    pub fn center_click(&mut self, now: Instant) -> bool {
        let Some(parent_id) = find_parent(self.tree(), &self.focused_id).map(|p| p.id.clone())
        else {
            return false;
        };
        self.request_focus(&parent_id, now).is_ok()
    }

    /// Lay out the focused subtree for a `width` x `height` viewport
    pub fn render(&self, width: f64, height: f64) -> Vec<RenderNode> {
        self.layout
            .compute(self.focused_subtree(), width, height, self.is_zoomed())
    }

    // ===== EDITING =====

    /// Apply `cmd`, commit the result and persist it
    ///
    /// Returns the id that is now selected.
    ///
    /// # Errors
    /// * Any `apply` error, converted to `ExError`; nothing changes
    /// * `Persistence` - The edit is committed but the snapshot write failed
    pub fn execute(&mut self, cmd: Command) -> Result<String, ExError> {
        let op = cmd.op_name();
        let target = cmd.target_id().to_string();
        log_op_start!(op, node_id = target.as_str());
        let start = Instant::now();

        let applied = apply(self.tree(), cmd).map_err(|e| {
            let ex_err = ExError::from(e);
            log_op_error!(
                op,
                ex_err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                node_id = target.as_str()
            );
            ex_err
        })?;

        self.history.commit(applied.tree);
        self.selected_id = applied.selected_id.clone();
        self.repair_focus(Some(&applied.selected_id));
        let persisted = self.persist(op);

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            node_id = applied.selected_id.as_str(),
            focus_id = self.focused_id.as_str(),
            history_len = self.history.len()
        );
        persisted.map(|()| applied.selected_id)
    }

    /// Step back one version and persist it
    ///
    /// Returns whether anything changed.
    ///
    /// # Errors
    /// * `Persistence` - The step happened but the snapshot write failed
    pub fn undo(&mut self) -> Result<bool, ExError> {
        self.step("undo", History::undo)
    }

    /// Step forward one version and persist it
    ///
    /// Returns whether anything changed.
    ///
    /// # Errors
    /// * `Persistence` - The step happened but the snapshot write failed
    pub fn redo(&mut self) -> Result<bool, ExError> {
        self.step("redo", History::redo)
    }

    /// Forget the stored snapshot and start over from the sample tree
    ///
    /// The sample is committed as a new version, so undo can bring the
    /// previous tree back.
    ///
    /// # Errors
    /// * `Persistence` - The reset happened but the stored snapshot could not
    ///   be removed
    pub fn reset_to_default(&mut self) -> Result<(), ExError> {
        log_op_start!("reset_to_default");
        let start = Instant::now();

        let cleared = self.sink.clear();
        self.history.commit(sample_tree());
        self.pending_focus = None;
        let root_id = self.tree().id.clone();
        self.set_focus(root_id);

        log_op_end!(
            "reset_to_default",
            duration_ms = start.elapsed().as_millis() as u64,
            history_len = self.history.len()
        );
        cleared.map_err(|e| persistence_failure("reset_to_default", e))
    }

    // ===== INTERNALS =====

    fn require(&self, id: &str) -> Result<(), GoalMapError> {
        find_node_by_id(self.tree(), id)
            .map(|_| ())
            .ok_or_else(|| GoalMapError::NodeNotFound {
                node_id: id.to_string(),
            })
    }

    fn set_focus(&mut self, id: String) {
        self.selected_id = id.clone();
        self.focused_id = id;
    }

    fn step(
        &mut self,
        op: &'static str,
        move_cursor: fn(&mut History) -> Option<&Tree>,
    ) -> Result<bool, ExError> {
        log_op_start!(op);
        let start = Instant::now();

        let moved = move_cursor(&mut self.history).is_some();
        let persisted = if moved {
            self.repair_focus(None);
            self.persist(op)
        } else {
            Ok(())
        };

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            moved = moved,
            history_len = self.history.len()
        );
        persisted.map(|()| moved)
    }

    /// Point focus, selection and any pending transition at nodes that
    /// exist in the current tree
    ///
    /// A vanished focus moves to `fallback` when that exists, else to the
    /// root; a vanished selection follows focus.
    fn repair_focus(&mut self, fallback: Option<&str>) {
        let tree = self.history.current();
        if find_node_by_id(tree, &self.focused_id).is_none() {
            self.focused_id = match fallback {
                Some(id) if find_node_by_id(tree, id).is_some() => id.to_string(),
                _ => tree.id.clone(),
            };
            tracing::debug!(focus_id = %self.focused_id, "focus moved off a removed node");
        }
        if find_node_by_id(tree, &self.selected_id).is_none() {
            self.selected_id = self.focused_id.clone();
        }
        if let Some(pending) = &self.pending_focus {
            if find_node_by_id(tree, &pending.node_id).is_none() {
                self.pending_focus = None;
            }
        }
    }

    fn persist(&mut self, op: &'static str) -> Result<(), ExError> {
        self.sink.save(self.history.current()).map_err(|e| {
            tracing::warn!(
                op,
                err_code = e.code(),
                error = %e,
                "snapshot not saved, changes may not survive a reload"
            );
            persistence_failure(op, e)
        })
    }
}

/// Surface a sink failure as a `Persistence` error
fn persistence_failure(op: &str, err: ExError) -> ExError {
    if err.kind() == ExErrorKind::Persistence {
        return err;
    }
    ExError::new(ExErrorKind::Persistence)
        .with_op(op)
        .with_message("snapshot could not be written")
        .with_source(err)
}
