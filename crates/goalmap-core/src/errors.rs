use thiserror::Error;

/// Result type alias using GoalMapError
pub type Result<T> = std::result::Result<T, GoalMapError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and surfacing messages in the UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    DuplicateId,
    InvalidSnapshot,

    // Mutation
    Forbidden,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DuplicateId => "ERR_DUPLICATE_ID",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, node id, message) for debugging and user display.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node ID context
    pub fn with_node_id(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the node ID context, if any
    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node_id) = &self.node_id {
            write!(f, " (node_id: {})", node_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for goal-tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GoalMapError {
    /// Target node does not exist in the tree
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// Parent node for an insertion does not exist in the tree
    #[error("Parent node not found: {node_id}")]
    ParentNotFound { node_id: String },

    /// The root node cannot be deleted, promoted or given siblings
    #[error("Operation '{op}' is not allowed on the root node")]
    RootImmutable { op: String },

    /// Importance is not a finite non-negative number
    #[error("Invalid importance {value} on node {node_id}")]
    InvalidImportance { node_id: String, value: f64 },

    /// Progress is outside [0, 1]
    #[error("Invalid progress {value} on node {node_id}")]
    InvalidProgress { node_id: String, value: f64 },

    /// The same id appears more than once in a tree
    #[error("Duplicate node id: {node_id}")]
    DuplicateNodeId { node_id: String },

    /// Title is empty or whitespace-only
    #[error("Invalid title on node {node_id}: cannot be empty or whitespace-only")]
    InvalidTitle { node_id: String },

    /// A node would sit deeper than the supported height
    #[error("Node {node_id} would sit more than {max} levels below the root")]
    DepthLimitExceeded { node_id: String, max: usize },

    /// A node carries an empty id
    #[error("Node with title '{title}' has an empty id")]
    EmptyNodeId { title: String },

    /// Snapshot failed load-time validation
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// Snapshot store read/write failed
    #[error("Persistence failure: {reason}")]
    Persistence { reason: String },

    /// JSON (de)serialization failed
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl From<GoalMapError> for ExError {
    fn from(err: GoalMapError) -> Self {
        let message = err.to_string();
        match err {
            GoalMapError::NodeNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_node_id(node_id)
                .with_message(message),

            GoalMapError::ParentNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_node_id(node_id)
                .with_op("find_parent")
                .with_message(message),

            GoalMapError::RootImmutable { op } => ExError::new(ExErrorKind::Forbidden)
                .with_node_id(goalmap_core_types::ROOT_ID)
                .with_op(op)
                .with_message(message),

            GoalMapError::InvalidImportance { node_id, .. }
            | GoalMapError::InvalidProgress { node_id, .. }
            | GoalMapError::InvalidTitle { node_id } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_node_id(node_id)
                    .with_message(message)
            }

            GoalMapError::DuplicateNodeId { node_id } => ExError::new(ExErrorKind::DuplicateId)
                .with_node_id(node_id)
                .with_message(message),

            GoalMapError::DepthLimitExceeded { node_id, .. } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_node_id(node_id)
                    .with_message(message)
            }

            GoalMapError::EmptyNodeId { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            GoalMapError::InvalidSnapshot { .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot).with_message(message)
            }

            GoalMapError::Persistence { .. } => {
                ExError::new(ExErrorKind::Persistence).with_message(message)
            }

            GoalMapError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            GoalMapError::Config { .. } => ExError::new(ExErrorKind::Config).with_message(message),
        }
    }
}

impl From<serde_json::Error> for GoalMapError {
    fn from(err: serde_json::Error) -> Self {
        GoalMapError::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::Forbidden, "ERR_FORBIDDEN"),
            (ExErrorKind::InvalidSnapshot, "ERR_INVALID_SNAPSHOT"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_code_op_and_node() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("update_node")
            .with_node_id("n1")
            .with_message("gone");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_NOT_FOUND]"));
        assert!(text.contains("update_node"));
        assert!(text.contains("n1"));
    }

    #[test]
    fn test_source_chain() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk full");
        let outer = ExError::new(ExErrorKind::Persistence).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Io)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
