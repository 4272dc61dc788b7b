//! Error handling for goalmap-store
//!
//! Wraps goalmap-core ExError with store-specific helpers

use goalmap_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Wrap a backend failure as a persistence error for `operation`
///
/// The backend error is kept as the source so its kind and code survive.
pub fn persistence_error(operation: &str, key: &str, source: ExError) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(operation.to_string())
        .with_message(format!("snapshot '{}' could not be stored", key))
        .with_source(source)
}

/// Create an invalid key error
pub fn invalid_key(key: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("kv_key")
        .with_message(format!("Invalid store key '{}'", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_kind() {
        let err = io_error("read_kv", std::io::Error::other("boom"));
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("read_kv"));
    }

    #[test]
    fn test_persistence_error_keeps_source() {
        let inner = io_error("write_kv", std::io::Error::other("disk full"));
        let err = persistence_error("save_snapshot", "goalmap.tree", inner);
        assert_eq!(err.code(), "ERR_PERSISTENCE");
        assert_eq!(err.source_error().map(|e| e.kind()), Some(ExErrorKind::Io));
    }
}
