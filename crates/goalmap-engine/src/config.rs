//! Session configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! transition_ms = 200
//! snapshot_key = "goalmap.tree"
//!
//! [layout]
//! overview_depth_cap = 2
//!
//! [history]
//! capacity = 100
//! ```

use std::path::Path;
use std::time::Duration;

use goalmap_core::errors::GoalMapError;
use goalmap_core::{HistoryConfig, LayoutConfig};
use goalmap_store::DEFAULT_SNAPSHOT_KEY;
use serde::{Deserialize, Serialize};

/// Default focus transition window in milliseconds
pub const DEFAULT_TRANSITION_MS: u64 = 350;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub layout: LayoutConfig,
    pub history: HistoryConfig,
    /// How long a requested focus change waits before it takes effect
    pub transition_ms: u64,
    /// Key the tree snapshot is stored under
    pub snapshot_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            history: HistoryConfig::default(),
            transition_ms: DEFAULT_TRANSITION_MS,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse a TOML document; missing fields take their defaults
    ///
    /// # Errors
    /// * `Config` - Malformed TOML or a field of the wrong type
    pub fn from_toml_str(text: &str) -> Result<Self, GoalMapError> {
        toml::from_str(text).map_err(|e| GoalMapError::Config {
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// * `Config` - The file cannot be read or does not parse
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GoalMapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GoalMapError::Config {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = SessionConfig::from_toml_str(
            r#"
            transition_ms = 0

            [layout]
            zoomed_depth_cap = 8

            [history]
            capacity = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.transition(), Duration::ZERO);
        assert_eq!(config.layout.zoomed_depth_cap, 8);
        assert_eq!(config.layout.overview_depth_cap, 3);
        assert_eq!(config.history.capacity, 10);
        assert_eq!(config.snapshot_key, "goalmap.tree");
    }

    #[test]
    fn test_bad_type_is_config_error() {
        let err = SessionConfig::from_toml_str("transition_ms = \"slow\"").unwrap_err();
        assert!(matches!(err, GoalMapError::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = SessionConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, GoalMapError::Config { .. }));
    }
}
