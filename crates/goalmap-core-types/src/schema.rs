//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_NODE_ID: &str = "node_id";
pub const FIELD_PARENT_ID: &str = "parent_id";
pub const FIELD_FOCUS_ID: &str = "focus_id";

// Collection sizes
pub const FIELD_RENDER_LEN: &str = "render_len";
pub const FIELD_HISTORY_LEN: &str = "history_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
