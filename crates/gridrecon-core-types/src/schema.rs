//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the emitting macros and
//! the test capture layer that asserts on them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Reconciliation sizes
pub const FIELD_ROW_COUNT: &str = "row_count";
pub const FIELD_COLUMN_COUNT: &str = "column_count";
pub const FIELD_ADDED: &str = "added";
pub const FIELD_REMOVED: &str = "removed";
pub const FIELD_MODIFIED: &str = "modified";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
