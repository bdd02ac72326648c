//! Canonical schema constants for structured logging and events
//!
//! Every lifecycle event emitted by the engine uses these keys so log
//! pipelines can index page operations uniformly.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Entity identifiers
pub const FIELD_PAGE_ID: &str = "page_id";
pub const FIELD_COMPONENT_ID: &str = "component_id";
pub const FIELD_VERSION_ID: &str = "version_id";
pub const FIELD_VERSION_NUMBER: &str = "version_number";

// Collection sizes
pub const FIELD_COMPONENT_COUNT: &str = "component_count";
pub const FIELD_VERSION_COUNT: &str = "version_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
