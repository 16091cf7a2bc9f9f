//! Structured logging schema and field name constants for notekeep.
//!
//! All crates use these names for structured `tracing` fields so log
//! aggregation can query the same keys across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Unexpected store or server failure surfaced as a 500 |
//! | WARN  | Recoverable issue, rejected configuration value |
//! | INFO  | Lifecycle events (startup, shutdown), note writes |
//! | DEBUG | Decision points, validation rejections, pool metrics |
//! | TRACE | Per-row detail |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "database", "auth"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "notes", "pool", "session"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create_note", "update_note", "get_note", "list_notes"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Authenticated caller.
pub const USER_ID: &str = "user_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by a query.
pub const RESULT_COUNT: &str = "result_count";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

// ─── Operation names ───────────────────────────────────────────────────────

pub const OP_CREATE_NOTE: &str = "create_note";
pub const OP_UPDATE_NOTE: &str = "update_note";
pub const OP_GET_NOTE: &str = "get_note";
pub const OP_LIST_NOTES: &str = "list_notes";
pub const OP_AUTHENTICATE: &str = "authenticate";
