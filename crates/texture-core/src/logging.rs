//! Structured logging field name constants for texture-notes.
//!
//! All crates use these constants for consistent structured logging fields,
//! so logs can be filtered by the same names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Operation failed and could not be repaired |
//! | WARN  | Recoverable divergence, repair applied |
//! | INFO  | Lifecycle events (profile open/create), operation completions |
//! | DEBUG | Decision points, intermediate values |

/// Subsystem originating the log event.
/// Values: "db", "mirror", "jobs"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "pool", "reconcile", "compile_queue"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create_subject", "get_note", "compile"
pub const OPERATION: &str = "op";

/// Subject row id being operated on.
pub const SUBJECT_ID: &str = "subject_id";

/// Note row id being operated on.
pub const NOTE_ID: &str = "note_id";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of entities returned by a list query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of dangling rows repaired during a lookup.
pub const REPAIRED_COUNT: &str = "repaired_count";

/// Number of compile jobs in a batch.
pub const JOB_COUNT: &str = "job_count";
