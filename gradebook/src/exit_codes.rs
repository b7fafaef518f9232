//! Stable exit codes for gradebook CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid usage, unreadable config or a failed read/write.
pub const INVALID: i32 = 1;
/// The action was rejected (duplicate id, unknown student, bad grade, ...).
pub const REJECTED: i32 = 2;
/// The persisted document exists but could not be decoded.
pub const CORRUPT: i32 = 3;
