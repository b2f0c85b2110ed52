//! Stable exit codes for poller binaries.

/// Check or mark completed, whether or not a new version was found.
pub const OK: i32 = 0;
/// Feed fetch, state write, CI output, or config failed.
pub const FAILED: i32 = 1;
