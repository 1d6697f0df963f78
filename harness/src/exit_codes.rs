//! Stable exit codes for the harness binary.

/// All selected tests passed (possibly after a retry pass).
pub const OK: i32 = 0;
/// At least one test ended the run `Failed`, or the retry pass was
/// blocked by a non-retryable test.
pub const TESTS_FAILED: i32 = 1;
/// A directive did not resolve: unknown test name, malformed argument,
/// or unreadable suite manifest. Matches clap's usage-error code.
pub const USAGE: i32 = 2;
