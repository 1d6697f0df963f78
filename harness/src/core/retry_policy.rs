//! Retry policy: which failed tests may be re-run.

/// Test names that must never be retried. These are long-running or
/// non-idempotent stress and fuzz procedures; a second invocation in
/// the same process is not meaningful and may not terminate.
pub const NON_RETRYABLE: [&str; 6] = [
    "stress",
    "fuzz",
    "fuzz_initial",
    "cnx_stress",
    "cnx_ddos",
    "eccf_corrupted_fuzz",
];

pub fn is_retryable(name: &str) -> bool {
    !NON_RETRYABLE.contains(&name)
}
