//! Pure, deterministic orchestration logic. No I/O; fully testable in
//! isolation.

pub mod directives;
pub mod registry;
pub mod retry_policy;
pub mod selection;
pub mod status;
