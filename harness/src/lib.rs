//! Deterministic test-suite orchestration harness.
//!
//! Given an immutable registry of named, parameterless test
//! procedures, the harness resolves which tests an invocation should
//! run, executes them in registry order, tracks per-test status,
//! reports aggregate counts, and optionally retries failed tests with
//! diagnostics re-enabled. The test procedures themselves are external
//! collaborators: opaque callables returning a success/failure signal.
//!
//! - **[`core`]**: pure, deterministic logic (registry, selection,
//!   status, retry policy). No I/O, fully testable in isolation.
//! - **[`io`]**: side-effecting operations (suite manifest loading,
//!   child-process procedures).
//!
//! Orchestration modules ([`execute`], [`retry`], [`run`], [`report`])
//! coordinate core logic with I/O to implement the CLI.

pub mod core;
pub mod execute;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod report;
pub mod retry;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
