//! Execution driver: one ordered pass over the registry.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::directives::IndexRange;
use crate::core::registry::Registry;
use crate::core::status::{StatusVector, TestStatus};

/// Counts accumulated by a single pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub tried: usize,
    pub failed: usize,
}

/// Walk the registry in ascending index order, invoking exactly the
/// tests whose status is `NotRun` and whose index falls inside `range`.
///
/// A `NotRun` test outside the range is still counted as tried and is
/// marked `Success` without being invoked. An `Excluded` test gets a
/// "bypassed" notice unless the exclusion came from a blanket
/// (`auto_bypass`) rule.
pub fn run_pass<W: Write>(
    registry: &Registry,
    status: &mut StatusVector,
    range: IndexRange,
    auto_bypass: bool,
    out: &mut W,
) -> Result<PassReport> {
    let mut report = PassReport::default();

    for index in 0..registry.len() {
        match status.get(index) {
            TestStatus::NotRun => {
                report.tried += 1;
                if !range.contains(index) {
                    status.set(index, TestStatus::Success);
                    continue;
                }
                if run_one_test(registry, index, out)? {
                    status.set(index, TestStatus::Success);
                } else {
                    status.set(index, TestStatus::Failed);
                    report.failed += 1;
                }
            }
            TestStatus::Excluded if !auto_bypass => {
                let case = registry.get(index)?;
                writeln!(out, "Test number {index} ({}) is bypassed.", case.name)
                    .context("write bypass notice")?;
            }
            _ => {}
        }
    }

    Ok(report)
}

/// Invoke a single test and record the outcome on `out`, flushing
/// around the invocation so a crash mid-test leaves a legible trail.
///
/// Returns whether the procedure reported success. Only I/O or registry
/// errors surface as `Err`.
pub fn run_one_test<W: Write>(registry: &Registry, index: usize, out: &mut W) -> Result<bool> {
    let case = registry.get(index)?;

    writeln!(out, "Starting test number {index}, {}", case.name).context("write progress")?;
    out.flush().context("flush progress")?;
    debug!(index, name = %case.name, "invoking test procedure");

    let outcome = (case.procedure)();
    match &outcome {
        Ok(()) => {
            writeln!(out, "    Success.").context("write outcome")?;
            info!(index, name = %case.name, "test passed");
        }
        Err(err) => {
            writeln!(out, "    Fails, error: {err:#}.").context("write outcome")?;
            info!(index, name = %case.name, error = %format!("{err:#}"), "test failed");
        }
    }
    out.flush().context("flush outcome")?;

    Ok(outcome.is_ok())
}
