//! Retry controller: bounded second pass over failed tests.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::registry::Registry;
use crate::core::retry_policy::is_retryable;
use crate::core::status::{StatusVector, TestStatus};
use crate::execute::run_one_test;
use crate::logging::Diagnostics;
use crate::report;

/// Re-invoke every `Failed` test, in registry order, with diagnostics
/// resumed. Tests on the non-retryable policy list are reported and
/// left `Failed`; they make the retry pass fail without stopping the
/// remaining retries.
///
/// Returns whether the retry pass ended with no test still `Failed`
/// and no policy violation.
pub fn retry_failed<W: Write>(
    registry: &Registry,
    status: &mut StatusVector,
    diagnostics: &mut Diagnostics,
    out: &mut W,
) -> Result<bool> {
    diagnostics.resume()?;

    let failed: Vec<usize> = status.indices_with(TestStatus::Failed).collect();
    let mut pass_ok = true;

    for index in failed {
        let name = registry.get(index)?.name.clone();
        if !is_retryable(&name) {
            warn!(index, name = %name, "test is non-retryable by policy");
            writeln!(out, "Cannot retry {name}:").context("write retry notice")?;
            pass_ok = false;
            continue;
        }

        debug!(index, name = %name, "retrying failed test");
        writeln!(out, "Retrying {name}:").context("write retry notice")?;
        if run_one_test(registry, index, out)? {
            // A Heisenbug: the rerun passed.
            status.set(index, TestStatus::Success);
        } else {
            status.set(index, TestStatus::Failed);
            pass_ok = false;
        }
    }

    if pass_ok {
        writeln!(out, "All tests pass after second try.").context("write retry summary")?;
    } else {
        let names = report::failed_names(registry, status)?;
        report::write_failed_list(out, "Still failing", &names)?;
    }

    Ok(pass_ok)
}
