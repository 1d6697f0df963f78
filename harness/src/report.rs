//! Report emitter: pure rendering of pass results.

use std::io::Write;

use anyhow::{Context, Result};

use crate::core::registry::Registry;
use crate::core::status::{StatusVector, TestStatus};

/// Names of currently `Failed` tests, in registry order.
pub fn failed_names<'a>(registry: &'a Registry, status: &StatusVector) -> Result<Vec<&'a str>> {
    let mut names = Vec::new();
    for index in status.indices_with(TestStatus::Failed) {
        names.push(registry.get(index)?.name.as_str());
    }
    Ok(names)
}

/// Write the `Tried N tests, M fail(s).` summary line.
pub fn write_summary<W: Write>(out: &mut W, tried: usize, failed: usize) -> Result<()> {
    let plural = if failed == 1 { "" } else { "s" };
    writeln!(out, "Tried {tried} tests, {failed} fail{plural}.").context("write summary")?;
    Ok(())
}

/// Write a labeled, space-separated failed-name list.
pub fn write_failed_list<W: Write>(out: &mut W, label: &str, names: &[&str]) -> Result<()> {
    write!(out, "{label}: ").context("write failed list")?;
    for name in names {
        write!(out, "{name} ").context("write failed list")?;
    }
    writeln!(out).context("write failed list")?;
    Ok(())
}
