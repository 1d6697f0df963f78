//! Command-backed test procedures.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::core::registry::TestProcedure;

/// Build the procedure for a manifest entry: spawn the command with
/// inherited stdio and map its exit status to the success/failure
/// signal. There is no timeout; a hung command hangs the run.
pub fn command_procedure(command: Vec<String>, dir: Option<PathBuf>) -> TestProcedure {
    Box::new(move || run_command(&command, dir.as_deref()))
}

fn run_command(command: &[String], dir: Option<&Path>) -> Result<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| anyhow!("empty command"))?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    debug!(program = %program, ?dir, "spawning test command");
    let status = cmd
        .status()
        .with_context(|| format!("spawn {program}"))?;

    if status.success() {
        Ok(())
    } else {
        match status.code() {
            Some(code) => Err(anyhow!("exit code {code}")),
            None => Err(anyhow!("terminated by signal")),
        }
    }
}
