//! Suite manifest parsing and validation.
//!
//! The manifest is a TOML file declaring the test registry: an ordered
//! list of named commands. It is read once at process start; the
//! resulting registry is immutable for the whole run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::core::registry::{Registry, TestCase};
use crate::io::process::command_procedure;

/// A parsed suite manifest.
///
/// ```toml
/// [[test]]
/// name = "dtn_basic"
/// command = ["./scripts/dtn_basic.sh"]
///
/// [[test]]
/// name = "dtn_data"
/// command = ["./scripts/dtn.sh", "data"]
/// dir = "dtn"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SuiteFile {
    #[serde(rename = "test", default)]
    pub tests: Vec<TestEntry>,
}

/// One registry entry: a name and the command that implements it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TestEntry {
    pub name: String,
    /// Program and arguments. Exit 0 is the success signal.
    pub command: Vec<String>,
    /// Working directory for the command, relative to the invocation.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl SuiteFile {
    /// Load and validate a suite manifest from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read suite {}", path.display()))?;
        let suite: SuiteFile = toml::from_str(&contents)
            .with_context(|| format!("parse suite {}", path.display()))?;
        suite
            .validate()
            .with_context(|| format!("validate suite {}", path.display()))?;
        Ok(suite)
    }

    #[cfg(test)]
    pub fn parse_str(contents: &str) -> Result<Self> {
        let suite: SuiteFile = toml::from_str(contents).context("parse suite")?;
        suite.validate()?;
        Ok(suite)
    }

    fn validate(&self) -> Result<()> {
        if self.tests.is_empty() {
            bail!("suite must declare at least one [[test]]");
        }
        // Duplicate names are allowed; registry lookup resolves them
        // last-match-wins.
        for (index, entry) in self.tests.iter().enumerate() {
            if entry.name.trim().is_empty() {
                bail!("test[{index}].name must be non-empty");
            }
            if entry.command.is_empty() || entry.command[0].trim().is_empty() {
                bail!("test[{index}].command must be a non-empty array");
            }
        }
        Ok(())
    }

    /// Convert the manifest into the runtime registry, preserving
    /// declaration order.
    pub fn into_registry(self) -> Registry {
        let cases = self
            .tests
            .into_iter()
            .map(|entry| {
                let TestEntry { name, command, dir } = entry;
                TestCase::new(name, command_procedure(command, dir))
            })
            .collect();
        Registry::new(cases)
    }
}
