//! Immutable ordered registry of named test procedures.

use anyhow::Result;
use thiserror::Error;

/// A parameterless unit of work returning a success/failure signal.
/// `Ok(())` is the neutral signal; the error carries the failure cause.
pub type TestProcedure = Box<dyn Fn() -> Result<()>>;

/// A named test in the registry.
pub struct TestCase {
    pub name: String,
    pub procedure: TestProcedure,
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TestCase {
    pub fn new(name: impl Into<String>, procedure: TestProcedure) -> Self {
        Self {
            name: name.into(),
            procedure,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("test index {index} out of range (registry has {len} tests)")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered collection of test cases, constructed once at process start
/// and never mutated during a run. Index order is significant: it is
/// the execution order, the report order, and the range-filter axis.
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self { cases }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&TestCase, RegistryError> {
        self.cases.get(index).ok_or(RegistryError::OutOfRange {
            index,
            len: self.cases.len(),
        })
    }

    /// Resolve a test name to its registry index.
    ///
    /// When several entries share a name, the last one wins, matching
    /// construction order. Callers relying on duplicate names get the
    /// most recently registered entry.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        let mut found = None;
        for (index, case) in self.cases.iter().enumerate() {
            if case.name == name {
                found = Some(index);
            }
        }
        found
    }

    /// Registry names in index order, for usage listings.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|case| case.name.as_str())
    }
}
