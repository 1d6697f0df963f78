//! Per-run outcome tracking for registry tests.

use serde::{Deserialize, Serialize};

/// Outcome of a single registry test within the current run.
///
/// A test moves `NotRun -> {Excluded | Success | Failed}` during the
/// initial pass; only the retry controller may move `Failed -> Success`.
/// `Excluded` is terminal for the pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    #[default]
    NotRun,
    Excluded,
    Success,
    Failed,
}

/// Mutable per-run record of each test's current status, indexed like
/// the registry. Created zero-initialized (`NotRun`) and mutated only
/// by the execution driver and the retry controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusVector(Vec<TestStatus>);

impl StatusVector {
    /// All-`NotRun` vector for a registry of `len` tests.
    pub fn new(len: usize) -> Self {
        Self(vec![TestStatus::NotRun; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> TestStatus {
        self.0[index]
    }

    pub fn set(&mut self, index: usize, status: TestStatus) {
        self.0[index] = status;
    }

    /// Mark every entry `Excluded`, regardless of prior status.
    pub fn exclude_all(&mut self) {
        self.0.fill(TestStatus::Excluded);
    }

    /// Indices currently holding the given status, in ascending order.
    pub fn indices_with(&self, status: TestStatus) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(move |(_, s)| **s == status)
            .map(|(i, _)| i)
    }

    pub fn count(&self, status: TestStatus) -> usize {
        self.0.iter().filter(|s| **s == status).count()
    }

    pub fn any_failed(&self) -> bool {
        self.0.contains(&TestStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vector_is_all_not_run() {
        let status = StatusVector::new(3);
        assert_eq!(status.count(TestStatus::NotRun), 3);
        assert!(!status.any_failed());
    }

    #[test]
    fn exclude_all_overrides_every_status() {
        let mut status = StatusVector::new(3);
        status.set(1, TestStatus::Failed);
        status.exclude_all();
        assert_eq!(status.count(TestStatus::Excluded), 3);
    }

    #[test]
    fn indices_with_ascending_order() {
        let mut status = StatusVector::new(4);
        status.set(3, TestStatus::Failed);
        status.set(0, TestStatus::Failed);
        let failed: Vec<usize> = status.indices_with(TestStatus::Failed).collect();
        assert_eq!(failed, vec![0, 3]);
    }
}
