//! Test helpers for building in-memory registries.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::anyhow;

use crate::core::registry::{Registry, TestCase};

/// A test case whose procedure always succeeds.
pub fn passing(name: &str) -> TestCase {
    TestCase::new(name, Box::new(|| Ok(())))
}

/// A test case whose procedure always fails.
pub fn failing(name: &str) -> TestCase {
    let name = name.to_string();
    TestCase::new(
        name.clone(),
        Box::new(move || Err(anyhow!("{name} exercised the failure path"))),
    )
}

/// A test case that counts invocations and fails the first
/// `fail_first` of them, succeeding afterwards. Useful for exercising
/// the retry pass.
pub fn flaky(name: &str, invocations: Rc<Cell<usize>>, fail_first: usize) -> TestCase {
    let name = name.to_string();
    TestCase::new(
        name.clone(),
        Box::new(move || {
            let seen = invocations.get();
            invocations.set(seen + 1);
            if seen < fail_first {
                Err(anyhow!("{name} flaked on invocation {seen}"))
            } else {
                Ok(())
            }
        }),
    )
}

/// Registry of always-passing tests with the given names.
pub fn passing_registry(names: &[&str]) -> Registry {
    Registry::new(names.iter().map(|name| passing(name)).collect())
}
