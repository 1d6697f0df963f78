//! Selection resolver: directives to initial status vector.

use thiserror::Error;

use crate::core::directives::Directives;
use crate::core::registry::Registry;
use crate::core::status::{StatusVector, TestStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
    /// An exclude or allow-list token did not match any registry entry.
    /// This aborts resolution; the caller shows usage and fails the run.
    #[error("unknown test name: {0}")]
    UnknownTestName(String),
}

/// Resolver output: the initial status vector plus whether exclusions
/// were applied as an automatic blanket (mode or allow-list), which
/// suppresses per-test "bypassed" notices during execution.
#[derive(Debug, PartialEq, Eq)]
pub struct Selection {
    pub status: StatusVector,
    pub auto_bypass: bool,
}

/// Turn directives into the initial per-test status.
///
/// Rules apply in order, later rules overriding earlier ones:
/// 1. every test starts `NotRun`;
/// 2. each excluded name marks its test `Excluded`;
/// 3. any exclusive mode marks all tests `Excluded`;
/// 4. a non-empty allow-list marks all tests `Excluded`, then resets
///    each named test to `NotRun` (so a mode plus explicit names runs
///    exactly those names).
///
/// The index range is not applied here; the execution driver gates on
/// it per test.
pub fn resolve(registry: &Registry, directives: &Directives) -> Result<Selection, DirectiveError> {
    let mut status = StatusVector::new(registry.len());
    let mut auto_bypass = false;

    for name in &directives.excluded {
        let index = registry
            .find_by_name(name)
            .ok_or_else(|| DirectiveError::UnknownTestName(name.clone()))?;
        status.set(index, TestStatus::Excluded);
    }

    if directives.modes.exclusive() {
        auto_bypass = true;
        status.exclude_all();
    }

    if !directives.allow_list.is_empty() {
        auto_bypass = true;
        status.exclude_all();
        for name in &directives.allow_list {
            let index = registry
                .find_by_name(name)
                .ok_or_else(|| DirectiveError::UnknownTestName(name.clone()))?;
            status.set(index, TestStatus::NotRun);
        }
    }

    Ok(Selection {
        status,
        auto_bypass,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directives::ModeRequests;
    use crate::test_support::passing_registry;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn empty_directives_select_everything() {
        let registry = passing_registry(&["a", "b", "c"]);
        let selection = resolve(&registry, &Directives::default()).expect("resolve");
        assert!(!selection.auto_bypass);
        assert_eq!(selection.status.count(TestStatus::NotRun), 3);
    }

    #[test]
    fn excluded_names_are_marked() {
        let registry = passing_registry(&["a", "b", "c"]);
        let directives = Directives {
            excluded: names(&["b"]),
            ..Directives::default()
        };
        let selection = resolve(&registry, &directives).expect("resolve");
        assert!(!selection.auto_bypass);
        assert_eq!(selection.status.get(0), TestStatus::NotRun);
        assert_eq!(selection.status.get(1), TestStatus::Excluded);
        assert_eq!(selection.status.get(2), TestStatus::NotRun);
    }

    #[test]
    fn unknown_exclude_name_is_hard_error() {
        let registry = passing_registry(&["a"]);
        let directives = Directives {
            excluded: names(&["nope"]),
            ..Directives::default()
        };
        assert_eq!(
            resolve(&registry, &directives).unwrap_err(),
            DirectiveError::UnknownTestName("nope".to_string())
        );
    }

    #[test]
    fn exclusive_mode_excludes_all() {
        let registry = passing_registry(&["a", "b"]);
        let directives = Directives {
            modes: ModeRequests {
                stress_minutes: Some(5),
                ..ModeRequests::default()
            },
            ..Directives::default()
        };
        let selection = resolve(&registry, &directives).expect("resolve");
        assert!(selection.auto_bypass);
        assert_eq!(selection.status.count(TestStatus::Excluded), 2);
    }

    #[test]
    fn allow_list_overrides_exclusive_mode() {
        let registry = passing_registry(&["a", "b", "c"]);
        let directives = Directives {
            allow_list: names(&["b"]),
            modes: ModeRequests {
                fuzz_minutes: Some(1),
                ..ModeRequests::default()
            },
            ..Directives::default()
        };
        let selection = resolve(&registry, &directives).expect("resolve");
        assert!(selection.auto_bypass);
        assert_eq!(selection.status.get(0), TestStatus::Excluded);
        assert_eq!(selection.status.get(1), TestStatus::NotRun);
        assert_eq!(selection.status.get(2), TestStatus::Excluded);
    }

    #[test]
    fn allow_list_wins_over_exclude_for_same_name() {
        let registry = passing_registry(&["a", "b"]);
        let directives = Directives {
            excluded: names(&["a"]),
            allow_list: names(&["a"]),
            ..Directives::default()
        };
        let selection = resolve(&registry, &directives).expect("resolve");
        assert_eq!(selection.status.get(0), TestStatus::NotRun);
        assert_eq!(selection.status.get(1), TestStatus::Excluded);
    }

    #[test]
    fn unknown_allow_list_name_is_hard_error() {
        let registry = passing_registry(&["a"]);
        let directives = Directives {
            allow_list: names(&["ghost"]),
            ..Directives::default()
        };
        assert_eq!(
            resolve(&registry, &directives).unwrap_err(),
            DirectiveError::UnknownTestName("ghost".to_string())
        );
    }
}
