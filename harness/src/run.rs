//! Suite orchestration: selection, execution pass, report, retry.

use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::core::directives::{Directives, ModeRequests};
use crate::core::registry::Registry;
use crate::core::selection::Selection;
use crate::execute::{self, PassReport};
use crate::logging::Diagnostics;
use crate::report;
use crate::retry;

/// Final outcome of a run, mapped to an exit code by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunVerdict {
    /// Counts from the initial pass.
    pub initial: PassReport,
    /// True if any test ends the run `Failed`, or the retry pass was
    /// blocked by policy.
    pub overall_failed: bool,
}

/// Run the resolved selection to completion: initial pass, report,
/// and, when eligible, the retry pass.
///
/// The retry pass runs only when the initial pass had failures, the
/// diagnostics were suspended for it, and retry was requested.
pub fn run_suite<W: Write>(
    registry: &Registry,
    mut selection: Selection,
    directives: &Directives,
    diagnostics: &mut Diagnostics,
    out: &mut W,
) -> Result<RunVerdict> {
    log_mode_requests(&directives.modes);

    let initial = execute::run_pass(
        registry,
        &mut selection.status,
        directives.range,
        selection.auto_bypass,
        out,
    )?;

    report::write_summary(out, initial.tried, initial.failed)?;

    let mut overall_failed = initial.failed > 0;
    if initial.failed > 0 {
        let names = report::failed_names(registry, &selection.status)?;
        report::write_failed_list(out, "Failed test(s)", &names)?;

        if diagnostics.suspended() && directives.retry_failed {
            let retry_ok = retry::retry_failed(registry, &mut selection.status, diagnostics, out)?;
            overall_failed = !retry_ok;
        }
    }

    Ok(RunVerdict {
        initial,
        overall_failed,
    })
}

/// The numeric/string parameters that accompany an exclusive mode are
/// consumed by external stress and fuzz runners; the orchestration only
/// records them.
fn log_mode_requests(modes: &ModeRequests) {
    if let Some(minutes) = modes.stress_minutes {
        debug!(minutes, "stress mode requested");
    }
    if let Some(minutes) = modes.fuzz_minutes {
        debug!(minutes, "fuzz mode requested");
    }
    if let Some((minutes, connections)) = modes.cnx_stress {
        debug!(minutes, connections, "connection stress mode requested");
    }
    if let Some(request) = &modes.cnx_ddos {
        debug!(
            packets = request.packets,
            interval_usec = request.interval_usec,
            log_dir = %request.log_dir,
            "connection ddos mode requested"
        );
    }
    if let Some(rounds) = modes.cf_fuzz_rounds {
        debug!(rounds, "corrupt-file fuzz mode requested");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::core::selection::resolve;
    use crate::test_support::{failing, flaky, passing};

    fn run(
        registry: &Registry,
        directives: &Directives,
        suspended: bool,
    ) -> (RunVerdict, String) {
        let selection = resolve(registry, directives).expect("resolve");
        let mut diagnostics = Diagnostics::detached(suspended);
        let mut out = Vec::new();
        let verdict = run_suite(registry, selection, directives, &mut diagnostics, &mut out)
            .expect("run suite");
        (verdict, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn exclude_directive_end_to_end() {
        let registry = Registry::new(vec![
            passing("A"),
            passing("B"),
            passing("C"),
            passing("D"),
        ]);
        let directives = Directives {
            excluded: vec!["B".to_string()],
            ..Directives::default()
        };

        let (verdict, text) = run(&registry, &directives, false);
        assert!(!verdict.overall_failed);
        assert_eq!(verdict.initial, PassReport { tried: 3, failed: 0 });
        assert!(text.contains("Test number 1 (B) is bypassed."));
        assert!(text.contains("Tried 3 tests, 0 fails."));
    }

    #[test]
    fn failing_test_is_reported_and_fails_the_run() {
        let registry = Registry::new(vec![
            passing("A"),
            passing("B"),
            failing("C"),
            passing("D"),
        ]);
        let directives = Directives {
            excluded: vec!["B".to_string()],
            ..Directives::default()
        };

        let (verdict, text) = run(&registry, &directives, false);
        assert!(verdict.overall_failed);
        assert_eq!(verdict.initial, PassReport { tried: 3, failed: 1 });
        assert!(text.contains("Tried 3 tests, 1 fail."));
        assert!(text.contains("Failed test(s): C "));
    }

    #[test]
    fn exclusive_mode_without_names_tries_nothing() {
        let registry = Registry::new(vec![passing("a"), passing("b")]);
        let directives = Directives {
            modes: ModeRequests {
                stress_minutes: Some(2),
                ..ModeRequests::default()
            },
            ..Directives::default()
        };

        let (verdict, text) = run(&registry, &directives, false);
        assert!(!verdict.overall_failed);
        assert_eq!(verdict.initial, PassReport::default());
        // Blanket exclusions produce no bypass notices.
        assert!(!text.contains("bypassed"));
    }

    #[test]
    fn exclusive_mode_with_explicit_name_runs_only_that_test() {
        let registry = Registry::new(vec![passing("a"), passing("b"), passing("c")]);
        let directives = Directives {
            allow_list: vec!["c".to_string()],
            modes: ModeRequests {
                cf_fuzz_rounds: Some(1),
                ..ModeRequests::default()
            },
            ..Directives::default()
        };

        let (verdict, text) = run(&registry, &directives, false);
        assert_eq!(verdict.initial, PassReport { tried: 1, failed: 0 });
        assert!(text.contains("Starting test number 2, c"));
        assert!(!text.contains("Starting test number 0"));
    }

    #[test]
    fn retry_requires_suspended_diagnostics() {
        let invocations = Rc::new(Cell::new(0));
        let registry = Registry::new(vec![flaky("a", Rc::clone(&invocations), 1)]);
        let directives = Directives {
            retry_failed: true,
            ..Directives::default()
        };

        // Diagnostics were never suspended: no retry pass.
        let (verdict, text) = run(&registry, &directives, false);
        assert!(verdict.overall_failed);
        assert_eq!(invocations.get(), 1);
        assert!(!text.contains("Retrying"));
    }

    #[test]
    fn eligible_retry_recovers_the_run() {
        let invocations = Rc::new(Cell::new(0));
        let registry = Registry::new(vec![flaky("a", Rc::clone(&invocations), 1)]);
        let directives = Directives {
            disable_debug: true,
            retry_failed: true,
            ..Directives::default()
        };

        let (verdict, text) = run(&registry, &directives, true);
        assert!(!verdict.overall_failed);
        assert_eq!(invocations.get(), 2);
        assert!(text.contains("Tried 1 tests, 1 fail."));
        assert!(text.contains("Retrying a:"));
        assert!(text.contains("All tests pass after second try."));
    }
}
