//! Parsed command directives consumed by the selection resolver.
//!
//! Argument tokenizing lives in the CLI layer; this is the already
//! parsed shape the core operates on.

/// Inclusive index range gating which tests are actually invoked.
///
/// The range is not a status mutation: it is evaluated per index at
/// execution time, AND-ed with the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub first: usize,
    pub last: usize,
}

impl IndexRange {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }
}

impl Default for IndexRange {
    fn default() -> Self {
        Self {
            first: 0,
            last: usize::MAX,
        }
    }
}

/// Exclusive-mode requests with the parameters they were invoked with.
///
/// The parameters are consumed by external stress/fuzz runners, not by
/// the orchestration core; here a present request only gates selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeRequests {
    /// Run stress for this many minutes.
    pub stress_minutes: Option<u32>,
    /// Run fuzz for this many minutes.
    pub fuzz_minutes: Option<u32>,
    /// Connection stress: minutes and connection count.
    pub cnx_stress: Option<(u32, u32)>,
    /// Connection ddos: packet count, interval in usec, log directory.
    pub cnx_ddos: Option<CnxDdosRequest>,
    /// Corrupt-file fuzzer rounds.
    pub cf_fuzz_rounds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnxDdosRequest {
    pub packets: u32,
    pub interval_usec: u32,
    pub log_dir: String,
}

impl ModeRequests {
    /// True when any exclusive mode was requested, which by default
    /// suppresses every registry test.
    pub fn exclusive(&self) -> bool {
        self.stress_minutes.is_some()
            || self.fuzz_minutes.is_some()
            || self.cnx_stress.is_some()
            || self.cnx_ddos.is_some()
            || self.cf_fuzz_rounds.is_some()
    }
}

/// The full directive set for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// Tests to mark `Excluded` by name.
    pub excluded: Vec<String>,
    /// Trailing allow-list: when non-empty, everything not named here
    /// is excluded.
    pub allow_list: Vec<String>,
    /// Index range gate, applied at execution time.
    pub range: IndexRange,
    pub modes: ModeRequests,
    /// Suppress diagnostic output for the initial pass.
    pub disable_debug: bool,
    /// Re-run failed tests with diagnostics re-enabled.
    pub retry_failed: bool,
}
