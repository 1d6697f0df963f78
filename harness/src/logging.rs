//! Diagnostic output lifecycle.
//!
//! Diagnostics default to enabled, may be suspended for the initial
//! pass (`--disable-debug`), and are resumed unconditionally before a
//! retry pass. Once resumed they stay on for the rest of the process.
//! The toggle is carried as an explicit [`Diagnostics`] value instead
//! of ambient global state so the orchestration stays testable.

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt, reload};

/// Handle on the process-wide diagnostic filter.
pub struct Diagnostics {
    suspended: bool,
    handle: Option<reload::Handle<EnvFilter, Registry>>,
}

/// Install the tracing subscriber and return its diagnostics handle.
///
/// Reads `RUST_LOG`, defaulting to `debug` (diagnostics are on unless
/// suspended). Output goes to stderr in compact format. Must be called
/// once per process.
pub fn init(suspend_debug: bool) -> Diagnostics {
    let initial = if suspend_debug {
        EnvFilter::new("error")
    } else {
        default_filter()
    };
    let (filter, handle) = reload::Layer::new(initial);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();

    Diagnostics {
        suspended: suspend_debug,
        handle: Some(handle),
    }
}

impl Diagnostics {
    /// A handle that tracks the suspended flag without touching any
    /// subscriber. For tests that drive the orchestration directly.
    pub fn detached(suspended: bool) -> Self {
        Self {
            suspended,
            handle: None,
        }
    }

    /// Whether diagnostics were suppressed for the initial pass.
    pub fn suspended(&self) -> bool {
        self.suspended
    }

    /// Re-enable diagnostic output for the remainder of the process.
    /// Idempotent; there is no way back to the suspended state.
    pub fn resume(&mut self) -> Result<()> {
        if !self.suspended {
            return Ok(());
        }
        if let Some(handle) = &self.handle {
            handle
                .reload(default_filter())
                .context("reload diagnostics filter")?;
        }
        self.suspended = false;
        Ok(())
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
}
