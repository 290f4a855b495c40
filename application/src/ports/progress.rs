//! Progress notification port
//!
//! Defines the interface for observing an enumeration run while it executes.

use std::time::Duration;

/// Summary of one source's contribution to a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,
    pub elapsed: Duration,
    pub subdomains: usize,
    pub errors: usize,
}

/// Callback for progress updates during an enumeration run
///
/// Implementations live in the presentation layer. Callbacks fire from the
/// agent's worker tasks, possibly concurrently.
pub trait EnumerationProgress: Send + Sync {
    /// Called once the session is up and sources are about to start
    fn on_run_start(&self, domain: &str, total_sources: usize);

    /// Called when a source's stream has closed
    fn on_source_complete(&self, report: &SourceReport);

    /// Called after every source finished
    fn on_run_complete(&self, domain: &str);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl EnumerationProgress for NoProgress {
    fn on_run_start(&self, _domain: &str, _total_sources: usize) {}
    fn on_source_complete(&self, _report: &SourceReport) {}
    fn on_run_complete(&self, _domain: &str) {}
}
