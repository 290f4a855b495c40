//! Per-domain result writer
//!
//! Sources overlap heavily, so the raw result stream carries many repeats.
//! [`ResultWriter`] keeps the first sighting of each hostname per domain
//! and drops the rest; error results are printed only when asked for.

use std::collections::HashSet;
use std::io::{self, Write};

use scout_domain::ScrapeResult;

use super::formatter::OutputFormatter;

/// Counters for one domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub unique: usize,
    pub duplicates: usize,
    pub errors: usize,
}

/// Writes the results of one domain to `out`
pub struct ResultWriter<'a, W: Write> {
    out: W,
    formatter: &'a dyn OutputFormatter,
    input: String,
    collect_errors: bool,
    seen: HashSet<String>,
    summary: WriteSummary,
}

impl<'a, W: Write> ResultWriter<'a, W> {
    pub fn new(out: W, formatter: &'a dyn OutputFormatter, input: &str) -> Self {
        Self {
            out,
            formatter,
            input: input.to_string(),
            collect_errors: false,
            seen: HashSet::new(),
            summary: WriteSummary::default(),
        }
    }

    pub fn with_collect_errors(mut self, collect_errors: bool) -> Self {
        self.collect_errors = collect_errors;
        self
    }

    pub fn write(&mut self, result: &ScrapeResult) -> io::Result<()> {
        match result {
            ScrapeResult::Subdomain { source, value } => {
                let host = value.trim().to_lowercase();
                if host.is_empty() || !self.seen.insert(host.clone()) {
                    self.summary.duplicates += 1;
                    return Ok(());
                }
                self.summary.unique += 1;
                let line = self.formatter.format_subdomain(&self.input, &host, source);
                writeln!(self.out, "{}", line)
            }
            ScrapeResult::Error { source, error } => {
                self.summary.errors += 1;
                if !self.collect_errors {
                    return Ok(());
                }
                let line = self.formatter.format_error(&self.input, source, error);
                writeln!(self.out, "{}", line)
            }
        }
    }

    /// Flush and hand back the counters
    pub fn finish(mut self) -> io::Result<WriteSummary> {
        self.out.flush()?;
        Ok(self.summary)
    }
}
