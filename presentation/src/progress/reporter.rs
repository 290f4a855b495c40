//! Progress reporting for enumeration runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use scout_application::{EnumerationProgress, NoProgress, SourceReport};
use std::sync::{Arc, Mutex};

/// Reports source completion on a progress bar (stderr)
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn run_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn status(report: &SourceReport) -> String {
        let mark = if report.errors == 0 {
            "v".green()
        } else {
            "x".red()
        };
        format!(
            "{} {} ({} in {:.1}s)",
            mark,
            report.source,
            report.subdomains,
            report.elapsed.as_secs_f64()
        )
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EnumerationProgress for ProgressReporter {
    fn on_run_start(&self, domain: &str, total_sources: usize) {
        let pb = ProgressBar::new(total_sources as u64);
        pb.set_style(Self::run_style());
        pb.set_prefix(domain.to_string());
        pb.set_message("Starting...");
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        *self.bar.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
    }

    fn on_source_complete(&self, report: &SourceReport) {
        if let Some(pb) = self.bar.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            pb.set_message(Self::status(report));
            pb.inc(1);
        }
    }

    fn on_run_complete(&self, _domain: &str) {
        if let Some(pb) = self.bar.lock().unwrap_or_else(|e| e.into_inner()).take() {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI), one line per source on stderr
pub struct SimpleProgress;

impl EnumerationProgress for SimpleProgress {
    fn on_run_start(&self, domain: &str, total_sources: usize) {
        eprintln!(
            "{} {} ({} sources)",
            "->".cyan(),
            domain.bold(),
            total_sources
        );
    }

    fn on_source_complete(&self, report: &SourceReport) {
        eprintln!("  {}", ProgressReporter::status(report));
    }

    fn on_run_complete(&self, _domain: &str) {}
}

/// Which progress display a run gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Hidden,
    /// indicatif bar, for an interactive stderr
    Bar,
    /// [`SimpleProgress`] lines, for a piped stderr
    Lines,
}

impl ProgressMode {
    /// Piped stderr only gets progress lines when `-v` was given
    pub fn choose(quiet: bool, stderr_is_terminal: bool, verbose: u8) -> Self {
        if quiet {
            ProgressMode::Hidden
        } else if stderr_is_terminal {
            ProgressMode::Bar
        } else if verbose > 0 {
            ProgressMode::Lines
        } else {
            ProgressMode::Hidden
        }
    }

    /// A fresh reporter for one run
    pub fn reporter(self) -> Arc<dyn EnumerationProgress> {
        match self {
            ProgressMode::Hidden => Arc::new(NoProgress),
            ProgressMode::Bar => Arc::new(ProgressReporter::new()),
            ProgressMode::Lines => Arc::new(SimpleProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn report(errors: usize) -> SourceReport {
        SourceReport {
            source: "crtsh".to_string(),
            elapsed: Duration::from_millis(2300),
            subdomains: 41,
            errors,
        }
    }

    #[test]
    fn test_status_line() {
        colored::control::set_override(false);
        assert_eq!(ProgressReporter::status(&report(0)), "v crtsh (41 in 2.3s)");
        assert_eq!(ProgressReporter::status(&report(1)), "x crtsh (41 in 2.3s)");
    }

    #[test]
    fn test_bar_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_run_start("example.com", 2);
        reporter.on_source_complete(&report(0));
        assert_eq!(
            reporter.bar.lock().unwrap().as_ref().map(|pb| pb.position()),
            Some(1)
        );
        reporter.on_run_complete("example.com");
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(ProgressMode::choose(true, true, 2), ProgressMode::Hidden);
        assert_eq!(ProgressMode::choose(false, true, 0), ProgressMode::Bar);
        assert_eq!(ProgressMode::choose(false, false, 1), ProgressMode::Lines);
        assert_eq!(ProgressMode::choose(false, false, 0), ProgressMode::Hidden);
    }

    #[test]
    fn test_simple_progress_reports_every_event() {
        let progress = ProgressMode::Lines.reporter();
        progress.on_run_start("example.com", 1);
        progress.on_source_complete(&report(0));
        progress.on_run_complete("example.com");
    }

    #[test]
    fn test_complete_without_start_is_noop() {
        let reporter = ProgressReporter::new();
        reporter.on_source_complete(&report(0));
        reporter.on_run_complete("example.com");
    }
}
