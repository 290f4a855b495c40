//! Console rendering for source listings and run summaries

use colored::Colorize;
use scout_domain::SourceInfo;
use std::time::Duration;

use super::writer::WriteSummary;

/// Formats non-result console output
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Table of every registered source and its capability flags
    pub fn source_list(infos: &[SourceInfo]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!(
            "Available sources ({})",
            infos.len()
        )));
        output.push('\n');

        let width = infos.iter().map(|i| i.name.len()).max().unwrap_or(0);

        for info in infos {
            let mut flags = Vec::new();
            if info.is_default {
                flags.push("default".green().to_string());
            }
            if info.has_recursive_support {
                flags.push("recursive".cyan().to_string());
            }
            if info.needs_key {
                flags.push("key".yellow().to_string());
            }

            output.push_str(&format!(
                "  {:<width$}  {}\n",
                info.name,
                flags.join(", "),
                width = width
            ));
        }

        output.push_str(&format!(
            "\n{} default sources run when no -s/--all is given; {} sources need an API key.\n",
            "default:".green(),
            "key:".yellow()
        ));

        output
    }

    /// One-line summary printed after each domain
    pub fn run_summary(domain: &str, summary: &WriteSummary, elapsed: Duration) -> String {
        let mut line = format!(
            "{} Found {} subdomains for {} in {:.1}s",
            "->".cyan(),
            summary.unique.to_string().bold(),
            domain.bold(),
            elapsed.as_secs_f64()
        );
        if summary.errors > 0 {
            line.push_str(&format!(
                " ({})",
                format!("{} source errors", summary.errors).yellow()
            ));
        }
        line
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(title.len() + 4);
        format!("{}\n  {}\n{}", line.blue(), title.bold(), line.blue())
    }
}
