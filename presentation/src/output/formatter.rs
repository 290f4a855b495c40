//! Output formatters for enumeration results

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use serde::Serialize;

/// Trait for rendering one result line
pub trait OutputFormatter: Send + Sync {
    /// Render a discovered hostname for `input` (the enumerated domain)
    fn format_subdomain(&self, input: &str, host: &str, source: &str) -> String;

    /// Render an error reported by `source`
    fn format_error(&self, input: &str, source: &str, error: &str) -> String;
}

/// Bare hostnames, errors in red
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_subdomain(&self, _input: &str, host: &str, _source: &str) -> String {
        host.to_string()
    }

    fn format_error(&self, _input: &str, source: &str, error: &str) -> String {
        format!("{} {}", format!("[{}]", source).red().bold(), error)
    }
}

#[derive(Serialize)]
struct HostLine<'a> {
    host: &'a str,
    input: &'a str,
    source: &'a str,
}

#[derive(Serialize)]
struct ErrorLine<'a> {
    input: &'a str,
    source: &'a str,
    error: &'a str,
}

/// JSON lines
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_subdomain(&self, input: &str, host: &str, source: &str) -> String {
        serde_json::to_string(&HostLine {
            host,
            input,
            source,
        })
        .unwrap_or_default()
    }

    fn format_error(&self, input: &str, source: &str, error: &str) -> String {
        serde_json::to_string(&ErrorLine {
            input,
            source,
            error,
        })
        .unwrap_or_default()
    }
}

/// Formatter for the chosen output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Plain => Box::new(PlainFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
