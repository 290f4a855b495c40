//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for discovered subdomains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One hostname per line
    #[default]
    Plain,
    /// One JSON object per line (`host`, `input`, `source`)
    Json,
}

/// CLI arguments for subscout
#[derive(Parser, Debug)]
#[command(name = "subscout")]
#[command(author, version, about = "Passive subdomain enumeration")]
#[command(long_about = r#"
subscout queries passive online sources (certificate transparency logs,
passive DNS archives, web archives) for subdomains of the given domains.
Sources run in parallel under one rate limit and one deadline per domain.

Domains come from -d or, when none is given, from stdin (one per line).

Configuration files are loaded from (in priority order):
1. SUBSCOUT_* environment variables
2. --config <path>     Explicit config file
3. ./subscout.toml     Project-level config
4. ~/.config/subscout/config.toml   Global config

Example:
  subscout -d example.com
  subscout -d example.com -s crtsh,hackertarget -o json
  cat domains.txt | subscout --all -e waybackarchive
"#)]
pub struct Cli {
    /// Domain to enumerate (can be specified multiple times)
    #[arg(short, long, value_name = "DOMAIN")]
    pub domain: Vec<String>,

    /// Sources to use, comma separated
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Sources to skip, comma separated
    #[arg(short, long = "exclude-sources", value_name = "NAMES", value_delimiter = ',')]
    pub exclude_sources: Vec<String>,

    /// Use every source, not just the defaults
    #[arg(long)]
    pub all: bool,

    /// Only use sources suited to recursive enumeration
    #[arg(long)]
    pub recursive: bool,

    /// List available sources and exit
    #[arg(long)]
    pub list_sources: bool,

    /// HTTP proxy for every request
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Maximum requests per second across all sources (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub rate_limit: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Time limit per domain in minutes
    #[arg(long, value_name = "MINUTES")]
    pub max_time: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Also print errors reported by sources
    #[arg(long)]
    pub collect_errors: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_typical_invocation() {
        let cli = Cli::parse_from([
            "subscout",
            "-d",
            "example.com",
            "-d",
            "example.org",
            "-s",
            "crtsh,chaos",
            "-e",
            "anubis",
            "--rate-limit",
            "5",
            "-o",
            "json",
            "-vv",
        ]);

        assert_eq!(cli.domain, vec!["example.com", "example.org"]);
        assert_eq!(cli.sources, vec!["crtsh", "chaos"]);
        assert_eq!(cli.exclude_sources, vec!["anubis"]);
        assert_eq!(cli.rate_limit, Some(5));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.all);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["subscout"]);
        assert!(cli.domain.is_empty());
        assert_eq!(cli.output, OutputFormat::Plain);
        assert!(cli.timeout.is_none());
        assert!(cli.max_time.is_none());
        assert!(!cli.collect_errors);
    }
}
