//! CLI entrypoint for subscout
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use scout_application::PassiveAgent;
use scout_domain::{EnumerationOptions, SourceSelection, TargetDomain};
use scout_infrastructure::{ConfigLoader, FileConfig, HttpSessionFactory, default_registry};
use scout_presentation::{
    Cli, ConsoleFormatter, ProgressMode, ResultWriter, formatter_for,
};
use std::io::{self, BufRead, IsTerminal};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; stdout is reserved for results
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?
    };
    config.validate().context("invalid configuration")?;

    let options = enumeration_options(&cli, &config);
    options.validate()?;
    let selection = source_selection(&cli, &config);

    // === Dependency Injection ===
    let registry = default_registry(&config.api_keys());

    if cli.list_sources {
        print!("{}", ConsoleFormatter::source_list(&registry.infos()));
        return Ok(());
    }

    let domains = read_domains(&cli)?;
    if domains.is_empty() {
        bail!("No domain given. Use -d <DOMAIN> or pipe domains on stdin.");
    }

    let agent = PassiveAgent::new(Arc::new(HttpSessionFactory::new()), &registry, &selection);
    if agent.sources().is_empty() {
        bail!("No sources selected. Use --list-sources to see what is available.");
    }
    info!(
        "Starting subscout with {} sources: {}",
        agent.sources().len(),
        agent.source_names().join(", ")
    );

    let formatter = formatter_for(cli.output);
    let progress_mode = ProgressMode::choose(cli.quiet, io::stderr().is_terminal(), cli.verbose);

    for domain in &domains {
        let progress = progress_mode.reporter();

        let started = Instant::now();
        let mut stream = agent.enumerate_with_progress(domain.as_str(), &options, progress);

        let stdout = io::stdout();
        let mut writer = ResultWriter::new(stdout.lock(), formatter.as_ref(), domain.as_str())
            .with_collect_errors(cli.collect_errors);

        while let Some(result) = stream.next().await {
            writer.write(&result)?;
        }
        let summary = writer.finish()?;

        if !cli.quiet {
            eprintln!(
                "{}",
                ConsoleFormatter::run_summary(domain.as_str(), &summary, started.elapsed())
            );
        }
    }

    Ok(())
}

/// File values with CLI flags layered on top
fn enumeration_options(cli: &Cli, config: &FileConfig) -> EnumerationOptions {
    let mut options = config.enumeration_options();

    if let Some(proxy) = &cli.proxy {
        options = options.with_proxy(proxy.as_str());
    }
    if let Some(rate_limit) = cli.rate_limit {
        options = options.with_rate_limit(rate_limit);
    }
    if let Some(timeout) = cli.timeout {
        options = options.with_timeout_secs(timeout);
    }
    if let Some(minutes) = cli.max_time {
        options = options.with_max_enum_time(Duration::from_secs(minutes.saturating_mul(60)));
    }

    options
}

fn source_selection(cli: &Cli, config: &FileConfig) -> SourceSelection {
    let mut selection = config.selection();

    if !cli.sources.is_empty() {
        selection = selection.with_sources(&cli.sources);
    }
    if !cli.exclude_sources.is_empty() {
        selection = selection.with_excluded(&cli.exclude_sources);
    }
    if cli.all {
        selection = selection.with_all(true);
    }
    if cli.recursive {
        selection = selection.with_recursive_only(true);
    }

    selection
}

/// Domains from `-d`, or stdin when none were given and stdin is piped
fn read_domains(cli: &Cli) -> Result<Vec<TargetDomain>> {
    let raw: Vec<String> = if !cli.domain.is_empty() {
        cli.domain.clone()
    } else if !io::stdin().is_terminal() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<_>>()
            .context("failed to read domains from stdin")?
    } else {
        Vec::new()
    };

    let mut domains: Vec<TargetDomain> = Vec::new();
    for line in raw.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        match TargetDomain::parse(line) {
            Ok(domain) if !domains.contains(&domain) => domains.push(domain),
            Ok(_) => {}
            Err(e) => warn!("Skipping '{}': {}", line, e),
        }
    }
    Ok(domains)
}
