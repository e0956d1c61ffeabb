//! Month-Links main entry point
//!
//! This is the command-line interface for the Month-Links harvester.

use anyhow::Context;
use clap::Parser;
use month_links::config::{load_config_with_hash, validate, Config};
use month_links::crawler::{run_crawl, CrawlReport};
use month_links::months::{MonthMatcher, MonthSpec};
use month_links::output::{finish_run, TextFileSink};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Month-Links: a single-domain link harvester
///
/// Crawls one website breadth-first, collects every internal link, and saves
/// those that point at the target months (January, February, March,
/// November, December) to a text file.
#[derive(Parser, Debug)]
#[command(name = "month-links")]
#[command(version = "1.0.0")]
#[command(about = "Harvest same-site links that point at target months", long_about = None)]
struct Cli {
    /// Site to crawl (overrides base-url from the config file)
    #[arg(value_name = "BASE_URL")]
    base_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the filtered links
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Pause between fetch attempts, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Extra attempts for network errors and 5xx responses
    #[arg(long, value_name = "N")]
    max_retries: Option<u32>,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Filter and save the links found so far when interrupted
    #[arg(long)]
    save_partial: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The config file may name the log file, so it is read before logging starts
    let loaded = match cli.config.as_deref() {
        Some(path) => load_config_with_hash(path)
            .map(Some)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(None),
    };

    let log_file = cli.log_file.clone().or_else(|| match &loaded {
        Ok(Some((config, _))) => config.output.log_file.as_ref().map(PathBuf::from),
        _ => None,
    });

    if let Err(e) = setup_logging(cli.verbose, cli.quiet, log_file.as_deref()) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    let result = match loaded {
        Ok(loaded) => run(cli, loaded).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// The optional log file receives the same events as the console, without
/// ANSI colors.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("month_links=info,warn"),
            1 => EnvFilter::new("month_links=debug,info"),
            2 => EnvFilter::new("month_links=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Runs one harvest: crawl, filter, persist, report
async fn run(cli: Cli, loaded: Option<(Config, String)>) -> anyhow::Result<()> {
    let mut config = match loaded {
        Some((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    // Compile the month patterns before any network activity
    let matcher = MonthMatcher::new(MonthSpec::from_entries(&config.months))
        .context("Invalid month configuration")?;

    tracing::info!("Starting crawl of {}", config.crawler.base_url);
    tracing::info!(
        "Delay {}ms, timeout {}s, output {}",
        config.crawler.delay_ms,
        config.crawler.timeout_secs,
        config.output.path
    );

    let report = run_crawl(&config, shutdown_signal())
        .await
        .context("Failed to start crawl")?;

    log_crawl_outcome(&report);

    let sink = TextFileSink::new(&config.output.path);
    if finish_run(
        &report,
        &matcher,
        &sink,
        cli.save_partial,
        config.output.sample_size,
    )
    .is_none()
    {
        tracing::debug!("Run finished without writing {}", config.output.path);
    }

    Ok(())
}

/// Applies command-line values on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = base_url.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.crawler.timeout_secs = timeout_secs;
    }
    if let Some(max_retries) = cli.max_retries {
        config.crawler.max_retries = max_retries;
    }
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::warn!("Interrupt received, stopping crawl");
}

fn log_crawl_outcome(report: &CrawlReport) {
    if report.interrupted {
        tracing::warn!(
            "Crawl interrupted after {} pages ({} links found)",
            report.pages_visited,
            report.discovered.len()
        );
    } else {
        tracing::info!(
            "Crawl finished in {}s: {} pages visited, {} failed",
            report.duration_seconds(),
            report.pages_visited,
            report.pages_failed
        );
    }
}
