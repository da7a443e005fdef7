//! contact-crawler main entry point
//!
//! This is the command-line interface for the single-domain contact crawler.

use anyhow::Context;
use clap::Parser;
use contact_crawler::config::{load_config_with_hash, validate, Config};
use contact_crawler::crawler::run_crawl;
use contact_crawler::output::print_statistics;
use contact_crawler::url::{extract_domain, parse_seed_url};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// contact-crawler: harvest company contacts from a single website
///
/// Crawls every page on the seed URL's host, collects organization names,
/// phone numbers and e-mail addresses, and writes them to a CSV file.
/// Press Ctrl+C at any time to stop and save what has been collected.
#[derive(Parser, Debug)]
#[command(name = "contact-crawler")]
#[command(version)]
#[command(about = "A single-domain contact harvester", long_about = None)]
struct Cli {
    /// URL to start crawling from (prompted for when omitted)
    #[arg(value_name = "SEED_URL")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// CSV file to write (overrides the config file)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Maximum number of pages to visit (overrides the config file)
    #[arg(long)]
    max_pages: Option<usize>,

    /// Delay between requests in milliseconds (overrides the config file)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seed, show what would be crawled, and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    let raw_seed = match &cli.seed {
        Some(seed) => seed.clone(),
        None => prompt_for_seed()?,
    };
    let seed = parse_seed_url(&raw_seed)
        .with_context(|| format!("Invalid seed URL '{}'", raw_seed.trim()))?;

    if cli.dry_run {
        handle_dry_run(&config, &seed);
        return Ok(());
    }

    tracing::info!("Starting crawl from {}", seed);
    match run_crawl(config, seed).await {
        Ok(summary) => {
            tracing::info!(
                "Finished ({}). {} records saved",
                summary.stop_reason,
                summary.records_written
            );
            if !cli.quiet {
                print_statistics(&summary.statistics);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("contact_crawler=info,warn"),
            1 => EnvFilter::new("contact_crawler=debug,info"),
            2 => EnvFilter::new("contact_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies command-line overrides and validates the result
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Reads the seed URL interactively from stdin
fn prompt_for_seed() -> anyhow::Result<String> {
    print!("Enter URL: ");
    std::io::stdout().flush().context("Failed to write prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read seed URL from stdin")?;
    Ok(line)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, seed: &url::Url) {
    println!("=== contact-crawler Dry Run ===\n");

    println!("Seed: {}", seed);
    println!(
        "Target domain: {}",
        extract_domain(seed).unwrap_or_default()
    );

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Delay between requests: {}ms", config.crawler.delay_ms);
    println!(
        "  Timeouts: {}s request, {}s connect",
        config.crawler.request_timeout_secs, config.crawler.connect_timeout_secs
    );

    println!("\nExtractor:");
    println!("  Name selector: {}", config.extractor.name_selector);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}
