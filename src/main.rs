//! Reel-Harvest main entry point
//!
//! This is the command-line interface for the Reel-Harvest scraper.

use clap::Parser;
use reel_harvest::config::{load_config_with_hash, Config};
use reel_harvest::output::{print_batch_report, print_session_report};
use reel_harvest::scrape::{self, load_targets, RunSummary, ScrapeKind, ScrapeRequest, UrlBuilder};
use reel_harvest::storage::{artifact_key, JsonFileSink};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Reel-Harvest: an incremental filmography scraper
///
/// Walks paginated search or list pages, extracting movies or actors, and
/// rewrites a JSON artifact per target as records come in so an
/// interrupted crawl keeps what it has seen.
#[derive(Parser, Debug)]
#[command(name = "reel-harvest")]
#[command(version)]
#[command(about = "An incremental filmography scraper", long_about = None)]
struct Cli {
    /// Type of page to scrape: actormovies, manyactormovies or listactors
    #[arg(long = "scrape", value_name = "KIND")]
    kind: ScrapeKind,

    /// Id to scrape (an actor id like nm0000199, or a list id like ls000004615)
    #[arg(long)]
    id: Option<String>,

    /// File to get targets from, for manyactormovies: a JSON list of actors
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the first page URL and artifact path for each target without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let request = match ScrapeRequest::new(cli.kind, cli.id.as_deref(), cli.file.clone()) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Invalid arguments: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &request)?;
    } else {
        handle_scrape(&config, &request, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("reel_harvest=info,warn"),
            1 => EnvFilter::new("reel_harvest=debug,info"),
            2 => EnvFilter::new("reel_harvest=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be fetched and written
fn handle_dry_run(
    config: &Config,
    request: &ScrapeRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Reel-Harvest Dry Run ===\n");

    println!("Fetcher:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Allowed domains: {}", config.site.allowed_domains.join(", "));
    println!("  Accept-Language: {}", config.fetcher.accept_language);
    println!("  User agent: {}", config.fetcher.user_agent);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Writes: {:?}", config.output.persist);

    let urls = UrlBuilder::from_config(config)?;
    let sink = JsonFileSink::new(&config.output.directory);

    let (kind, targets) = match request {
        ScrapeRequest::Single { kind, target_id } => (*kind, vec![target_id.clone()]),
        ScrapeRequest::Batch { file } => {
            println!("  On failure: {:?}", config.batch.on_failure);
            (ScrapeKind::ManyActorMovies, load_targets(file)?)
        }
    };

    println!("\nTargets ({}):", targets.len());
    for target in &targets {
        println!("  - {}", target);
        println!("    first page: {}", urls.page_url(kind, target, 1)?);
        println!(
            "    artifact: {}",
            sink.path_for(&artifact_key(kind, target)).display()
        );
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(
    config: &Config,
    request: &ScrapeRequest,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match scrape::run(config, request).await {
        Ok(RunSummary::Single(report)) => {
            tracing::info!("Scrape completed successfully");
            if !quiet {
                print_session_report(&report);
            }
            Ok(())
        }
        Ok(RunSummary::Batch(report)) => {
            tracing::info!("Batch completed");
            if !quiet {
                print_batch_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
