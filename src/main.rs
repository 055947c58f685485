//! Link-Sweeper main entry point
//!
//! This is the command-line interface for the Link-Sweeper broken-link crawler.

use anyhow::Context;
use clap::Parser;
use link_sweeper::config::{load_config_with_hash, Config};
use link_sweeper::crawler::crawl;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Link-Sweeper: a resumable broken-link crawler
///
/// Link-Sweeper crawls every page under a URL prefix, checks each link it
/// finds, and appends the results to a CSV report. Progress is saved after
/// every page, so an interrupted crawl picks up where it stopped.
#[derive(Parser, Debug)]
#[command(name = "link-sweeper")]
#[command(version)]
#[command(about = "A resumable broken-link crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Start a fresh crawl, discarding saved progress (the report is kept)
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["stats", "fresh"])]
    dry_run: bool,

    /// Show checkpoint and report statistics and exit
    #[arg(long, conflicts_with_all = ["dry_run", "fresh"])]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::debug!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config, &config_hash)?;
    } else {
        handle_crawl(config, &config_hash, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_sweeper=info,warn"),
            1 => EnvFilter::new("link_sweeper=debug,info"),
            2 => EnvFilter::new("link_sweeper=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Link-Sweeper Dry Run ===\n");

    println!("Crawl:");
    println!("  Start URL: {}", config.crawl.start_url);
    println!("  Scope prefix: {}", config.crawl.scope_prefix);
    println!(
        "  Max concurrent checks: {}",
        config.crawl.max_concurrent_checks
    );
    println!("  Persist menu links: {}", config.crawl.persist_menu_links);

    println!(
        "\nExcluded Prefixes ({}):",
        config.crawl.exclude_prefixes.len()
    );
    for prefix in &config.crawl.exclude_prefixes {
        println!("  - {}", prefix);
    }

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  User agent: {}", config.http.user_agent);

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);
    println!("  State: {}", config.output.state_path);
    println!("  Only broken links: {}", config.output.record_only_broken);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling at {}", config.crawl.start_url);
}

/// Handles the --stats mode: shows the saved checkpoint and report tallies
fn handle_stats(config: &Config, config_hash: &str) -> anyhow::Result<()> {
    use link_sweeper::output::{print_report_tally, tally_report};
    use link_sweeper::storage::{open_state_store, StateStore};

    let state_path = Path::new(&config.output.state_path);
    println!("State: {}\n", state_path.display());

    if state_path.exists() {
        let store = open_state_store(state_path)
            .with_context(|| format!("Failed to open state {}", state_path.display()))?;

        match store.metadata()? {
            Some(meta) => {
                println!("Checkpoints written:  {}", meta.checkpoint_count);
                println!("Last checkpoint:      {}", meta.saved_at.to_rfc3339());
                if meta.config_hash != config_hash {
                    println!("  (written under a different configuration)");
                }
            }
            None => println!("No checkpoint saved yet"),
        }

        let state = store.load_state()?;
        println!("Pages visited:        {}", state.visited().len());
        println!("Pages in frontier:    {}", state.frontier().len());
        if state.is_complete() && !state.is_fresh() {
            println!("  (crawl complete)");
        }
    } else {
        println!("No state saved yet");
    }

    println!();
    let report_path = Path::new(&config.output.report_path);
    let tally = tally_report(report_path)
        .with_context(|| format!("Failed to read report {}", report_path.display()))?;
    print_report_tally(report_path, &tally);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, config_hash: &str, fresh: bool) -> anyhow::Result<()> {
    use link_sweeper::output::print_statistics;

    if fresh {
        tracing::info!("Starting fresh crawl (ignoring previous state)");
    } else {
        tracing::info!("Starting crawl (will resume if interrupted run exists)");
    }
    tracing::info!(
        "Start URL: {}, scope: {}",
        config.crawl.start_url,
        config.crawl.scope_prefix
    );

    let report_path = config.output.report_path.clone();
    let stats = match crawl(config, config_hash, fresh).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    println!();
    print_statistics(&stats);
    println!("\n✓ Report written to: {}", report_path);

    Ok(())
}
