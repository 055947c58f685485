//! Crawler module for page fetching and link checking
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with error classification
//! - HTML parsing and link extraction
//! - Link verification with a per-run verdict cache
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod parser;
mod verifier;

pub use coordinator::Coordinator;
pub use extractor::{extract_body_links, extract_menu_links, PageLink};
pub use fetcher::{build_http_client, fetch_page, fetch_status, FetchError, FetchOutcome};
pub use parser::{parse_all_links, parse_menu_links};
pub use verifier::{check_link, verify_all, LinkStatus, Verdict, VerdictCache};

use crate::config::Config;
use crate::output::{CrawlStatistics, CsvReport};
use crate::storage::{open_state_store, StateStore};
use crate::SweepError;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the state store and the report
/// 2. Drop any saved progress if `fresh` is set
/// 3. Run the coordinator until the frontier is empty
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `config_hash` - Hash of the configuration file, stored with each checkpoint
/// * `fresh` - Ignore previous state and start over
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed
/// * `Err(SweepError)` - State or report I/O failed
pub async fn crawl(
    config: Config,
    config_hash: &str,
    fresh: bool,
) -> Result<CrawlStatistics, SweepError> {
    let mut store = open_state_store(Path::new(&config.output.state_path))?;
    if fresh {
        tracing::info!("Clearing saved state in {}", config.output.state_path);
        store.clear()?;
    }

    let report = CsvReport::open(
        Path::new(&config.output.report_path),
        config.output.record_only_broken,
    )?;

    let mut coordinator = Coordinator::new(config, config_hash, store, report)?;
    coordinator.run().await
}
