//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the crawl state and drives it through
//! `Init → MenuPass → CrawlLoop → Done`:
//! - Init loads the last checkpoint and seeds the frontier on a fresh run
//! - MenuPass (fresh runs only) verifies the start page's navigation links
//! - CrawlLoop visits frontier pages, verifies their links, enqueues new
//!   in-scope pages and checkpoints after every page
//! - Done reports the totals

use crate::config::Config;
use crate::crawler::extractor::{extract_body_links, extract_menu_links};
use crate::crawler::verifier::{verify_all, VerdictCache};
use crate::crawler::build_http_client;
use crate::output::{CrawlStatistics, LinkRecord, ReportSink};
use crate::state::CrawlState;
use crate::storage::StateStore;
use crate::url::{is_excluded, is_in_scope};
use crate::SweepError;
use reqwest::Client;
use std::collections::HashSet;

/// Main crawler coordinator structure
pub struct Coordinator<S: StateStore, R: ReportSink> {
    config: Config,
    config_hash: String,
    client: Client,
    store: S,
    report: R,
    cache: VerdictCache,
    menu_links: HashSet<String>,
    stats: CrawlStatistics,
    visit_log: Vec<String>,
}

impl<S: StateStore, R: ReportSink> Coordinator<S, R> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `config_hash` - Hash of the configuration, stored with each checkpoint
    /// * `store` - Where crawl progress is checkpointed
    /// * `report` - Where link records are written
    pub fn new(
        config: Config,
        config_hash: impl Into<String>,
        store: S,
        report: R,
    ) -> Result<Self, SweepError> {
        let client = build_http_client(&config.http)?;
        Ok(Self::with_client(config, config_hash, store, report, client))
    }

    /// Creates a coordinator around an existing HTTP client
    pub fn with_client(
        config: Config,
        config_hash: impl Into<String>,
        store: S,
        report: R,
        client: Client,
    ) -> Self {
        Self {
            config,
            config_hash: config_hash.into(),
            client,
            store,
            report,
            cache: VerdictCache::new(),
            menu_links: HashSet::new(),
            stats: CrawlStatistics::new(),
            visit_log: Vec::new(),
        }
    }

    /// Statistics of the current run
    pub fn stats(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Pages visited during this run, in visiting order
    pub fn visit_log(&self) -> &[String] {
        &self.visit_log
    }

    /// Runs the crawl until the frontier is empty
    ///
    /// Network failures never abort the crawl. Errors returned from here are
    /// checkpoint or report I/O failures; the last successful checkpoint
    /// stays valid for the next run.
    pub async fn run(&mut self) -> Result<CrawlStatistics, SweepError> {
        let mut state = self.init()?;

        if state.is_fresh() {
            self.menu_pass(&mut state).await?;
        } else {
            tracing::info!(
                "Resuming crawl: {} pages visited, {} in frontier",
                state.visited().len(),
                state.frontier().len()
            );
            self.restore_menu_links(&mut state);
        }

        self.crawl_loop(&mut state).await?;

        tracing::info!(
            "Crawl complete: {} pages visited, {} working, {} broken",
            self.stats.pages_visited,
            self.stats.working,
            self.stats.broken
        );
        tracing::info!("Total number of links checked: {}", self.stats.links_checked);

        Ok(self.stats.clone())
    }

    /// Loads the last checkpoint and seeds the frontier if nothing was saved
    fn init(&self) -> Result<CrawlState, SweepError> {
        if let Some(meta) = self.store.metadata()? {
            if meta.config_hash != self.config_hash {
                tracing::warn!(
                    "Configuration changed since the last checkpoint ({}); resuming anyway",
                    meta.saved_at.to_rfc3339()
                );
            }
        }

        let mut state = self.store.load_state()?;
        if state.is_empty() {
            tracing::info!("No saved state, starting from {}", self.config.crawl.start_url);
            state.seed(&self.config.crawl.start_url);
        }
        Ok(state)
    }

    /// Applies the saved menu-link set on resume, or drops it
    ///
    /// Without `persist-menu-links`, links first checked as menu links can
    /// be checked and recorded again as body links after a resume.
    fn restore_menu_links(&mut self, state: &mut CrawlState) {
        if self.config.crawl.persist_menu_links {
            self.menu_links = state.menu_links().clone();
            tracing::debug!("Restored {} menu links", self.menu_links.len());
        } else {
            state.clear_menu_links();
            self.menu_links.clear();
        }
    }

    /// Verifies the navigation links of the start page
    async fn menu_pass(&mut self, state: &mut CrawlState) -> Result<(), SweepError> {
        let start_url = self.config.crawl.start_url.clone();
        let menu_links = extract_menu_links(&self.client, &start_url).await;
        tracing::info!("Found {} menu links on {}", menu_links.len(), start_url);

        let mut targets: Vec<String> = menu_links.iter().cloned().collect();
        targets.sort();
        let verdicts = verify_all(
            &self.client,
            &targets,
            &mut self.cache,
            self.config.crawl.max_concurrent_checks,
        )
        .await;

        self.report.write_header()?;
        for verdict in verdicts {
            tracing::info!(
                "{}: {} (found in menu on {})",
                verdict.status,
                verdict.url,
                start_url
            );
            self.stats.menu_links_checked += 1;
            self.stats.record(verdict.status);

            let record = LinkRecord::new(start_url.as_str(), verdict.url, verdict.status);
            if self.report.append(&record)? {
                self.stats.rows_written += 1;
            }
        }
        self.report.flush()?;

        if self.config.crawl.persist_menu_links {
            state.set_menu_links(menu_links.clone());
        }
        self.menu_links = menu_links;
        Ok(())
    }

    /// Visits frontier pages until none are left
    async fn crawl_loop(&mut self, state: &mut CrawlState) -> Result<(), SweepError> {
        while let Some(page) = state.pop_frontier() {
            if state.is_visited(&page) {
                tracing::debug!("Already visited, discarding {}", page);
                continue;
            }
            if !is_in_scope(&page, &self.config.crawl.scope_prefix) {
                tracing::debug!("Out of scope, discarding {}", page);
                continue;
            }

            state.mark_visited(&page);
            self.visit_log.push(page.clone());
            self.stats.pages_visited += 1;
            tracing::info!("Crawling and checking links on: {}", page);

            self.process_page(state, &page).await?;

            // Rows reach disk before the checkpoint that marks the page done
            self.report.flush()?;
            self.store.save_state(state, &self.config_hash)?;
            tracing::debug!(
                "Checkpoint saved: {} visited, {} in frontier",
                state.visited().len(),
                state.frontier().len()
            );
        }
        Ok(())
    }

    /// Verifies and records the body links of one page, enqueueing new in-scope pages
    async fn process_page(&mut self, state: &mut CrawlState, page: &str) -> Result<(), SweepError> {
        let links = extract_body_links(&self.client, page, &self.menu_links).await;

        let mut targets: Vec<String> = links
            .into_iter()
            .map(|link| link.target)
            .filter(|target| {
                let excluded = is_excluded(target, &self.config.crawl.exclude_prefixes);
                if excluded {
                    tracing::debug!("Excluded, skipping {}", target);
                }
                !excluded
            })
            .collect();
        targets.sort();

        let verdicts = verify_all(
            &self.client,
            &targets,
            &mut self.cache,
            self.config.crawl.max_concurrent_checks,
        )
        .await;

        for verdict in verdicts {
            self.stats.links_checked += 1;
            self.stats.record(verdict.status);
            if verdict.reused {
                self.stats.verdicts_reused += 1;
            }
            tracing::info!("{}: {} (found on {})", verdict.status, verdict.url, page);

            let record = LinkRecord::new(page, verdict.url.as_str(), verdict.status);
            if self.report.append(&record)? {
                self.stats.rows_written += 1;
            }

            if is_in_scope(&verdict.url, &self.config.crawl.scope_prefix)
                && state.enqueue(&verdict.url)
            {
                tracing::debug!("Queued {}", verdict.url);
            }
        }

        Ok(())
    }
}
