//! Crawl progress: which pages were visited and which are still pending
//!
//! This is the only entity persisted between runs. All three sets hold
//! absolute URLs.

use std::collections::HashSet;

/// Visited pages, pending frontier and (optionally) the menu-link exclusion set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlState {
    visited: HashSet<String>,
    frontier: HashSet<String>,
    menu_links: HashSet<String>,
}

impl CrawlState {
    /// Creates an empty crawl state
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a crawl state from persisted sets
    pub fn from_parts(
        visited: HashSet<String>,
        frontier: HashSet<String>,
        menu_links: HashSet<String>,
    ) -> Self {
        Self {
            visited,
            frontier,
            menu_links,
        }
    }

    /// Returns true if nothing was ever saved (both visited and frontier empty)
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty() && self.frontier.is_empty()
    }

    /// Returns true if no page has been visited yet
    ///
    /// The menu pass runs only in this situation.
    pub fn is_fresh(&self) -> bool {
        self.visited.is_empty()
    }

    /// Returns true once the frontier has been drained
    pub fn is_complete(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Seeds the frontier with the start URL
    pub fn seed(&mut self, start_url: &str) {
        self.frontier.insert(start_url.to_string());
    }

    /// Removes and returns an arbitrary frontier entry
    ///
    /// No ordering is guaranteed (hash-set iteration order).
    pub fn pop_frontier(&mut self) -> Option<String> {
        let next = self.frontier.iter().next().cloned()?;
        self.frontier.remove(&next);
        Some(next)
    }

    /// Records a page as visited
    ///
    /// Returns false if the page had already been visited.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Adds a URL to the frontier unless it was already visited
    ///
    /// Returns true if the frontier gained a new entry.
    pub fn enqueue(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.frontier.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn is_queued(&self, url: &str) -> bool {
        self.frontier.contains(url)
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn frontier(&self) -> &HashSet<String> {
        &self.frontier
    }

    pub fn menu_links(&self) -> &HashSet<String> {
        &self.menu_links
    }

    /// Replaces the menu-link exclusion set
    pub fn set_menu_links(&mut self, links: HashSet<String>) {
        self.menu_links = links;
    }

    /// Drops the menu-link exclusion set
    pub fn clear_menu_links(&mut self) {
        self.menu_links.clear();
    }
}
