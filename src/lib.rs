//! Link-Sweeper: a resumable broken-link crawler
//!
//! This crate crawls a website confined to a URL subtree, verifies every
//! hyperlink it finds, and records the results in an append-only CSV report.
//! Crawl progress is checkpointed after every page so an interrupted crawl
//! resumes where it stopped.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Sweeper operations
///
/// Only fatal conditions end up here. Network failures while fetching pages
/// or checking links are absorbed by the crawler and never surface as a
/// `SweepError`.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("State storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Report error: {0}")]
    Report(#[from] output::OutputError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Result type alias for Link-Sweeper operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, LinkStatus};
pub use state::CrawlState;
pub use url::{is_html, is_in_scope, is_valid_url};
