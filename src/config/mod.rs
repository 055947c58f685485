//! Configuration module for Link-Sweeper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use link_sweeper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-sweeper.toml")).unwrap();
//! println!("Crawling from: {}", config.crawl.start_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, HttpConfig, OutputConfig, DEFAULT_TIMEOUT_SECS};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
