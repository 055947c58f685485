//! Storage traits and error types
//!
//! This module defines the trait interface for crawl state backends and
//! associated error types.

use crate::state::CrawlState;
use crate::storage::CheckpointMeta;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt crawl state: {0}")]
    Corrupt(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable record of crawl progress
///
/// The coordinator calls `load_state` once at start and `save_state` after
/// every processed page. A save must be all-or-nothing: if the process dies
/// during a save, the next `load_state` returns the previous checkpoint.
pub trait StateStore {
    /// Returns the last saved state, or an empty state if none exists
    fn load_state(&self) -> StorageResult<CrawlState>;

    /// Overwrites the persisted state with `state`
    ///
    /// # Arguments
    ///
    /// * `state` - The state to persist
    /// * `config_hash` - Hash of the configuration the crawl runs under
    fn save_state(&mut self, state: &CrawlState, config_hash: &str) -> StorageResult<()>;

    /// Removes all persisted state, so the next run starts fresh
    fn clear(&mut self) -> StorageResult<()>;

    /// Returns information about the last checkpoint, if any was written
    fn metadata(&self) -> StorageResult<Option<CheckpointMeta>>;
}
