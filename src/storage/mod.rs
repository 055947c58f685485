//! Storage module for persisting crawl state
//!
//! This module handles durable checkpoints of crawl progress:
//! - SQLite database initialization and schema management
//! - Atomic save/load of the visited set, frontier and menu links
//! - Checkpoint bookkeeping used for resume diagnostics

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryStateStore;
pub use sqlite::SqliteStateStore;
pub use traits::{StateStore, StorageError, StorageResult};

use chrono::{DateTime, Utc};
use std::path::Path;

/// Opens the state store at the given path
pub fn open_state_store(path: &Path) -> StorageResult<SqliteStateStore> {
    SqliteStateStore::new(path)
}

/// Bookkeeping written alongside every checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointMeta {
    /// Number of checkpoints written since the state was last cleared
    pub checkpoint_count: u64,
    /// When the last checkpoint was written
    pub saved_at: DateTime<Utc>,
    /// Hash of the configuration the last checkpoint was written under
    pub config_hash: String,
    /// Layout version of the state file
    pub schema_version: u32,
}
