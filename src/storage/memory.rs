//! In-memory storage implementation
//!
//! Keeps the crawl state behind a shared handle so a test can hand a clone
//! to the coordinator and inspect what was checkpointed afterwards.

use crate::state::CrawlState;
use crate::storage::traits::{StateStore, StorageResult};
use crate::storage::CheckpointMeta;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    state: Option<CrawlState>,
    meta: Option<CheckpointMeta>,
}

/// Volatile crawl state backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStateStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `state`, as if a previous run saved it
    pub fn with_state(state: CrawlState) -> Self {
        let store = Self::new();
        store.lock().state = Some(state);
        store
    }

    /// Returns a copy of the last saved state
    pub fn snapshot(&self) -> Option<CrawlState> {
        self.lock().state.clone()
    }

    /// Number of `save_state` calls since creation (or the last `clear`)
    pub fn save_count(&self) -> u64 {
        self.lock()
            .meta
            .as_ref()
            .map_or(0, |meta| meta.checkpoint_count)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StateStore for MemoryStateStore {
    fn load_state(&self) -> StorageResult<CrawlState> {
        Ok(self.lock().state.clone().unwrap_or_default())
    }

    fn save_state(&mut self, state: &CrawlState, config_hash: &str) -> StorageResult<()> {
        let mut inner = self.lock();
        let count = inner.meta.as_ref().map_or(0, |m| m.checkpoint_count) + 1;
        inner.state = Some(state.clone());
        inner.meta = Some(CheckpointMeta {
            checkpoint_count: count,
            saved_at: Utc::now(),
            config_hash: config_hash.to_string(),
            schema_version: crate::storage::schema::get_schema_version(),
        });
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        let mut inner = self.lock();
        inner.state = None;
        inner.meta = None;
        Ok(())
    }

    fn metadata(&self) -> StorageResult<Option<CheckpointMeta>> {
        Ok(self.lock().meta.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_empty_state() {
        let store = MemoryStateStore::new();
        assert!(store.load_state().unwrap().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStateStore::new();
        let mut handle = store.clone();

        let mut state = CrawlState::new();
        state.seed("https://example.com/");
        handle.save_state(&state, "hash").unwrap();

        assert_eq!(store.snapshot(), Some(state));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_with_state_preloads() {
        let mut state = CrawlState::new();
        state.mark_visited("https://example.com/");
        let store = MemoryStateStore::with_state(state.clone());

        assert_eq!(store.load_state().unwrap(), state);
        assert!(store.metadata().unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStateStore::with_state(CrawlState::new());
        store.save_state(&CrawlState::new(), "hash").unwrap();
        store.clear().unwrap();
        assert!(store.snapshot().is_none());
        assert_eq!(store.save_count(), 0);
    }
}
