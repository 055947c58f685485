//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the StateStore trait.

use crate::state::CrawlState;
use crate::storage::schema::{get_schema_version, initialize_schema};
use crate::storage::traits::{StateStore, StorageError, StorageResult};
use crate::storage::CheckpointMeta;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::collections::HashSet;
use std::path::Path;

/// SQLite crawl state backend
pub struct SqliteStateStore {
    conn: Connection,
}

impl SqliteStateStore {
    /// Opens (or creates) the state database at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStateStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn load_urls(&self, table: &str) -> StorageResult<HashSet<String>> {
        let mut stmt = self.conn.prepare(&format!("SELECT url FROM {}", table))?;
        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(urls)
    }
}

/// Replaces every row of `table` with `urls` inside the open transaction
fn replace_urls(tx: &Transaction<'_>, table: &str, urls: &HashSet<String>) -> StorageResult<()> {
    tx.execute(&format!("DELETE FROM {}", table), [])?;
    let mut stmt = tx.prepare(&format!("INSERT INTO {} (url) VALUES (?1)", table))?;
    for url in urls {
        stmt.execute(params![url])?;
    }
    Ok(())
}

impl StateStore for SqliteStateStore {
    fn load_state(&self) -> StorageResult<CrawlState> {
        let visited = self.load_urls("visited")?;
        let frontier = self.load_urls("frontier")?;
        let menu_links = self.load_urls("menu_links")?;
        Ok(CrawlState::from_parts(visited, frontier, menu_links))
    }

    fn save_state(&mut self, state: &CrawlState, config_hash: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        replace_urls(&tx, "visited", state.visited())?;
        replace_urls(&tx, "frontier", state.frontier())?;
        replace_urls(&tx, "menu_links", state.menu_links())?;

        tx.execute(
            "INSERT INTO checkpoint (id, checkpoint_count, saved_at, config_hash, schema_version)
             VALUES (1, 1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                checkpoint_count = checkpoint_count + 1,
                saved_at = excluded.saved_at,
                config_hash = excluded.config_hash,
                schema_version = excluded.schema_version",
            params![now, config_hash, get_schema_version()],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.conn.execute_batch(
            "
            BEGIN;
            DELETE FROM visited;
            DELETE FROM frontier;
            DELETE FROM menu_links;
            DELETE FROM checkpoint;
            COMMIT;
        ",
        )?;
        Ok(())
    }

    fn metadata(&self) -> StorageResult<Option<CheckpointMeta>> {
        let row = self
            .conn
            .query_row(
                "SELECT checkpoint_count, saved_at, config_hash, schema_version
                 FROM checkpoint WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, u32>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((count, saved_at, config_hash, schema_version)) = row else {
            return Ok(None);
        };

        let saved_at = DateTime::parse_from_rfc3339(&saved_at)
            .map_err(|e| StorageError::Corrupt(format!("bad checkpoint timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(Some(CheckpointMeta {
            checkpoint_count: count as u64,
            saved_at,
            config_hash,
            schema_version,
        }))
    }
}
