//! Database schema definitions
//!
//! This module contains the SQL schema for the crawl state database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Pages whose body links have been processed
CREATE TABLE IF NOT EXISTS visited (
    url TEXT PRIMARY KEY
);

-- Pages discovered in scope and waiting to be visited
CREATE TABLE IF NOT EXISTS frontier (
    url TEXT PRIMARY KEY
);

-- Menu links of the start page (only filled when persistence is enabled)
CREATE TABLE IF NOT EXISTS menu_links (
    url TEXT PRIMARY KEY
);

-- Single-row checkpoint bookkeeping
CREATE TABLE IF NOT EXISTS checkpoint (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    checkpoint_count INTEGER NOT NULL,
    saved_at TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    schema_version INTEGER NOT NULL
);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Gets the current schema version
///
/// Stored with every checkpoint so a future layout change can detect old files.
pub fn get_schema_version() -> u32 {
    1
}
