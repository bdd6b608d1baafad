//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: one row per topic, ordered within its day by position
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        date             TEXT NOT NULL,
        position         INTEGER NOT NULL,
        text             TEXT NOT NULL,
        description      TEXT NOT NULL DEFAULT '',
        done             INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (date, position)
    );

    -- Every date key in the store, including days whose log is empty
    CREATE TABLE IF NOT EXISTS days (
        date             TEXT PRIMARY KEY
    );

    CREATE INDEX IF NOT EXISTS idx_tasks_done ON tasks(done);
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version = get_schema_version(conn)?;

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute_batch(&format!("PRAGMA user_version = {}", version))?;
        }
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Migrations complete"
        );
    }

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
