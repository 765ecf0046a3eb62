//! Database migrations

use rusqlite::Connection;

use crate::error::Result;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    if current_version < SCHEMA_VERSION {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// Initial schema (v1)
///
/// `reminders` is keyed by (user_id, reminder_type) so a repeated set replaces
/// the row. `progress` has no key: every write is a new row.
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reminders (
            user_id TEXT NOT NULL,
            reminder_type TEXT NOT NULL,
            reminder_time TEXT NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (user_id, reminder_type)
        );

        CREATE TABLE IF NOT EXISTS progress (
            user_id TEXT NOT NULL,
            category TEXT NOT NULL,
            value INTEGER NOT NULL,
            last_updated TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_progress_user_category
            ON progress(user_id, category);

        INSERT INTO schema_version (version) VALUES (1);
        "#,
    )?;

    Ok(())
}
