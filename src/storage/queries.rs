//! Database queries for reminders and progress

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::types::{ProgressEntry, Reminder};

/// Naive layouts written by older deployments sharing the same database
/// file; read as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Fixed-width RFC 3339 so text order matches chronological order
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp, accepting RFC 3339 or a naive UTC datetime
pub fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NAIVE_TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or(rfc_err),
    }
}

/// Read a timestamp column, surfacing unparseable text as a conversion error
fn timestamp_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    parse_timestamp(&raw).map_err(|e| {
        let idx = row.as_ref().column_index(column).unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

/// Parse a reminder from a database row
pub fn reminder_from_row(row: &Row) -> rusqlite::Result<Reminder> {
    Ok(Reminder {
        user_id: row.get("user_id")?,
        reminder_type: row.get("reminder_type")?,
        reminder_time: row.get("reminder_time")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

/// Parse a progress entry from a database row
pub fn progress_from_row(row: &Row) -> rusqlite::Result<ProgressEntry> {
    Ok(ProgressEntry {
        user_id: row.get("user_id")?,
        category: row.get("category")?,
        value: row.get("value")?,
        last_updated: timestamp_column(row, "last_updated")?,
    })
}

/// Insert or replace the reminder keyed by (user_id, reminder_type).
///
/// A repeated set overwrites `reminder_time` and `created_at`.
pub fn upsert_reminder(
    conn: &Connection,
    user_id: &str,
    reminder_type: &str,
    reminder_time: &str,
    now: DateTime<Utc>,
) -> Result<Reminder> {
    conn.execute(
        r#"
        INSERT INTO reminders (user_id, reminder_type, reminder_time, created_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(user_id, reminder_type) DO UPDATE SET
            reminder_time = excluded.reminder_time,
            created_at = excluded.created_at
        "#,
        params![user_id, reminder_type, reminder_time, format_timestamp(now)],
    )?;

    Ok(Reminder {
        user_id: user_id.to_string(),
        reminder_type: reminder_type.to_string(),
        reminder_time: reminder_time.to_string(),
        created_at: now,
    })
}

/// All reminders for a user, earliest `created_at` first
pub fn list_reminders(conn: &Connection, user_id: &str) -> Result<Vec<Reminder>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT user_id, reminder_type, reminder_time, created_at
        FROM reminders
        WHERE user_id = ?1
        ORDER BY julianday(created_at) ASC, rowid ASC
        "#,
    )?;

    let reminders = stmt
        .query_map(params![user_id], reminder_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(reminders)
}

/// Append a progress row. Never deduplicates.
pub fn insert_progress(
    conn: &Connection,
    user_id: &str,
    category: &str,
    value: i64,
    now: DateTime<Utc>,
) -> Result<ProgressEntry> {
    conn.execute(
        "INSERT INTO progress (user_id, category, value, last_updated) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, category, value, format_timestamp(now)],
    )?;

    Ok(ProgressEntry {
        user_id: user_id.to_string(),
        category: category.to_string(),
        value,
        last_updated: now,
    })
}

/// Progress history for a user, optionally narrowed to one category
pub fn list_progress(
    conn: &Connection,
    user_id: &str,
    category: Option<&str>,
) -> Result<Vec<ProgressEntry>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT user_id, category, value, last_updated
        FROM progress
        WHERE user_id = ?1 AND (?2 IS NULL OR category = ?2)
        ORDER BY julianday(last_updated) ASC, rowid ASC
        "#,
    )?;

    let entries = stmt
        .query_map(params![user_id, category], progress_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(entries)
}

/// Number of progress rows for (user, category)
pub fn count_progress(conn: &Connection, user_id: &str, category: &str) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM progress WHERE user_id = ?1 AND category = ?2",
        params![user_id, category],
        |row| row.get(0),
    )?;
    Ok(count)
}
