use crate::errors::{AppError, AppResult};
use crate::models::{AvailabilityEntry, AvailabilityStatus};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_row(row: &Row) -> Result<AvailabilityEntry> {
    let status_str: String = row.get("status")?;
    let status = AvailabilityStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(AvailabilityEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        session_id: row.get("session_id")?,
        status,
        comment: row.get::<_, Option<String>>("comment")?.unwrap_or_default(),
    })
}

/// Insert or update the entry keyed by (user, session).
/// A `None` comment keeps whatever comment is already stored.
pub fn upsert(
    conn: &Connection,
    user_id: i64,
    session_id: i64,
    status: AvailabilityStatus,
    comment: Option<&str>,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO availability (user_id, session_id, status, comment)
         VALUES (?1, ?2, ?3, COALESCE(?4, ''))
         ON CONFLICT(user_id, session_id) DO UPDATE SET
             status = excluded.status,
             comment = COALESCE(?4, availability.comment)",
        params![user_id, session_id, status.to_db_str(), comment],
    )?;
    Ok(())
}

pub fn find_entry(conn: &Connection, user_id: i64, session_id: i64) -> AppResult<Option<AvailabilityEntry>> {
    let entry = conn
        .query_row(
            "SELECT id, user_id, session_id, status, comment FROM availability
             WHERE user_id = ?1 AND session_id = ?2",
            params![user_id, session_id],
            map_row,
        )
        .optional()?;
    Ok(entry)
}

pub fn count_for(conn: &Connection, user_id: i64, session_id: i64) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM availability WHERE user_id = ?1 AND session_id = ?2",
        params![user_id, session_id],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// A user's entries for sessions dated within [first, last].
pub fn load_for_user_in_range(
    conn: &Connection,
    user_id: i64,
    first: NaiveDate,
    last: NaiveDate,
) -> AppResult<Vec<AvailabilityEntry>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.user_id, a.session_id, a.status, a.comment
         FROM availability a
         JOIN sessions s ON s.id = a.session_id
         WHERE a.user_id = ?1 AND s.date >= ?2 AND s.date <= ?3",
    )?;
    let rows = stmt.query_map(
        params![
            user_id,
            first.format("%Y-%m-%d").to_string(),
            last.format("%Y-%m-%d").to_string()
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All votes on one session, ordered by user id.
pub fn load_for_session(conn: &Connection, session_id: i64) -> AppResult<Vec<AvailabilityEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, session_id, status, comment FROM availability
         WHERE session_id = ?1 ORDER BY user_id ASC",
    )?;
    let rows = stmt.query_map([session_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries whose session no longer exists.
pub fn count_orphans(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM availability
         WHERE session_id NOT IN (SELECT id FROM sessions)",
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn delete_orphans(conn: &Connection) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM availability WHERE session_id NOT IN (SELECT id FROM sessions)",
        [],
    )?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// Survey status: which trainers have answered for a month
// ---------------------------------------------------------------------------

pub fn mark_submitted(conn: &Connection, user_id: i64, year: i32, month: u32) -> AppResult<()> {
    conn.execute(
        "INSERT INTO survey_status (user_id, year, month, is_submitted)
         VALUES (?1, ?2, ?3, 1)
         ON CONFLICT(user_id, year, month) DO UPDATE SET is_submitted = 1",
        params![user_id, year, month],
    )?;
    Ok(())
}

pub fn has_submitted(conn: &Connection, user_id: i64, year: i32, month: u32) -> AppResult<bool> {
    let flag: Option<i64> = conn
        .query_row(
            "SELECT is_submitted FROM survey_status
             WHERE user_id = ?1 AND year = ?2 AND month = ?3",
            params![user_id, year, month],
            |row| row.get(0),
        )
        .optional()?;
    Ok(flag == Some(1))
}

pub fn submitted_users(conn: &Connection, year: i32, month: u32) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT user_id FROM survey_status
         WHERE year = ?1 AND month = ?2 AND is_submitted = 1
         ORDER BY user_id ASC",
    )?;
    let rows = stmt.query_map(params![year, month], |row| row.get(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
