use crate::errors::{AppError, AppResult};
use crate::models::{NewSession, Session};
use crate::utils::time::parse_time;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_SESSIONS: &str = "SELECT id, date, time, end_time, location, topic,
        assigned_trainer_id, assignment_confirmed
     FROM sessions";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<Session> {
    let date_str: String = row.get("date")?;
    let time_str: String = row.get("time")?;
    let end_str: Option<String> = row.get("end_time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;

    let start_time =
        parse_time(&time_str).ok_or_else(|| conversion_error(AppError::InvalidTime(time_str.clone())))?;

    let end_time = match end_str.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(
            parse_time(s).ok_or_else(|| conversion_error(AppError::InvalidTime(s.to_string())))?,
        ),
    };

    Ok(Session {
        id: row.get("id")?,
        date,
        start_time,
        end_time,
        location: row.get::<_, Option<String>>("location")?.unwrap_or_default(),
        topic: row.get::<_, Option<String>>("topic")?.unwrap_or_default(),
        assigned_trainer_id: row.get("assigned_trainer_id")?,
        assignment_confirmed: row.get::<_, i64>("assignment_confirmed")? == 1,
    })
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn ymd(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn insert_session(conn: &Connection, s: &NewSession) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sessions (date, time, end_time, location, topic)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ymd(s.date),
            s.start_time.format("%H:%M").to_string(),
            s.end_time.map(|t| t.format("%H:%M").to_string()),
            s.location,
            s.topic,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_session(conn: &Connection, id: i64) -> AppResult<Option<Session>> {
    let sql = format!("{SELECT_SESSIONS} WHERE id = ?1");
    let session = conn.query_row(&sql, [id], map_row).optional()?;
    Ok(session)
}

/// Number of sessions dated between `first` and `last` (inclusive).
pub fn count_in_range(conn: &Connection, first: NaiveDate, last: NaiveDate) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE date >= ?1 AND date <= ?2",
        params![ymd(first), ymd(last)],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// All sessions in a date range, ordered by date and start time.
pub fn load_in_range(conn: &Connection, first: NaiveDate, last: NaiveDate) -> AppResult<Vec<Session>> {
    let sql = format!("{SELECT_SESSIONS} WHERE date >= ?1 AND date <= ?2 ORDER BY date ASC, time ASC");
    collect(conn, &sql, params![ymd(first), ymd(last)])
}

/// Sessions in a date range that have a trainer assigned.
pub fn load_assigned_in_range(
    conn: &Connection,
    first: NaiveDate,
    last: NaiveDate,
) -> AppResult<Vec<Session>> {
    let sql = format!(
        "{SELECT_SESSIONS}
         WHERE date >= ?1 AND date <= ?2 AND assigned_trainer_id IS NOT NULL
         ORDER BY date ASC, time ASC"
    );
    collect(conn, &sql, params![ymd(first), ymd(last)])
}

pub fn load_upcoming(conn: &Connection, from: NaiveDate, limit: u32) -> AppResult<Vec<Session>> {
    let sql = format!("{SELECT_SESSIONS} WHERE date >= ?1 ORDER BY date ASC, time ASC LIMIT ?2");
    collect(conn, &sql, params![ymd(from), limit])
}

/// Returns the number of deleted rows (0 when the id does not exist).
pub fn delete_session(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
    Ok(n)
}

/// Overwrites the assignee. The confirmation flag is left untouched.
pub fn set_assigned_trainer(conn: &Connection, id: i64, trainer: Option<i64>) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE sessions SET assigned_trainer_id = ?1 WHERE id = ?2",
        params![trainer, id],
    )?;
    Ok(n)
}

/// Marks the assignment confirmed only when `user_id` is the assignee.
/// The check and the write are a single statement.
pub fn confirm_if_assigned(conn: &Connection, id: i64, user_id: i64) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE sessions SET assignment_confirmed = 1
         WHERE id = ?1 AND assigned_trainer_id = ?2",
        params![id, user_id],
    )?;
    Ok(n)
}

/// First and last session date stored, if any.
pub fn date_span(conn: &Connection) -> AppResult<Option<(String, String)>> {
    let span = conn.query_row("SELECT MIN(date), MAX(date) FROM sessions", [], |row| {
        Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?))
    })?;
    Ok(match span {
        (Some(a), Some(b)) => Some((a, b)),
        _ => None,
    })
}
