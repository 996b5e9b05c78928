use crate::errors::AppResult;
use crate::models::Trainer;
use chrono::Local;
use rusqlite::{Connection, Result, Row, params};

fn map_row(row: &Row) -> Result<Trainer> {
    Ok(Trainer {
        id: row.get("id")?,
        display_name: row.get("display_name")?,
        is_admin: row.get::<_, i64>("is_admin")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_trainer(conn: &Connection, display_name: &str, is_admin: bool) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO trainers (display_name, is_admin, created_at) VALUES (?1, ?2, ?3)",
        params![display_name, is_admin as i64, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Ordered by display name, as the assignment drop-downs were.
pub fn list_trainers(conn: &Connection) -> AppResult<Vec<Trainer>> {
    let mut stmt = conn.prepare(
        "SELECT id, display_name, is_admin, created_at FROM trainers
         ORDER BY display_name COLLATE NOCASE ASC, id ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
