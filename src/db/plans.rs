use crate::errors::AppResult;
use crate::models::MonthlyPlan;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_row(row: &Row) -> Result<MonthlyPlan> {
    Ok(MonthlyPlan {
        id: row.get("id")?,
        year: row.get("year")?,
        month: row.get("month")?,
        is_published: row.get::<_, i64>("is_published")? == 1,
    })
}

pub fn find_plan(conn: &Connection, year: i32, month: u32) -> AppResult<Option<MonthlyPlan>> {
    let plan = conn
        .query_row(
            "SELECT id, year, month, is_published FROM monthly_plans
             WHERE year = ?1 AND month = ?2",
            params![year, month],
            map_row,
        )
        .optional()?;
    Ok(plan)
}

/// Creates an unpublished plan unless one exists. Returns true if inserted.
pub fn ensure_plan(conn: &Connection, year: i32, month: u32) -> AppResult<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO monthly_plans (year, month, is_published) VALUES (?1, ?2, 0)",
        params![year, month],
    )?;
    Ok(n == 1)
}

/// Sets `is_published`. Returns the number of matching plans (0 or 1).
pub fn publish(conn: &Connection, year: i32, month: u32) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE monthly_plans SET is_published = 1 WHERE year = ?1 AND month = ?2",
        params![year, month],
    )?;
    Ok(n)
}

pub fn list_plans(conn: &Connection) -> AppResult<Vec<MonthlyPlan>> {
    let mut stmt = conn.prepare(
        "SELECT id, year, month, is_published FROM monthly_plans ORDER BY year ASC, month ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
