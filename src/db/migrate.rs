//! Schema migrations.
//!
//! Each migration has a stable version string. Applied versions are recorded
//! in the `log` table (`operation = 'migration_applied'`), so running the
//! engine again is a no-op.

use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It has to exist before anything else
/// because it doubles as the migration ledger.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_trainers",
        description: "Created trainers table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS trainers (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            display_name  TEXT NOT NULL,
            is_admin      INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_sessions",
        description: "Created sessions table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            date                  TEXT NOT NULL,
            time                  TEXT NOT NULL,
            end_time              TEXT DEFAULT NULL,
            location              TEXT NOT NULL DEFAULT '',
            topic                 TEXT NOT NULL DEFAULT '',
            assigned_trainer_id   INTEGER DEFAULT NULL,
            assignment_confirmed  INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_date_time ON sessions(date, time);
        CREATE INDEX IF NOT EXISTS idx_sessions_trainer ON sessions(assigned_trainer_id);
        "#,
    },
    Migration {
        version: "20250301_0003_create_monthly_plans",
        description: "Created monthly_plans table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS monthly_plans (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            year          INTEGER NOT NULL,
            month         INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
            is_published  INTEGER NOT NULL DEFAULT 0,
            UNIQUE(year, month)
        );
        "#,
    },
    Migration {
        version: "20250301_0004_create_availability",
        description: "Created availability table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS availability (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL,
            session_id  INTEGER NOT NULL,
            status      TEXT NOT NULL CHECK(status IN ('Yes','Maybe','No')),
            comment     TEXT NOT NULL DEFAULT '',
            UNIQUE(user_id, session_id)
        );

        CREATE INDEX IF NOT EXISTS idx_availability_session ON availability(session_id);
        "#,
    },
    Migration {
        version: "20250415_0005_create_survey_status",
        description: "Created survey_status table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS survey_status (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       INTEGER NOT NULL,
            year          INTEGER NOT NULL,
            month         INTEGER NOT NULL,
            is_submitted  INTEGER NOT NULL DEFAULT 0,
            UNIQUE(user_id, year, month)
        );
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    conn.execute_batch("BEGIN;")?;

    let result = conn.execute_batch(m.sql).and_then(|_| {
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )
    });

    match result {
        Ok(_) => conn.execute_batch("COMMIT;"),
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK;");
            Err(e)
        }
    }
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db(). Returns the versions applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied.push(m.version);
    }

    Ok(applied)
}

/// All migration versions known to this build, in order.
pub fn known_versions() -> Vec<&'static str> {
    MIGRATIONS.iter().map(|m| m.version).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        let first = run_pending_migrations(&conn).unwrap();
        assert_eq!(first, known_versions());

        let second = run_pending_migrations(&conn).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn plans_are_unique_per_month() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn.execute("INSERT INTO monthly_plans (year, month) VALUES (2024, 4)", [])
            .unwrap();
        let dup = conn.execute("INSERT INTO monthly_plans (year, month) VALUES (2024, 4)", []);
        assert!(dup.is_err());
    }
}
