use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::availability::{count_orphans, delete_orphans};
use crate::db::log::audit;
use crate::db::migrate::{known_versions, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info, success, warning};

fn migrate(pool: &DbPool, verbose: bool) -> AppResult<()> {
    let applied = run_pending_migrations(&pool.conn)?;
    if verbose {
        for v in &applied {
            success(format!("Migration applied: {v}"));
        }
        info(format!(
            "Schema up to date ({} applied, {} known).",
            applied.len(),
            known_versions().len()
        ));
    }
    Ok(())
}

fn check(pool: &mut DbPool) -> AppResult<()> {
    header("Integrity check");

    let integrity: String =
        pool.with_conn(|conn| conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0)))?;
    if integrity == "ok" {
        success("SQLite integrity check passed.");
    } else {
        error(format!("SQLite integrity check failed: {integrity}"));
    }

    // availability rows survive session deletion; surface them here
    match count_orphans(&pool.conn)? {
        0 => success("No orphaned availability entries."),
        n => warning(format!(
            "{n} availability entries reference deleted sessions (use --prune-orphans)."
        )),
    }
    Ok(())
}

fn prune(pool: &DbPool) -> AppResult<()> {
    let n = delete_orphans(&pool.conn)?;
    if n > 0 {
        audit(&pool.conn, "prune", "availability", &format!("Deleted {n} orphaned entries"))?;
    }
    success(format!("Removed {n} orphaned availability entries."));
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate: run_migrate,
        check: run_check,
        vacuum,
        info: show_info,
        prune_orphans,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        // always bring the schema up to date; only report on --migrate
        migrate(&pool, *run_migrate)?;

        if *show_info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }
        if *run_check {
            check(&mut pool)?;
        }
        if *prune_orphans {
            prune(&pool)?;
        }
        if *vacuum {
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}
