use crate::db::availability::count_orphans;
use crate::db::pool::DbPool;
use crate::db::plans::list_plans;
use crate::db::sessions::date_span;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    let n = pool.conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(n)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Trainers", "trainers"),
        ("Sessions", "sessions"),
        ("Monthly plans", "monthly_plans"),
        ("Availability entries", "availability"),
    ] {
        let n = count(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    //
    // 3) DATE RANGE
    //
    let (fmt_first, fmt_last) = match date_span(&pool.conn)? {
        Some((first, last)) => (first, last),
        None => (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")),
    };

    println!("{}• Session range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) PLANS
    //
    let plans = list_plans(&pool.conn)?;
    println!("{}• Monthly plans:{}", CYAN, RESET);
    if plans.is_empty() {
        println!("    {GREY}--{RESET}");
    }
    for p in &plans {
        let state = if p.is_published {
            format!("{GREEN}published{RESET}")
        } else {
            format!("{YELLOW}draft{RESET}")
        };
        println!("    {}  {}", p.label(), state);
    }

    //
    // 5) ORPHANS
    //
    let orphans = count_orphans(&pool.conn)?;
    let color = if orphans > 0 { YELLOW } else { GREEN };
    println!(
        "{}• Orphaned availability entries:{} {}{}{}",
        CYAN, RESET, color, orphans, RESET
    );

    println!();
    Ok(())
}
