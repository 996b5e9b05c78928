pub mod assign;
pub mod avail;
pub mod config;
pub mod confirm;
pub mod dashboard;
pub mod db;
pub mod export;
pub mod generate;
pub mod init;
pub mod log;
pub mod plan;
pub mod publish;
pub mod session;
pub mod trainer;

use crate::config::Config;
use crate::core::auth::DbAuthorizer;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::date::current_year_month;
use std::io::{self, Write};

/// Open the configured database, applying pending migrations.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn authorizer(pool: &DbPool, cfg: &Config) -> AppResult<DbAuthorizer> {
    DbAuthorizer::load(pool, cfg.current_user)
}

/// Parse a YYYY-MM argument. The month range is checked here so that the
/// error names the month rather than the whole argument.
pub(crate) fn parse_month_arg(arg: &str) -> AppResult<(i32, u32)> {
    let (y, m) = arg
        .trim()
        .split_once('-')
        .ok_or_else(|| AppError::InvalidDate(arg.to_string()))?;
    let year: i32 = y.parse().map_err(|_| AppError::InvalidDate(arg.to_string()))?;
    let month: u32 = m.parse().map_err(|_| AppError::InvalidDate(arg.to_string()))?;

    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidMonth(month));
    }
    if year < 1 {
        return Err(AppError::InvalidYear(year));
    }
    Ok((year, month))
}

/// Optional YYYY-MM argument, defaulting to the current month.
pub(crate) fn month_or_current(arg: Option<&str>) -> AppResult<(i32, u32)> {
    match arg {
        Some(a) => parse_month_arg(a),
        None => Ok(current_year_month()),
    }
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
