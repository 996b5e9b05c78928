//! Month generation: materialize a month's sessions from the weekly
//! template exactly once, and make sure a monthly plan record exists.

use crate::core::template;
use crate::db::pool::DbPool;
use crate::db::{log, plans, sessions};
use crate::errors::{AppError, AppResult};
use crate::models::{GenerationResult, NewSession};
use crate::utils::date::{all_days_of_month, month_bounds};

/// Venue used when the configuration does not name one.
pub const DEFAULT_LOCATION: &str = "Sporthalle Gymnasium, Tettnang";

pub struct GenerateLogic;

impl GenerateLogic {
    /// Generate all sessions of (year, month).
    ///
    /// The existence check, the session inserts and the plan insert run in
    /// one `BEGIN IMMEDIATE` transaction. SQLite grants the write lock
    /// before the check, so a second generator for the same month waits for
    /// the first to commit and then sees `AlreadyExists`. On any error
    /// nothing is written.
    pub fn apply(pool: &mut DbPool, year: i32, month: u32, location: &str) -> AppResult<GenerationResult> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidMonth(month));
        }
        if year < 1 {
            return Err(AppError::InvalidYear(year));
        }
        let (first, last) = month_bounds(year, month).ok_or(AppError::InvalidYear(year))?;

        let tx = pool.begin_immediate()?;

        if sessions::count_in_range(&tx, first, last)? > 0 {
            // dropping the transaction rolls it back
            return Ok(GenerationResult::AlreadyExists);
        }

        let mut created = 0usize;
        for day in all_days_of_month(year, month) {
            for def in template::resolve(day) {
                sessions::insert_session(
                    &tx,
                    &NewSession {
                        date: day,
                        start_time: def.start,
                        end_time: Some(def.end),
                        location: location.to_string(),
                        topic: def.topic.to_string(),
                    },
                )?;
                created += 1;
            }
        }

        plans::ensure_plan(&tx, year, month)?;

        log::audit(
            &tx,
            "generate",
            &format!("{year}-{month:02}"),
            &format!("Generated {created} sessions"),
        )?;

        tx.commit()?;

        Ok(GenerationResult::Generated { sessions: created })
    }
}
