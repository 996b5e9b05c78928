//! Trainer availability: votes per session and the per-month survey flag.

use crate::db::pool::DbPool;
use crate::db::{availability, log, sessions};
use crate::errors::AppResult;
use crate::models::{AvailabilityEntry, AvailabilityStatus};
use crate::utils::date::month_bounds;
use chrono::Datelike;
use std::collections::BTreeSet;

/// What `submit` did with the pairs it was given.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub saved: usize,
    /// Session ids whose status was not Yes / Maybe / No.
    pub skipped: Vec<i64>,
}

/// One trainer's vote on a session, with the trainer's display name.
#[derive(Debug, Clone)]
pub struct Vote {
    pub user_id: i64,
    pub name: String,
    pub status: AvailabilityStatus,
    pub comment: String,
}

pub struct AvailabilityLogic;

impl AvailabilityLogic {
    /// Upsert one entry per (session, status) pair. Pairs with an unknown
    /// status are skipped without touching the store. Every month a saved
    /// entry falls into is marked as submitted for the user.
    pub fn submit<I, S>(pool: &mut DbPool, user_id: i64, statuses: I, comment: Option<&str>) -> AppResult<SubmitReport>
    where
        I: IntoIterator<Item = (i64, S)>,
        S: AsRef<str>,
    {
        let tx = pool.conn.transaction()?;

        let mut report = SubmitReport::default();
        let mut months = BTreeSet::new();

        for (session_id, raw) in statuses {
            let Some(status) = AvailabilityStatus::from_db_str(raw.as_ref()) else {
                report.skipped.push(session_id);
                continue;
            };

            availability::upsert(&tx, user_id, session_id, status, comment)?;
            report.saved += 1;

            if let Some(s) = sessions::find_session(&tx, session_id)? {
                months.insert((s.date.year(), s.date.month()));
            }
        }

        for (year, month) in &months {
            availability::mark_submitted(&tx, user_id, *year, *month)?;
        }

        if report.saved > 0 {
            log::audit(
                &tx,
                "availability",
                &format!("user {user_id}"),
                &format!("Saved {} entries", report.saved),
            )?;
        }

        tx.commit()?;
        Ok(report)
    }

    pub fn entries_for_month(pool: &DbPool, user_id: i64, year: i32, month: u32) -> AppResult<Vec<AvailabilityEntry>> {
        match month_bounds(year, month) {
            Some((first, last)) => availability::load_for_user_in_range(&pool.conn, user_id, first, last),
            None => Ok(Vec::new()),
        }
    }

    /// All votes on a session; names are resolved through `names`, falling
    /// back to "#<id>".
    pub fn overview_for_session<F>(pool: &DbPool, session_id: i64, names: F) -> AppResult<Vec<Vote>>
    where
        F: Fn(i64) -> Option<String>,
    {
        let entries = availability::load_for_session(&pool.conn, session_id)?;
        Ok(entries
            .into_iter()
            .map(|e| Vote {
                name: names(e.user_id).unwrap_or_else(|| format!("#{}", e.user_id)),
                user_id: e.user_id,
                status: e.status,
                comment: e.comment,
            })
            .collect())
    }

    pub fn has_submitted(pool: &DbPool, user_id: i64, year: i32, month: u32) -> AppResult<bool> {
        availability::has_submitted(&pool.conn, user_id, year, month)
    }
}
