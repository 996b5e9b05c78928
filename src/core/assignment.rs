//! Trainer assignment, confirmation, plan publication and session removal.
//!
//! Operations that address a missing session or plan are no-ops: they
//! report `false` / `0` instead of failing.

use crate::db::pool::DbPool;
use crate::db::{log, plans, sessions};
use crate::errors::AppResult;

pub struct AssignLogic;

impl AssignLogic {
    /// Overwrite the assignee of a session (`None` clears it).
    ///
    /// The confirmation flag is kept as it is; `Session::is_confirmed`
    /// ignores it while nobody is assigned.
    pub fn assign_trainer(pool: &mut DbPool, session_id: i64, trainer_id: Option<i64>) -> AppResult<bool> {
        let n = sessions::set_assigned_trainer(&pool.conn, session_id, trainer_id)?;
        if n > 0 {
            let msg = match trainer_id {
                Some(t) => format!("Assigned trainer {t}"),
                None => "Cleared assignment".to_string(),
            };
            log::audit(&pool.conn, "assign", &format!("session {session_id}"), &msg)?;
        }
        Ok(n > 0)
    }

    /// Apply several assignments at once and optionally publish the month,
    /// all in one transaction. Returns how many sessions were updated and
    /// whether a plan was found to publish (always false without `publish`).
    pub fn save_assignments(
        pool: &mut DbPool,
        assignments: &[(i64, Option<i64>)],
        publish: Option<(i32, u32)>,
    ) -> AppResult<(usize, bool)> {
        let tx = pool.conn.transaction()?;

        let mut updated = 0;
        for (session_id, trainer_id) in assignments {
            let n = sessions::set_assigned_trainer(&tx, *session_id, *trainer_id)?;
            if n > 0 {
                let msg = match trainer_id {
                    Some(t) => format!("Assigned trainer {t}"),
                    None => "Cleared assignment".to_string(),
                };
                log::audit(&tx, "assign", &format!("session {session_id}"), &msg)?;
                updated += n;
            }
        }

        let mut published = false;
        if let Some((year, month)) = publish
            && plans::publish(&tx, year, month)? > 0
        {
            log::audit(&tx, "publish", &format!("{year}-{month:02}"), "Plan published")?;
            published = true;
        }

        tx.commit()?;
        Ok((updated, published))
    }

    /// Mark the month's plan published. Publishing twice is not an error.
    /// Returns false when no plan exists for the month.
    pub fn publish_plan(pool: &mut DbPool, year: i32, month: u32) -> AppResult<bool> {
        let n = plans::publish(&pool.conn, year, month)?;
        if n > 0 {
            log::audit(&pool.conn, "publish", &format!("{year}-{month:02}"), "Plan published")?;
        }
        Ok(n > 0)
    }

    /// Remove one session. Availability entries pointing at it are kept.
    pub fn delete_session(pool: &mut DbPool, session_id: i64) -> AppResult<bool> {
        let n = sessions::delete_session(&pool.conn, session_id)?;
        if n > 0 {
            log::audit(&pool.conn, "delete", &format!("session {session_id}"), "Session deleted")?;
        }
        Ok(n > 0)
    }

    /// Confirm an assignment on behalf of `user_id`. Only the assigned
    /// trainer can confirm; anyone else is silently ignored.
    pub fn confirm_assignment(pool: &mut DbPool, user_id: i64, session_id: i64) -> AppResult<bool> {
        let n = sessions::confirm_if_assigned(&pool.conn, session_id, user_id)?;
        if n > 0 {
            log::audit(
                &pool.conn,
                "confirm",
                &format!("session {session_id}"),
                &format!("Confirmed by trainer {user_id}"),
            )?;
        }
        Ok(n > 0)
    }

    /// Confirm a list of sessions; returns how many were confirmed.
    pub fn confirm_assignments(pool: &mut DbPool, user_id: i64, session_ids: &[i64]) -> AppResult<usize> {
        let mut confirmed = 0;
        for id in session_ids {
            if Self::confirm_assignment(pool, user_id, *id)? {
                confirmed += 1;
            }
        }
        Ok(confirmed)
    }
}
