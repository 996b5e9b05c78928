//! Trainer directory mutations.

use crate::db::pool::DbPool;
use crate::db::{log, trainers};
use crate::errors::AppResult;

pub struct TrainerLogic;

impl TrainerLogic {
    /// Insert a trainer and its audit row together; neither is kept if
    /// the other fails. Returns the new trainer id.
    pub fn add(pool: &mut DbPool, display_name: &str, is_admin: bool) -> AppResult<i64> {
        let tx = pool.conn.transaction()?;

        let id = trainers::insert_trainer(&tx, display_name, is_admin)?;
        log::audit(
            &tx,
            "trainer_add",
            &format!("trainer {id}"),
            &format!("Added {display_name}{}", if is_admin { " (admin)" } else { "" }),
        )?;

        tx.commit()?;
        Ok(id)
    }
}
