//! Authorization collaborator.
//!
//! Core operations take explicit user ids and never ask who is calling.
//! The command handlers consult an `Authorizer` before invoking them.

use crate::db::pool::DbPool;
use crate::db::trainers;
use crate::errors::{AppError, AppResult};
use std::collections::HashMap;

pub trait Authorizer {
    fn is_logged_in(&self) -> bool;
    fn current_user_id(&self) -> Option<i64>;
    fn has_admin_capability(&self) -> bool;
    /// Display name of any known user.
    fn display_name(&self, user_id: i64) -> Option<String>;
}

/// Authorizer backed by the `trainers` table.
pub struct DbAuthorizer {
    current: Option<i64>,
    admins: Vec<i64>,
    names: HashMap<i64, String>,
}

impl DbAuthorizer {
    /// Load the trainer directory. A `current` id that is not in the
    /// directory counts as not logged in.
    pub fn load(pool: &DbPool, current: Option<i64>) -> AppResult<Self> {
        let all = trainers::list_trainers(&pool.conn)?;

        let admins = all.iter().filter(|t| t.is_admin).map(|t| t.id).collect();
        let names: HashMap<i64, String> = all.into_iter().map(|t| (t.id, t.display_name)).collect();
        let current = current.filter(|id| names.contains_key(id));

        Ok(Self {
            current,
            admins,
            names,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Authorizer for DbAuthorizer {
    fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    fn current_user_id(&self) -> Option<i64> {
        self.current
    }

    fn has_admin_capability(&self) -> bool {
        self.current.is_some_and(|id| self.admins.contains(&id))
    }

    fn display_name(&self, user_id: i64) -> Option<String> {
        self.names.get(&user_id).cloned()
    }
}

/// The logged-in user's id, or `NotLoggedIn`.
pub fn require_login(auth: &dyn Authorizer) -> AppResult<i64> {
    match auth.current_user_id() {
        Some(id) if auth.is_logged_in() => Ok(id),
        _ => Err(AppError::NotLoggedIn),
    }
}

pub fn require_admin(auth: &dyn Authorizer, action: &str) -> AppResult<i64> {
    let id = require_login(auth)?;
    if auth.has_admin_capability() {
        Ok(id)
    } else {
        Err(AppError::NotAuthorized(format!("{action} requires an admin")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        user: Option<i64>,
        admin: bool,
    }

    impl Authorizer for Fixed {
        fn is_logged_in(&self) -> bool {
            self.user.is_some()
        }
        fn current_user_id(&self) -> Option<i64> {
            self.user
        }
        fn has_admin_capability(&self) -> bool {
            self.admin
        }
        fn display_name(&self, _: i64) -> Option<String> {
            None
        }
    }

    #[test]
    fn login_and_admin_checks() {
        let anon = Fixed { user: None, admin: false };
        assert!(matches!(require_login(&anon), Err(AppError::NotLoggedIn)));

        let trainer = Fixed { user: Some(2), admin: false };
        assert_eq!(require_login(&trainer).unwrap(), 2);
        assert!(matches!(
            require_admin(&trainer, "generate"),
            Err(AppError::NotAuthorized(_))
        ));

        let admin = Fixed { user: Some(1), admin: true };
        assert_eq!(require_admin(&admin, "generate").unwrap(), 1);
    }
}
