use crate::cli::commands::{authorizer, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AssignLogic;
use crate::core::auth::require_login;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Confirm { sessions } = cmd {
        let mut pool = open_pool(cfg)?;
        let auth = authorizer(&pool, cfg)?;
        let user_id = require_login(&auth)?;

        let confirmed = AssignLogic::confirm_assignments(&mut pool, user_id, sessions)?;

        if confirmed > 0 {
            success(format!("{confirmed} assignment(s) confirmed."));
        }
        if confirmed < sessions.len() {
            info("Sessions not assigned to you were left unchanged.");
        }
    }

    Ok(())
}
