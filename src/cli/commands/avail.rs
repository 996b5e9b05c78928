use crate::cli::commands::{authorizer, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AvailabilityLogic;
use crate::core::auth::require_login;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Parse "SESSION=STATUS". The status is passed through unchecked; the
/// core decides which values are accepted.
pub(crate) fn parse_vote(raw: &str) -> AppResult<(i64, String)> {
    let (session, status) = raw
        .split_once('=')
        .ok_or_else(|| AppError::InvalidStatus(raw.to_string()))?;
    let session_id: i64 = session
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidStatus(raw.to_string()))?;
    Ok((session_id, status.trim().to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Avail { entries, comment } = cmd {
        let votes = entries
            .iter()
            .map(|e| parse_vote(e))
            .collect::<AppResult<Vec<_>>>()?;

        let mut pool = open_pool(cfg)?;
        let auth = authorizer(&pool, cfg)?;
        let user_id = require_login(&auth)?;

        let report = AvailabilityLogic::submit(&mut pool, user_id, votes, comment.as_deref())?;

        success(format!("Availability saved ({} entries).", report.saved));
        for id in &report.skipped {
            warning(format!("Session #{id}: invalid status ignored (use Yes, Maybe or No)."));
        }
    }

    Ok(())
}
