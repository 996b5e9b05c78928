use crate::cli::commands::{authorizer, open_pool, parse_month_arg};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AssignLogic;
use crate::core::auth::{Authorizer, require_admin};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Parse "SESSION=TRAINER". An empty trainer, `none` or `-` clears.
pub(crate) fn parse_assignment(raw: &str) -> AppResult<(i64, Option<i64>)> {
    let (session, trainer) = raw
        .split_once('=')
        .ok_or_else(|| AppError::InvalidAssignment(raw.to_string()))?;

    let session_id: i64 = session
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidAssignment(raw.to_string()))?;

    let trainer = trainer.trim();
    let trainer_id = if trainer.is_empty() || trainer.eq_ignore_ascii_case("none") || trainer == "-" {
        None
    } else {
        Some(
            trainer
                .parse()
                .map_err(|_| AppError::InvalidAssignment(raw.to_string()))?,
        )
    };

    Ok((session_id, trainer_id))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Assign {
        assignments,
        publish,
    } = cmd
    {
        let parsed = assignments
            .iter()
            .map(|a| parse_assignment(a))
            .collect::<AppResult<Vec<_>>>()?;
        let publish = publish.as_deref().map(parse_month_arg).transpose()?;

        let mut pool = open_pool(cfg)?;
        let auth = authorizer(&pool, cfg)?;
        require_admin(&auth, "assigning trainers")?;

        for (_, trainer) in &parsed {
            if let Some(t) = trainer
                && auth.display_name(*t).is_none()
            {
                warning(format!("Trainer #{t} is not in the trainer directory."));
            }
        }

        let (updated, published) = AssignLogic::save_assignments(&mut pool, &parsed, publish)?;
        success(format!("Assignments saved ({updated} sessions updated)."));

        if let Some((year, month)) = publish {
            if published {
                success(format!("Plan {year}-{month:02} published."));
            } else {
                warning(format!("No plan for {year}-{month:02}; generate the month first."));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignments() {
        assert_eq!(parse_assignment("12=5").unwrap(), (12, Some(5)));
        assert_eq!(parse_assignment("12=").unwrap(), (12, None));
        assert_eq!(parse_assignment("12=none").unwrap(), (12, None));
        assert!(parse_assignment("12").is_err());
        assert!(parse_assignment("x=5").is_err());
        assert!(parse_assignment("12=anna").is_err());
    }
}
