use crate::cli::commands::{authorizer, open_pool, parse_month_arg};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::GenerateLogic;
use crate::core::auth::require_admin;
use crate::errors::AppResult;
use crate::models::GenerationResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Generate { month } = cmd {
        let (year, month) = parse_month_arg(month)?;

        let mut pool = open_pool(cfg)?;
        let auth = authorizer(&pool, cfg)?;
        require_admin(&auth, "generating sessions")?;

        match GenerateLogic::apply(&mut pool, year, month, &cfg.default_location)? {
            GenerationResult::Generated { sessions } => {
                success(format!("Generated {sessions} sessions for {year}-{month:02}."));
            }
            GenerationResult::AlreadyExists => {
                warning(format!(
                    "Sessions already exist for {year}-{month:02}. Delete them first if you want to regenerate."
                ));
            }
        }
    }

    Ok(())
}
