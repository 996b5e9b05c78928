use crate::cli::commands::{authorizer, open_pool, parse_month_arg};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AssignLogic;
use crate::core::auth::require_admin;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Publish { month } = cmd {
        let (year, month) = parse_month_arg(month)?;

        let mut pool = open_pool(cfg)?;
        let auth = authorizer(&pool, cfg)?;
        require_admin(&auth, "publishing plans")?;

        if AssignLogic::publish_plan(&mut pool, year, month)? {
            success(format!("Plan {year}-{month:02} published."));
        } else {
            warning(format!("No plan for {year}-{month:02}; generate the month first."));
        }
    }

    Ok(())
}
