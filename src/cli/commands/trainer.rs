use crate::cli::commands::{authorizer, open_pool};
use crate::cli::parser::{Commands, TrainerAction};
use crate::config::Config;
use crate::core::TrainerLogic;
use crate::core::auth::require_admin;
use crate::db::trainers;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Trainer { action } = cmd {
        let mut pool = open_pool(cfg)?;

        match action {
            TrainerAction::Add { name, admin } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(AppError::Other("Trainer name must not be empty".into()));
                }

                // the very first trainer bootstraps the directory
                let auth = authorizer(&pool, cfg)?;
                if !auth.is_empty() {
                    require_admin(&auth, "adding trainers")?;
                }

                let is_admin = *admin || auth.is_empty();
                let id = TrainerLogic::add(&mut pool, name, is_admin)?;

                success(format!("Trainer #{id} '{name}' added{}.", if is_admin { " as admin" } else { "" }));
            }
            TrainerAction::List => {
                let all = trainers::list_trainers(&pool.conn)?;
                if all.is_empty() {
                    info("No trainers yet. Add one with `tplanner trainer add <NAME> --admin`.");
                    return Ok(());
                }

                let mut table = Table::with_headers(&["ID", "Name", "Role"]);
                for t in all {
                    table.add_row(vec![
                        t.id.to_string(),
                        t.display_name,
                        if t.is_admin { "admin" } else { "trainer" }.to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
