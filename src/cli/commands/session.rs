use crate::cli::commands::{ask_confirmation, authorizer, month_or_current, open_pool};
use crate::cli::parser::{Commands, SessionAction};
use crate::config::Config;
use crate::core::AssignLogic;
use crate::core::auth::{Authorizer, require_admin};
use crate::db::sessions;
use crate::errors::{AppError, AppResult};
use crate::models::Session;
use crate::ui::messages::{info, success};
use crate::utils::date::{month_bounds, today};
use crate::utils::formatting::{confirmation_label, describe_day};
use crate::utils::table::Table;

pub(crate) fn sessions_table(list: &[Session], auth: &dyn Authorizer) -> Table {
    let mut table = Table::with_headers(&["ID", "Day", "Time", "Topic", "Trainer", "Confirmed"]);
    for s in list {
        let trainer = s
            .assigned_trainer_id
            .map(|id| auth.display_name(id).unwrap_or_else(|| format!("#{id}")))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            s.id.to_string(),
            describe_day(s.date),
            s.time_range(),
            s.topic.clone(),
            trainer,
            confirmation_label(s).to_string(),
        ]);
    }
    table
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session { action } = cmd {
        let mut pool = open_pool(cfg)?;
        let auth = authorizer(&pool, cfg)?;

        match action {
            SessionAction::List { month, json } => {
                let (year, month) = month_or_current(month.as_deref())?;
                let (first, last) = month_bounds(year, month).ok_or(AppError::InvalidYear(year))?;
                let list = sessions::load_in_range(&pool.conn, first, last)?;

                if *json {
                    println!("{}", serde_json::to_string_pretty(&list)?);
                } else if list.is_empty() {
                    info(format!("No sessions planned for {year}-{month:02}."));
                } else {
                    print!("{}", sessions_table(&list, &auth).render());
                }
            }
            SessionAction::Upcoming { limit } => {
                let list = sessions::load_upcoming(&pool.conn, today(), *limit)?;
                if list.is_empty() {
                    info("No upcoming sessions.");
                } else {
                    print!("{}", sessions_table(&list, &auth).render());
                }
            }
            SessionAction::Del { id, yes } => {
                require_admin(&auth, "deleting sessions")?;

                let Some(session) = sessions::find_session(&pool.conn, *id)? else {
                    info(format!("Session #{id} does not exist, nothing to delete."));
                    return Ok(());
                };

                let prompt = format!(
                    "Delete session #{} ({} {}, {})? This action is irreversible.",
                    session.id,
                    describe_day(session.date),
                    session.time_range(),
                    session.topic
                );
                if !*yes && !ask_confirmation(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }

                if AssignLogic::delete_session(&mut pool, *id)? {
                    success(format!("Session #{id} deleted."));
                }
            }
        }
    }

    Ok(())
}
