use crate::cli::commands::{authorizer, month_or_current, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AvailabilityLogic;
use crate::core::auth::{Authorizer, require_admin};
use crate::db::{availability, plans, sessions};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_optional;
use crate::utils::date::month_bounds;
use crate::utils::formatting::{bold, confirmation_label, describe_day};

const AVAILABILITY_WIDTH: usize = 72;

/// Admin planning view: each session with its assignee and all votes.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Plan { month } = cmd {
        let (year, month) = month_or_current(month.as_deref())?;
        let (first, last) = month_bounds(year, month).ok_or(AppError::InvalidYear(year))?;

        let pool = open_pool(cfg)?;
        let auth = authorizer(&pool, cfg)?;
        require_admin(&auth, "the planning view")?;

        let state = match plans::find_plan(&pool.conn, year, month)? {
            Some(p) if p.is_published => "published",
            Some(_) => "draft",
            None => "not generated",
        };
        header(format!("Plan {year}-{month:02} ({state})"));

        let list = sessions::load_in_range(&pool.conn, first, last)?;
        if list.is_empty() {
            info(format!("No sessions for {year}-{month:02}. Run `tplanner generate {year}-{month:02}` first."));
            return Ok(());
        }

        for s in &list {
            let trainer = s
                .assigned_trainer_id
                .map(|id| auth.display_name(id).unwrap_or_else(|| format!("#{id}")))
                .unwrap_or_else(|| "-".to_string());

            println!(
                "{} {}  {}  {}",
                bold(&format!("#{}", s.id)),
                describe_day(s.date),
                s.time_range(),
                s.topic
            );
            println!(
                "    Trainer: {}   Confirmed: {}",
                colorize_optional(&trainer),
                confirmation_label(s)
            );

            let votes = AvailabilityLogic::overview_for_session(&pool, s.id, |id| auth.display_name(id))?;
            let text = if votes.is_empty() {
                "-".to_string()
            } else {
                votes
                    .iter()
                    .map(|v| format!("{} ({})", v.name, v.status))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let options = textwrap::Options::new(AVAILABILITY_WIDTH)
                .initial_indent("    Available: ")
                .subsequent_indent("               ");
            for line in textwrap::wrap(&text, options) {
                println!("{}", colorize_optional(&line));
            }
        }

        let submitted: Vec<String> = availability::submitted_users(&pool.conn, year, month)?
            .into_iter()
            .map(|id| auth.display_name(id).unwrap_or_else(|| format!("#{id}")))
            .collect();
        println!();
        if submitted.is_empty() {
            info("No availability submitted for this month yet.");
        } else {
            info(format!("Submitted: {}", submitted.join(", ")));
        }
    }

    Ok(())
}
