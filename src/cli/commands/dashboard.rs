use crate::cli::commands::{authorizer, month_or_current, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AvailabilityLogic;
use crate::core::auth::require_login;
use crate::db::{plans, sessions};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::date::month_bounds;
use crate::utils::formatting::describe_day;
use crate::utils::table::Table;
use std::collections::HashMap;

/// Trainer view of one month: every session with the trainer's own vote
/// and their assignments.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard { month } = cmd {
        let (year, month) = month_or_current(month.as_deref())?;
        let (first, last) = month_bounds(year, month).ok_or(AppError::InvalidYear(year))?;

        let pool = open_pool(cfg)?;
        let auth = authorizer(&pool, cfg)?;
        let user_id = require_login(&auth)?;

        header(format!("Training plan {year}-{month:02}"));

        let list = sessions::load_in_range(&pool.conn, first, last)?;
        if list.is_empty() {
            info("No sessions planned for this month.");
            return Ok(());
        }

        let published = plans::find_plan(&pool.conn, year, month)?.is_some_and(|p| p.is_published);
        let votes: HashMap<i64, _> = AvailabilityLogic::entries_for_month(&pool, user_id, year, month)?
            .into_iter()
            .map(|e| (e.session_id, e.status))
            .collect();

        let mut table = Table::with_headers(&["ID", "Day", "Time", "Topic", "My answer", "Assignment"]);
        let mut colors = Vec::with_capacity(list.len());
        for s in &list {
            let vote = votes.get(&s.id).copied();
            let assignment = if !s.is_assigned_to(user_id) {
                String::new()
            } else if s.is_confirmed() {
                "assigned (confirmed)".to_string()
            } else {
                format!("assigned → tplanner confirm {}", s.id)
            };

            table.add_row(vec![
                s.id.to_string(),
                describe_day(s.date),
                s.time_range(),
                s.topic.clone(),
                vote.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()),
                assignment,
            ]);
            colors.push(color_for_status(vote));
        }

        // colour each session row by the trainer's answer
        let rendered = table.render();
        for (i, line) in rendered.lines().enumerate() {
            match i.checked_sub(2).and_then(|row| colors.get(row)) {
                Some(color) => println!("{color}{line}{RESET}"),
                None => println!("{line}"),
            }
        }

        println!();
        if !published {
            info("The plan for this month is not published yet.");
        }
        if !AvailabilityLogic::has_submitted(&pool, user_id, year, month)? {
            info("You have not submitted your availability for this month yet.");
        }
    }

    Ok(())
}
