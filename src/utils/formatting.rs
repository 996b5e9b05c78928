//! Formatting utilities used for CLI outputs.

use crate::models::Session;
use chrono::NaiveDate;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// "Wed 03.04.2024"
pub fn describe_day(date: NaiveDate) -> String {
    date.format("%a %d.%m.%Y").to_string()
}

/// "yes" / "no" / "-" for the confirmation column.
pub fn confirmation_label(session: &Session) -> &'static str {
    if session.assigned_trainer_id.is_none() {
        "-"
    } else if session.is_confirmed() {
        "yes"
    } else {
        "no"
    }
}
