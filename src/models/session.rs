use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use crate::utils::time::format_time;
use serde::Serialize;

/// Length assumed for sessions stored without an end time.
pub const DEFAULT_SESSION_HOURS: i64 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: i64,
    pub date: NaiveDate,            // ⇔ sessions.date (TEXT "YYYY-MM-DD")
    pub start_time: NaiveTime,      // ⇔ sessions.time (TEXT "HH:MM")
    pub end_time: Option<NaiveTime>, // ⇔ sessions.end_time (NULL on legacy rows)
    pub location: String,
    pub topic: String,
    pub assigned_trainer_id: Option<i64>,
    pub assignment_confirmed: bool,
}

impl Session {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// End of the session; rows without an end time last two hours.
    /// An end time at or before the start is taken to be on the next day.
    pub fn end(&self) -> NaiveDateTime {
        let start = self.start();
        match self.end_time {
            Some(t) => {
                let end = self.date.and_time(t);
                if end <= start {
                    end + Duration::days(1)
                } else {
                    end
                }
            }
            None => start + Duration::hours(DEFAULT_SESSION_HOURS),
        }
    }

    /// "HH:MM - HH:MM", or "HH:MM - --:--" when no end time is stored.
    pub fn time_range(&self) -> String {
        let end = self.end_time.map(format_time).unwrap_or_else(|| "--:--".to_string());
        format!("{} - {}", format_time(self.start_time), end)
    }

    /// Confirmation only counts while somebody is assigned.
    pub fn is_confirmed(&self) -> bool {
        self.assigned_trainer_id.is_some() && self.assignment_confirmed
    }

    pub fn is_assigned_to(&self, user_id: i64) -> bool {
        self.assigned_trainer_id == Some(user_id)
    }
}

/// Insert payload for a session row; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub location: String,
    pub topic: String,
}
