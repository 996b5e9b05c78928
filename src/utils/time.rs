//! Time utilities: parsing and formatting of HH:MM values.

use chrono::NaiveTime;

/// Accepts "HH:MM" and the "HH:MM:SS" form older rows may carry.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}
