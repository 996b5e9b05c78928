//! Weekly session template.
//!
//! Maps a calendar date to the sessions the program runs that day. The
//! template has a summer variant (April to September) and a winter variant
//! (October to March); only Wednesday, Friday and Saturday carry sessions.

use crate::models::SessionDef;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

pub const TOPIC_YOUTH: &str = "Jugend-Training";
pub const TOPIC_ADULTS: &str = "Erwachsenen-Training";
pub const TOPIC_FREE_PLAY: &str = "Freies Spiel";
pub const TOPIC_OPEN: &str = "Offen";

const fn hm(hour: u32, min: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, 0) {
        Some(t) => t,
        None => panic!("invalid template time"),
    }
}

const WEDNESDAY_SUMMER: &[SessionDef] = &[
    SessionDef::new(hm(17, 30), hm(19, 30), TOPIC_YOUTH),
    SessionDef::new(hm(19, 30), hm(22, 0), TOPIC_FREE_PLAY),
];
const WEDNESDAY_WINTER: &[SessionDef] = &[SessionDef::new(hm(20, 0), hm(22, 0), TOPIC_FREE_PLAY)];

const FRIDAY_SUMMER: &[SessionDef] = &[
    SessionDef::new(hm(17, 30), hm(19, 30), TOPIC_YOUTH),
    SessionDef::new(hm(19, 30), hm(22, 0), TOPIC_ADULTS),
];
const FRIDAY_WINTER: &[SessionDef] = &[
    SessionDef::new(hm(17, 0), hm(19, 0), TOPIC_YOUTH),
    SessionDef::new(hm(20, 30), hm(22, 15), TOPIC_ADULTS),
];

const SATURDAY_SUMMER: &[SessionDef] = &[SessionDef::new(hm(10, 0), hm(12, 0), TOPIC_OPEN)];
const SATURDAY_WINTER: &[SessionDef] = &[SessionDef::new(hm(10, 0), hm(12, 0), TOPIC_YOUTH)];

/// Summer runs from April through September.
pub fn is_summer(month: u32) -> bool {
    (4..=9).contains(&month)
}

/// Sessions scheduled on `date`, in start-time order. Empty for days
/// without training.
pub fn resolve(date: NaiveDate) -> &'static [SessionDef] {
    let summer = is_summer(date.month());

    match (date.weekday(), summer) {
        (Weekday::Wed, true) => WEDNESDAY_SUMMER,
        (Weekday::Wed, false) => WEDNESDAY_WINTER,
        (Weekday::Fri, true) => FRIDAY_SUMMER,
        (Weekday::Fri, false) => FRIDAY_WINTER,
        (Weekday::Sat, true) => SATURDAY_SUMMER,
        (Weekday::Sat, false) => SATURDAY_WINTER,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summary(defs: &[SessionDef]) -> Vec<String> {
        defs.iter()
            .map(|d| format!("{}-{} {}", d.start.format("%H:%M"), d.end.format("%H:%M"), d.topic))
            .collect()
    }

    #[test]
    fn season_boundaries() {
        assert!(!is_summer(3));
        assert!(is_summer(4));
        assert!(is_summer(9));
        assert!(!is_summer(10));
        assert!(!is_summer(1));
        assert!(!is_summer(12));
    }

    #[test]
    fn wednesday_summer_and_winter() {
        // 2024-04-03 and 2024-11-06 are Wednesdays
        assert_eq!(
            summary(resolve(day(2024, 4, 3))),
            vec!["17:30-19:30 Jugend-Training", "19:30-22:00 Freies Spiel"]
        );
        assert_eq!(summary(resolve(day(2024, 11, 6))), vec!["20:00-22:00 Freies Spiel"]);
    }

    #[test]
    fn friday_summer_and_winter() {
        assert_eq!(
            summary(resolve(day(2024, 4, 5))),
            vec!["17:30-19:30 Jugend-Training", "19:30-22:00 Erwachsenen-Training"]
        );
        assert_eq!(
            summary(resolve(day(2024, 11, 1))),
            vec!["17:00-19:00 Jugend-Training", "20:30-22:15 Erwachsenen-Training"]
        );
    }

    #[test]
    fn saturday_summer_and_winter() {
        assert_eq!(summary(resolve(day(2024, 4, 6))), vec!["10:00-12:00 Offen"]);
        assert_eq!(summary(resolve(day(2024, 11, 2))), vec!["10:00-12:00 Jugend-Training"]);
    }

    #[test]
    fn other_weekdays_are_empty() {
        // Mon 2024-04-01 .. Tue, Thu, Sun
        for d in [1, 2, 4, 7] {
            assert!(resolve(day(2024, 4, d)).is_empty(), "2024-04-{d:02}");
        }
    }

    #[test]
    fn season_switches_on_month_boundary() {
        // 2024-03-30 is a Saturday (winter), 2024-04-06 the next one (summer)
        assert_eq!(resolve(day(2024, 3, 30))[0].topic, TOPIC_YOUTH);
        assert_eq!(resolve(day(2024, 4, 6))[0].topic, TOPIC_OPEN);
    }
}
