//! Date utilities: month arithmetic.

use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Current (year, month) in local time.
pub fn current_year_month() -> (i32, u32) {
    let t = today();
    (t.year(), t.month())
}

/// Number of days in a Gregorian month, or None for an invalid month/year.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    month_bounds(year, month).map(|(_, last)| last.day())
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

/// Every day of the month in order; empty for an invalid month/year.
pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(days) = days_in_month(year, month) else {
        return Vec::new();
    };
    (1..=days).filter_map(|d| NaiveDate::from_ymd_opt(year, month, d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years_follow_gregorian_rules() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(2024, 0), None);
    }

    #[test]
    fn all_days_cover_the_month() {
        let days = all_days_of_month(2024, 2);
        assert_eq!(days.len(), 29);
        assert_eq!(days.first().map(|d| d.day()), Some(1));
        assert_eq!(days.last().map(|d| d.day()), Some(29));

        assert_eq!(all_days_of_month(2023, 2).len(), 28);
        assert_eq!(all_days_of_month(2024, 4).len(), 30);
        assert!(all_days_of_month(2024, 13).is_empty());
    }
}
