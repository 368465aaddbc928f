// Date utility functions
// Monday-first calendar arithmetic over naive local dates

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

/// Format used for every persisted date field and note key.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// First day of the month, `month0` being 0-based (0 = January).
///
/// Out-of-range months roll into the neighbouring years the way calendar
/// arithmetic does, so `month0 = 12` is January of the next year and
/// `month0 = -1` is December of the previous one. Years chrono cannot
/// represent are clamped to the nearest supported one.
pub fn first_of_month(year: i32, month0: i32) -> NaiveDate {
    let requested = year.saturating_add(month0.div_euclid(12));
    let month = month0.rem_euclid(12) as u32 + 1;

    let year = requested.clamp(NaiveDate::MIN.year(), NaiveDate::MAX.year());
    if year != requested {
        log::warn!("Year {} is out of range, clamped to {}", requested, year);
    }

    let bound = if year > 0 { NaiveDate::MAX } else { NaiveDate::MIN };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(bound)
}

/// Number of days in the month: day 0 of the following month.
pub fn days_in_month(year: i32, month0: i32) -> u32 {
    let next = first_of_month(year, month0 + 1);
    next.pred_opt().map(|last| last.day()).unwrap_or(31)
}

/// Blank cells needed before the 1st so it lands in its Monday-first column.
pub fn first_weekday_offset(year: i32, month0: i32) -> u32 {
    weekday_offset(first_of_month(year, month0).weekday())
}

/// Column of a weekday in a Monday-first week (Sunday is 6).
pub fn weekday_offset(weekday: Weekday) -> u32 {
    match weekday.num_days_from_sunday() {
        0 => 6,
        day => day - 1,
    }
}

/// `YYYY-MM-DD`, zero padded.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Inverse of [`date_key`]; used where keys cross the persistence boundary.
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .with_context(|| format!("Invalid date key '{}'", key))
}

pub fn is_same_calendar_day(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// The Monday..Sunday week containing `date`.
pub fn monday_week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Duration::days(weekday_offset(date.weekday()) as i64);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Whole days between two dates regardless of order.
///
/// Naive dates have no sub-day component, so the ceiling of the absolute
/// difference is just the absolute day count.
pub fn day_span(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Signed day difference `b - a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Day 1 of the month `delta` months away from the month containing `date`.
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta as u32))
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case(2024, 1, 29 ; "leap february")]
    #[test_case(2023, 1, 28 ; "common february")]
    #[test_case(2024, 0, 31 ; "january")]
    #[test_case(2024, 3, 30 ; "april")]
    #[test_case(2024, 11, 31 ; "december")]
    #[test_case(1900, 1, 28 ; "century non leap")]
    #[test_case(2000, 1, 29 ; "quad century leap")]
    fn test_days_in_month(year: i32, month0: i32, expected: u32) {
        assert_eq!(days_in_month(year, month0), expected);
    }

    #[test_case(2024, 8, 6 ; "september 2024 starts on sunday")]
    #[test_case(2024, 6, 0 ; "july 2024 starts on monday")]
    #[test_case(2024, 4, 2 ; "may 2024 starts on wednesday")]
    #[test_case(2024, 1, 3 ; "february 2024 starts on thursday")]
    fn test_first_weekday_offset(year: i32, month0: i32, expected: u32) {
        assert_eq!(first_weekday_offset(year, month0), expected);
    }

    #[test]
    fn test_first_of_month_normalizes_overflow() {
        assert_eq!(first_of_month(2024, 12), ymd(2025, 1, 1));
        assert_eq!(first_of_month(2024, -1), ymd(2023, 12, 1));
    }

    #[test]
    fn test_first_of_month_clamps_unsupported_years() {
        let max_year = NaiveDate::MAX.year();
        let min_year = NaiveDate::MIN.year();

        assert_eq!(first_of_month(i32::MAX, 5), ymd(max_year, 6, 1));
        assert_eq!(first_of_month(max_year, 12), ymd(max_year, 1, 1));
        assert_eq!(first_of_month(i32::MIN, 0), ymd(min_year, 1, 1));
        assert_eq!(first_of_month(min_year - 1, 1), ymd(min_year, 2, 1));
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        assert_eq!(date_key(ymd(2024, 3, 1)), "2024-03-01");
        assert_eq!(date_key(ymd(987, 11, 9)), "0987-11-09");
    }

    #[test]
    fn test_parse_date_key() {
        assert_eq!(parse_date_key("2024-03-10").unwrap(), ymd(2024, 3, 10));
        assert!(parse_date_key("2024-13-01").is_err());
        assert!(parse_date_key("not a date").is_err());
    }

    #[test]
    fn test_is_same_calendar_day() {
        assert!(is_same_calendar_day(ymd(2024, 3, 1), ymd(2024, 3, 1)));
        assert!(!is_same_calendar_day(ymd(2024, 3, 1), ymd(2023, 3, 1)));
    }

    #[test]
    fn test_monday_week_of_sunday() {
        let week = monday_week_of(ymd(2024, 3, 3));
        assert_eq!(week[0], ymd(2024, 2, 26));
        assert_eq!(week[6], ymd(2024, 3, 3));
        assert_eq!(week[0].weekday(), Weekday::Mon);
    }

    #[test]
    fn test_monday_week_of_monday_is_anchor() {
        let week = monday_week_of(ymd(2024, 3, 4));
        assert_eq!(week[0], ymd(2024, 3, 4));
        assert_eq!(week[6], ymd(2024, 3, 10));
    }

    #[test]
    fn test_day_span_ignores_order() {
        assert_eq!(day_span(ymd(2024, 3, 1), ymd(2024, 3, 3)), 2);
        assert_eq!(day_span(ymd(2024, 3, 3), ymd(2024, 3, 1)), 2);
        assert_eq!(days_between(ymd(2024, 3, 3), ymd(2024, 3, 1)), -2);
    }

    #[test]
    fn test_add_months_lands_on_first() {
        assert_eq!(add_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 1));
        assert_eq!(add_months(ymd(2024, 1, 15), -1), ymd(2023, 12, 1));
    }
}
