//! Calendar date helpers.
//!
//! Everything here works on [`NaiveDate`], i.e. local calendar days with no
//! time-of-day and no offset. Day distances are calendar differences, so they
//! are unaffected by daylight-saving transitions.

use crate::error::{Error, Result};
use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Format of a date key.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` key for a calendar date.
///
/// Zero padded, so lexicographic order matches calendar order.
pub fn to_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a date key back into a calendar date.
///
/// Only canonical keys are accepted: `"2024-6-12"` parses as a date but is
/// rejected, since lookups by [`to_date_key`] would never find it.
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(key, DATE_KEY_FORMAT) {
        Ok(date) if to_date_key(date) == key => Ok(date),
        _ => Err(Error::InvalidDateKey(key.to_string())),
    }
}

/// Absolute number of calendar days between two dates.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Shift a date by `n` calendar days (`n` may be negative).
///
/// Saturates at the ends of chrono's supported range instead of panicking.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date.checked_add_signed(chrono::Duration::days(n))
        .unwrap_or(if n < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Short English weekday label ("Sun", "Mon", ...).
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// Latest date on or before `date` that falls on `week_start`.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_sunday() - week_start.num_days_from_sunday()) % 7;
    add_days(date, -(back as i64))
}

/// Today's date on the local wall clock.
///
/// Only binaries call this; library code takes "today" as a parameter.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_key_round_trip() {
        let d = date(2024, 3, 9);
        assert_eq!(to_date_key(d), "2024-03-09");
        assert_eq!(parse_date_key("2024-03-09").unwrap(), d);
        assert!(matches!(
            parse_date_key("2024-3-9x"),
            Err(Error::InvalidDateKey(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unpadded_keys() {
        for key in ["2024-6-12", "2024-06-1", "24-06-12", " 2024-06-12", "2024-02-30"] {
            assert!(
                matches!(parse_date_key(key), Err(Error::InvalidDateKey(_))),
                "{key} should be rejected"
            );
        }
        assert_eq!(parse_date_key("2024-06-12").unwrap(), date(2024, 6, 12));
    }

    #[test]
    fn test_date_keys_sort_chronologically() {
        let mut keys = vec![
            to_date_key(date(2024, 10, 1)),
            to_date_key(date(2024, 9, 30)),
            to_date_key(date(2023, 12, 31)),
        ];
        keys.sort();
        assert_eq!(keys, vec!["2023-12-31", "2024-09-30", "2024-10-01"]);
    }

    #[test]
    fn test_days_between_is_symmetric() {
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 2, 28)), 2);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 3, 1)), 0);
    }

    #[test]
    fn test_days_between_across_dst_change() {
        // US and EU spring-forward weekends
        assert_eq!(days_between(date(2024, 3, 10), date(2024, 3, 9)), 1);
        assert_eq!(days_between(date(2024, 3, 31), date(2024, 3, 30)), 1);
        assert_eq!(days_between(date(2024, 11, 3), date(2024, 11, 2)), 1);
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(add_days(date(2024, 3, 1), -1), date(2024, 2, 29));
        assert_eq!(add_days(date(2024, 12, 31), 1), date(2025, 1, 1));
        assert_eq!(add_days(NaiveDate::MIN, -1), NaiveDate::MIN);
    }

    #[test]
    fn test_weekday_label() {
        // 2024-01-07 was a Sunday
        assert_eq!(weekday_label(date(2024, 1, 7)), "Sun");
        assert_eq!(weekday_label(date(2024, 1, 13)), "Sat");
    }

    #[test]
    fn test_start_of_week() {
        // Wednesday 2024-01-10
        let wed = date(2024, 1, 10);
        assert_eq!(start_of_week(wed, Weekday::Sun), date(2024, 1, 7));
        assert_eq!(start_of_week(wed, Weekday::Mon), date(2024, 1, 8));
        assert_eq!(start_of_week(wed, Weekday::Wed), wed);
        assert_eq!(start_of_week(wed, Weekday::Thu), date(2024, 1, 4));
    }
}
