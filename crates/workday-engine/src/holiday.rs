//! Holiday rules.
//!
//! A [`HolidayRule`] is a predicate over calendar dates. Two kinds exist:
//!
//! - [`HolidayRule::Fixed`]: one specific date (e.g. 27 May 2004)
//! - [`HolidayRule::Recurring`]: a month/day that repeats every year (e.g. 17 May)
//!
//! Rules are validated on construction, so [`HolidayRule::matches`] never fails.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Result, WorkdayError};

/// Leap year used to check that a recurring month/day exists in at least one year.
const LEAP_YEAR: i32 = 2000;

/// A rule that marks calendar dates as holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HolidayRule {
    /// A single calendar date.
    Fixed { date: NaiveDate },
    /// The same month and day in every year.
    Recurring { month: u32, day: u32 },
}

impl HolidayRule {
    /// Build a one-off holiday on `year-month-day`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::InvalidHoliday`] if the date does not exist
    /// (e.g. 31 April, or 29 February in a non-leap year).
    pub fn fixed(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| HolidayRule::Fixed { date })
            .ok_or_else(|| {
                WorkdayError::InvalidHoliday(format!(
                    "{year:04}-{month:02}-{day:02} is not a calendar date"
                ))
            })
    }

    /// Build a holiday that recurs on `month`/`day` every year.
    ///
    /// 29 February is accepted; it only matches in leap years.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::InvalidHoliday`] if no year has that month/day.
    pub fn recurring(month: u32, day: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(LEAP_YEAR, month, day).is_none() {
            return Err(WorkdayError::InvalidHoliday(format!(
                "--{month:02}-{day:02} is not a valid month/day"
            )));
        }
        Ok(HolidayRule::Recurring { month, day })
    }

    /// Whether `date` falls on this holiday.
    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            HolidayRule::Fixed { date: holiday } => holiday == date,
            HolidayRule::Recurring { month, day } => date.month() == month && date.day() == day,
        }
    }
}

impl fmt::Display for HolidayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayRule::Fixed { date } => write!(f, "{}", date.format("%Y-%m-%d")),
            HolidayRule::Recurring { month, day } => write!(f, "--{month:02}-{day:02}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_matches_only_its_date() {
        let rule = HolidayRule::fixed(2004, 5, 27).unwrap();
        assert!(rule.matches(date(2004, 5, 27)));
        assert!(!rule.matches(date(2005, 5, 27)));
        assert!(!rule.matches(date(2004, 5, 28)));
    }

    #[test]
    fn test_recurring_matches_every_year() {
        let rule = HolidayRule::recurring(5, 17).unwrap();
        assert!(rule.matches(date(2004, 5, 17)));
        assert!(rule.matches(date(1999, 5, 17)));
        assert!(!rule.matches(date(2004, 5, 18)));
        assert!(!rule.matches(date(2004, 6, 17)));
    }

    #[test]
    fn test_recurring_leap_day_only_matches_leap_years() {
        let rule = HolidayRule::recurring(2, 29).unwrap();
        assert!(rule.matches(date(2004, 2, 29)));
        // 2003 has no 29 Feb; neighbouring days are not affected
        assert!(!rule.matches(date(2003, 2, 28)));
        assert!(!rule.matches(date(2003, 3, 1)));
    }

    #[test]
    fn test_fixed_rejects_impossible_dates() {
        let err = HolidayRule::fixed(2004, 4, 31).unwrap_err();
        assert!(matches!(err, WorkdayError::InvalidHoliday(_)));
        assert!(err.to_string().contains("2004-04-31"), "got: {err}");

        assert!(HolidayRule::fixed(2003, 2, 29).is_err());
        assert!(HolidayRule::fixed(2004, 13, 1).is_err());
        assert!(HolidayRule::fixed(2004, 1, 0).is_err());
    }

    #[test]
    fn test_recurring_rejects_impossible_month_day() {
        assert!(HolidayRule::recurring(4, 31).is_err());
        assert!(HolidayRule::recurring(2, 30).is_err());
        assert!(HolidayRule::recurring(0, 1).is_err());
        assert!(HolidayRule::recurring(12, 32).is_err());
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(
            HolidayRule::fixed(2004, 5, 27).unwrap(),
            HolidayRule::fixed(2004, 5, 27).unwrap()
        );
        assert_eq!(
            HolidayRule::recurring(5, 17).unwrap(),
            HolidayRule::recurring(5, 17).unwrap()
        );
        // Same month/day, different kind
        assert_ne!(
            HolidayRule::fixed(2004, 5, 17).unwrap(),
            HolidayRule::recurring(5, 17).unwrap()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(HolidayRule::fixed(2004, 5, 27).unwrap().to_string(), "2004-05-27");
        assert_eq!(HolidayRule::recurring(5, 7).unwrap().to_string(), "--05-07");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&HolidayRule::recurring(5, 17).unwrap()).unwrap();
        assert_eq!(json, r#"{"kind":"recurring","month":5,"day":17}"#);

        let json = serde_json::to_string(&HolidayRule::fixed(2004, 5, 27).unwrap()).unwrap();
        assert_eq!(json, r#"{"kind":"fixed","date":"2004-05-27"}"#);
    }
}
