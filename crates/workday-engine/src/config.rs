//! Calendar configuration.
//!
//! A calendar can be described as a JSON document and built against an anchor:
//!
//! ```json
//! {
//!   "workday_start": "08:00",
//!   "workday_end": "16:00",
//!   "holidays": [
//!     { "date": "2004-05-27" },
//!     { "month": 5, "day": 17 }
//!   ]
//! }
//! ```
//!
//! Every field is optional. [`CalendarConfig::from_json`] rejects malformed
//! entries: unknown keys, holidays that are neither `date` nor `month`/`day`,
//! and fixed dates that do not exist. Window order, time-of-day syntax and
//! recurring month/day pairs are checked by [`CalendarConfig::build`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::calendar::{WorkdayCalendar, WorkdayWindow};
use crate::error::{Result, WorkdayError};
use crate::holiday::HolidayRule;

/// A holiday entry in a calendar document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawHoliday")]
pub enum HolidaySpec {
    /// `{ "date": "2004-05-27" }`
    Fixed { date: NaiveDate },
    /// `{ "month": 5, "day": 17 }`
    Recurring { month: u32, day: u32 },
}

/// A holiday entry as written, before deciding which kind it is.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHoliday {
    date: Option<NaiveDate>,
    month: Option<u32>,
    day: Option<u32>,
}

impl TryFrom<RawHoliday> for HolidaySpec {
    type Error = String;

    fn try_from(raw: RawHoliday) -> std::result::Result<Self, Self::Error> {
        match (raw.date, raw.month, raw.day) {
            (Some(date), None, None) => Ok(HolidaySpec::Fixed { date }),
            (None, Some(month), Some(day)) => Ok(HolidaySpec::Recurring { month, day }),
            _ => Err("holiday needs either `date` or both `month` and `day`".to_string()),
        }
    }
}

impl HolidaySpec {
    /// Validate into a [`HolidayRule`].
    pub fn to_rule(&self) -> Result<HolidayRule> {
        match *self {
            // Already a real date by construction
            HolidaySpec::Fixed { date } => Ok(HolidayRule::Fixed { date }),
            HolidaySpec::Recurring { month, day } => HolidayRule::recurring(month, day),
        }
    }
}

/// Workday window and holidays, as read from a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    #[serde(default = "default_workday_start")]
    pub workday_start: String,

    #[serde(default = "default_workday_end")]
    pub workday_end: String,

    #[serde(default)]
    pub holidays: Vec<HolidaySpec>,
}

fn default_workday_start() -> String {
    "08:00".to_string()
}

fn default_workday_end() -> String {
    "16:00".to_string()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            workday_start: default_workday_start(),
            workday_end: default_workday_end(),
            holidays: Vec::new(),
        }
    }
}

impl CalendarConfig {
    /// Parse a JSON calendar document.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::InvalidConfig`] if the document is not valid JSON
    /// or does not have the expected shape.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WorkdayError::InvalidConfig(e.to_string()))
    }

    /// The configured workday window.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::InvalidWindow`] if either time cannot be parsed
    /// or the start is not before the end.
    pub fn window(&self) -> Result<WorkdayWindow> {
        let start = parse_time_of_day(&self.workday_start)?;
        let end = parse_time_of_day(&self.workday_end)?;
        WorkdayWindow::new(start, end)
    }

    /// Build a calendar anchored at `anchor`, with holidays registered in
    /// document order. Duplicate holidays are registered once.
    ///
    /// # Errors
    ///
    /// Returns the first window or holiday validation error.
    pub fn build(&self, anchor: NaiveDateTime) -> Result<WorkdayCalendar> {
        let mut calendar = WorkdayCalendar::with_window(anchor, self.window()?);
        for spec in &self.holidays {
            calendar.add_holiday(spec.to_rule()?);
        }
        Ok(calendar)
    }
}

/// Parse a time of day given as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns [`WorkdayError::InvalidWindow`] for anything else.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| {
            WorkdayError::InvalidWindow(format!("'{s}' is not a time of day (expected HH:MM)"))
        })
}
