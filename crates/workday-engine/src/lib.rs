//! # workday-engine
//!
//! Working-day arithmetic over a configurable calendar.
//!
//! Given a starting timestamp and a signed, fractional number of working days
//! (`+0.25`, `-6.747`), the engine walks through the valid workday windows of a
//! calendar and returns the exact timestamp the offset lands on. Weekends and
//! registered holidays are skipped; one working day is the length of the
//! configured workday window.
//!
//! ## Modules
//!
//! - [`holiday`] — Fixed-date and yearly-recurring holiday rules
//! - [`calendar`] — Workday window, workday classification, offset resolution
//! - [`config`] — JSON calendar configuration
//! - [`error`] — Error types
//!
//! ```
//! use chrono::NaiveDate;
//! use workday_engine::WorkdayCalendar;
//!
//! let anchor = NaiveDate::from_ymd_opt(2004, 6, 1)
//!     .unwrap()
//!     .and_hms_opt(15, 7, 0)
//!     .unwrap();
//! let calendar = WorkdayCalendar::new(anchor);
//!
//! // 0.25 of an 8h day is 2h: 53 minutes today, the rest tomorrow morning.
//! let resolved = calendar.calculate_workday_offset(0.25).unwrap();
//! assert_eq!(resolved.to_string(), "2004-06-02 09:07:00");
//! ```

pub mod calendar;
pub mod config;
pub mod error;
pub mod holiday;

pub use calendar::{Direction, WorkdayCalendar, WorkdayWindow};
pub use config::{parse_time_of_day, CalendarConfig, HolidaySpec};
pub use error::{Result, WorkdayError};
pub use holiday::HolidayRule;
