//! Workday calendar and fractional workday offset resolution.
//!
//! A [`WorkdayCalendar`] owns a daily [`WorkdayWindow`] (e.g. 08:00–16:00), a set
//! of [`HolidayRule`]s, and an anchor timestamp. One "working day" is the length
//! of the window, so with the default window `0.25` working days is two hours of
//! work time.
//!
//! # Resolution
//!
//! [`WorkdayCalendar::calculate_workday_offset`] converts a signed, fractional
//! day count into an absolute timestamp:
//!
//! 1. The anchor is snapped onto a workday window, moving only in the direction
//!    of travel (see [`WorkdayCalendar::snap_to_boundary`]).
//! 2. Work time is consumed window by window. When the remainder fits in the
//!    current window, the result lies inside it; otherwise the next (or previous)
//!    workday is entered at its start (or end) edge.
//!
//! Work time is tracked in floating-point seconds. Remainders below one
//! microsecond are treated as consumed, so results should be compared at
//! minute precision.
//!
//! # Boundary instants
//!
//! The window is half-open, `[start, end)`. On a workday, any time in that
//! interval is kept as the starting point in either direction. Travelling
//! forward, exactly `end` is already past the window and moves to the next
//! workday's `start`. Travelling backward, `end` itself is also kept. A
//! backward walk from a workday's exact `start` has nothing left in that
//! window, so the first step rolls into the previous workday's `end`.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::{debug, trace};

use crate::error::{Result, WorkdayError};
use crate::holiday::HolidayRule;

/// Residual work time, in seconds, that counts as fully consumed.
const EPSILON_SECONDS: f64 = 1e-6;

// ── Workday window ──────────────────────────────────────────────────────────

/// The daily interval `[start, end)` during which work time accrues.
///
/// Workdays never span midnight: `start` is always strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkdayWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkdayWindow {
    /// Build a window from its start and end time of day.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::InvalidWindow`] unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(WorkdayError::InvalidWindow(format!(
                "start {start} must be before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of one working day.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length of one working day, in seconds.
    pub fn duration_seconds(&self) -> f64 {
        seconds_f64(self.duration())
    }

    /// Whether `time` lies in `[start, end)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }

    /// The edge a window is entered from when travelling in `direction`.
    fn entry(&self, direction: Direction) -> NaiveTime {
        match direction {
            Direction::Forward => self.start,
            Direction::Backward => self.end,
        }
    }
}

impl Default for WorkdayWindow {
    /// 08:00–16:00.
    fn default() -> Self {
        Self {
            start: time_of_day(8, 0),
            end: time_of_day(16, 0),
        }
    }
}

// ── Direction ───────────────────────────────────────────────────────────────

/// Direction of travel through the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// `Forward` for positive offsets, `Backward` otherwise.
    ///
    /// Zero maps to `Backward`. [`WorkdayCalendar::offset_from`] returns
    /// early on a zero offset and never asks for its direction.
    pub fn from_offset(offset_days: f64) -> Self {
        if offset_days > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// `+1` or `-1`.
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

// ── WorkdayCalendar ─────────────────────────────────────────────────────────

/// A workday window, a holiday set, and an anchor timestamp.
///
/// The anchor is the default starting point for
/// [`calculate_workday_offset`](Self::calculate_workday_offset) and may be
/// replaced between calls. Callers sharing one calendar across queries can use
/// [`offset_from`](Self::offset_from) instead, which leaves the calendar untouched.
#[derive(Debug, Clone)]
pub struct WorkdayCalendar {
    anchor: NaiveDateTime,
    window: WorkdayWindow,
    holidays: Vec<HolidayRule>,
}

impl WorkdayCalendar {
    /// A calendar with the default 08:00–16:00 window and no holidays.
    pub fn new(anchor: NaiveDateTime) -> Self {
        Self::with_window(anchor, WorkdayWindow::default())
    }

    /// A calendar with a custom workday window and no holidays.
    pub fn with_window(anchor: NaiveDateTime, window: WorkdayWindow) -> Self {
        Self {
            anchor,
            window,
            holidays: Vec::new(),
        }
    }

    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: NaiveDateTime) {
        self.anchor = anchor;
    }

    pub fn window(&self) -> WorkdayWindow {
        self.window
    }

    /// Length of one working day.
    pub fn workday_duration(&self) -> Duration {
        self.window.duration()
    }

    /// Registered holiday rules, in registration order.
    pub fn holidays(&self) -> &[HolidayRule] {
        &self.holidays
    }

    /// Register a holiday rule. Returns `false` if an equal rule was already
    /// registered, in which case the calendar is unchanged.
    pub fn add_holiday(&mut self, rule: HolidayRule) -> bool {
        if self.holidays.contains(&rule) {
            return false;
        }
        self.holidays.push(rule);
        true
    }

    /// Register a one-off holiday on `year-month-day`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::InvalidHoliday`] if the date does not exist.
    pub fn add_fixed_holiday(&mut self, day: u32, month: u32, year: i32) -> Result<bool> {
        let rule = HolidayRule::fixed(year, month, day)?;
        Ok(self.add_holiday(rule))
    }

    /// Register a holiday that recurs on `month`/`day` every year.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::InvalidHoliday`] if no year has that month/day.
    pub fn add_recurring_holiday(&mut self, month: u32, day: u32) -> Result<bool> {
        let rule = HolidayRule::recurring(month, day)?;
        Ok(self.add_holiday(rule))
    }

    /// Whether `date` is a workday: not a Saturday or Sunday, and not matched
    /// by any holiday rule.
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        !self.holidays.iter().any(|rule| rule.matches(date))
    }

    /// Move `timestamp` onto a workday window, travelling only in `direction`.
    ///
    /// Timestamps already inside a workday's `[start, end)` are returned as is,
    /// as is a workday's exact `end` when travelling backward. Anything else
    /// moves to the nearest window edge in the direction of travel: the `start`
    /// of a workday going forward, the `end` of a workday going backward.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::OutOfRange`] if the search runs past the
    /// supported date range.
    pub fn snap_to_boundary(
        &self,
        timestamp: NaiveDateTime,
        direction: Direction,
    ) -> Result<NaiveDateTime> {
        let date = timestamp.date();
        let time = timestamp.time();
        let (start, end) = (self.window.start, self.window.end);

        if self.is_workday(date)
            && (self.window.contains(time) || (time == end && direction == Direction::Backward))
        {
            return Ok(timestamp);
        }

        let mut candidate = match direction {
            Direction::Forward if time < start => date.and_time(start),
            Direction::Forward if time >= end => step_date(date, direction)?.and_time(start),
            Direction::Backward if time > end => date.and_time(end),
            Direction::Backward if time <= start => step_date(date, direction)?.and_time(end),
            // Inside the window (or on `end` going backward) of a non-workday
            _ => timestamp,
        };

        while !self.is_workday(candidate.date()) {
            candidate = step_date(candidate.date(), direction)?.and_time(self.window.entry(direction));
        }

        if candidate != timestamp {
            debug!(from = %timestamp, to = %candidate, ?direction, "snapped to workday window");
        }
        Ok(candidate)
    }

    /// Resolve `offset_days` working days from the calendar's anchor.
    ///
    /// A zero offset returns the anchor unchanged, without snapping.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::InvalidOffset`] if `offset_days` is NaN or
    /// infinite, or [`WorkdayError::OutOfRange`] if the result would fall
    /// outside the supported date range.
    pub fn calculate_workday_offset(&self, offset_days: f64) -> Result<NaiveDateTime> {
        self.offset_from(self.anchor, offset_days)
    }

    /// Resolve `offset_days` working days from `start`, ignoring the stored anchor.
    ///
    /// # Errors
    ///
    /// Same as [`calculate_workday_offset`](Self::calculate_workday_offset).
    pub fn offset_from(&self, start: NaiveDateTime, offset_days: f64) -> Result<NaiveDateTime> {
        if !offset_days.is_finite() {
            return Err(WorkdayError::InvalidOffset(format!(
                "offset must be finite, got {offset_days}"
            )));
        }
        if offset_days == 0.0 {
            return Ok(start);
        }

        let direction = Direction::from_offset(offset_days);
        let mut remaining = (offset_days * self.window.duration_seconds()).abs();
        let mut current = self.snap_to_boundary(start, direction)?;

        while remaining > EPSILON_SECONDS {
            let available = match direction {
                Direction::Forward => seconds_f64(current.date().and_time(self.window.end) - current),
                Direction::Backward => {
                    seconds_f64(current - current.date().and_time(self.window.start))
                }
            };

            if available >= remaining {
                current = shift(current, remaining, direction)?;
                break;
            }

            remaining -= available;
            let mut date = step_date(current.date(), direction)?;
            while !self.is_workday(date) {
                date = step_date(date, direction)?;
            }
            current = date.and_time(self.window.entry(direction));
            trace!(%current, remaining_seconds = remaining, "entered next workday window");
        }

        debug!(%start, offset_days, resolved = %current, "resolved workday offset");
        Ok(current)
    }
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn time_of_day(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("literal time of day is valid")
}

/// A duration in seconds, at microsecond resolution.
fn seconds_f64(delta: Duration) -> f64 {
    delta
        .num_microseconds()
        .map_or(delta.num_seconds() as f64, |us| us as f64 / 1_000_000.0)
}

/// The calendar date one day away from `date` in `direction`.
fn step_date(date: NaiveDate, direction: Direction) -> Result<NaiveDate> {
    let next = match direction {
        Direction::Forward => date.succ_opt(),
        Direction::Backward => date.pred_opt(),
    };
    next.ok_or_else(|| WorkdayError::OutOfRange(format!("no date {direction:?} of {date}")))
}

/// Move `timestamp` by `seconds` in `direction`.
fn shift(timestamp: NaiveDateTime, seconds: f64, direction: Direction) -> Result<NaiveDateTime> {
    let micros = (seconds * 1_000_000.0).round() as i64 * direction.sign();
    timestamp
        .checked_add_signed(Duration::microseconds(micros))
        .ok_or_else(|| {
            WorkdayError::OutOfRange(format!("{timestamp} moved by {seconds}s {direction:?}"))
        })
}
