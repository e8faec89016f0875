//! Date and time-of-day helpers shared by the grid and layout code.
//!
//! Weeks are Sunday-first throughout: [`weekday_index`] returns 0 for Sunday
//! and 6 for Saturday.

use chrono::{
    DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
};
use chrono_tz::Tz;

use crate::error::{CalendarError, Result};

/// Source of "now" for the calendar. Injected so tests can pin the date.
pub trait Clock {
    /// Current wall-clock time in the calendar's local zone.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system clock and converts it into an IANA time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build a clock from an IANA zone name such as `"America/Bogota"`.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Self::new(parse_timezone(name)?))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| CalendarError::InvalidTimezone(name.to_string()))
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Shift by whole calendar months, clamping the day to the target month's length.
///
/// `add_months(2024-01-31, 1)` is `2024-02-29`; negative values walk backwards
/// across year boundaries.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    first
        .checked_add_months(Months::new(1))
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31)
}

/// The date in `date`'s month whose day is `day`, or the month's last day if
/// the month is shorter.
pub fn clamp_to_month(date: NaiveDate, day: u32) -> NaiveDate {
    let last = days_in_month(date.year(), date.month());
    let first = first_of_month(date);
    add_days(first, i64::from(day.clamp(1, last.max(1)) - 1))
}

pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// The Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    add_days(date, -(weekday_index(date) as i64))
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// `hour + minute / 60`. Seconds are ignored.
pub fn fractional_hour(time: NaiveTime) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0
}

/// Vertical offset of `time` in a grid whose first row is `first_hour`.
pub fn hour_offset_px(time: NaiveTime, first_hour: u32, px_per_hour: f64) -> f64 {
    (fractional_hour(time) - f64::from(first_hour)) * px_per_hour
}

/// Parse `"HH:MM"` (or `"HH:MM:SS"`).
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| CalendarError::InvalidTime(s.to_string()))
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

/// Parse an instant into local wall-clock time in `tz`.
///
/// Accepts RFC 3339 (converted into `tz`) and naive `YYYY-MM-DDTHH:MM[:SS]`,
/// which is taken as already local.
pub fn parse_local_datetime(s: &str, tz: Tz) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz).naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}
