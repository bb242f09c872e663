//! Calendar helpers for MGD77 absolute time.
//!
//! Absolute time is seconds since 1970-01-01T00:00:00 UTC.

use chrono::{Datelike, NaiveDate};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Broken-down ship time of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calendar {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    /// Decimal minutes including seconds.
    pub minute: f64,
}

impl Calendar {
    /// Seconds past midnight.
    #[must_use]
    pub fn seconds_of_day(&self) -> f64 {
        f64::from(self.hour) * 3600.0 + self.minute * 60.0
    }

    /// Whole seconds within the minute.
    #[must_use]
    pub fn second(&self) -> f64 {
        (self.minute - self.minute.floor()) * 60.0
    }

    /// Date packed as YYYYMMDD.
    #[must_use]
    pub fn yyyymmdd(&self) -> i64 {
        i64::from(self.year) * 10_000 + i64::from(self.month) * 100 + i64::from(self.day)
    }

    /// Time packed as HHMM.mmm.
    #[must_use]
    pub fn hhmm(&self) -> f64 {
        f64::from(self.hour) * 100.0 + self.minute
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Days since 1970-01-01 for a calendar date, `None` if the date is invalid.
#[must_use]
pub fn days_from_civil(year: i32, month: u32, day: u32) -> Option<i64> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.signed_duration_since(epoch()).num_days())
}

/// Absolute time for a date plus an offset in seconds (may exceed one day).
#[must_use]
pub fn to_unix_seconds(year: i32, month: u32, day: u32, seconds: f64) -> Option<f64> {
    days_from_civil(year, month, day).map(|d| d as f64 * SECONDS_PER_DAY + seconds)
}

/// Absolute time from punch-card fields. A missing time zone counts as 0.
#[must_use]
pub fn record_time(year: f64, month: f64, day: f64, hour: f64, minute: f64, tz: f64) -> Option<f64> {
    if [year, month, day, hour, minute].iter().any(|v| v.is_nan()) {
        return None;
    }
    let tz = if tz.is_nan() { 0.0 } else { tz };
    let secs = 3600.0 * (hour + tz) + 60.0 * minute;
    to_unix_seconds(
        year.round() as i32,
        month.round().max(0.0) as u32,
        day.round().max(0.0) as u32,
        secs,
    )
}

/// Split an absolute time into calendar parts.
#[must_use]
pub fn split(time: f64) -> Option<Calendar> {
    if !time.is_finite() {
        return None;
    }
    let days = (time / SECONDS_PER_DAY).floor();
    let secs = time - days * SECONDS_PER_DAY;
    let date = epoch().checked_add_signed(chrono::Duration::days(days as i64))?;
    let hour = (secs / 3600.0).floor();
    let minute = (secs - hour * 3600.0) / 60.0;
    Some(Calendar {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hour: hour as u32,
        minute,
    })
}

/// Ship-local calendar parts: `time - tz` hours.
#[must_use]
pub fn split_local(time: f64, tz: f64) -> Option<Calendar> {
    let tz = if tz.is_nan() { 0.0 } else { tz };
    split(time - tz * 3600.0)
}

/// Day of year, 1-based.
#[must_use]
pub fn day_of_year(year: i32, month: u32, day: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.ordinal())
}

/// True for Gregorian leap years.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Decimal year of an absolute time.
#[must_use]
pub fn fractional_year(time: f64) -> Option<f64> {
    let cal = split(time)?;
    let doy = day_of_year(cal.year, cal.month, cal.day)?;
    let days_in_year = if is_leap_year(cal.year) { 366.0 } else { 365.0 };
    Some(
        f64::from(cal.year)
            + (f64::from(doy - 1) + cal.seconds_of_day() / SECONDS_PER_DAY) / days_in_year,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_time_applies_time_zone() {
        let t = record_time(1970.0, 1.0, 2.0, 1.0, 30.0, 2.0).unwrap();
        assert_eq!(t, 86_400.0 + 3.0 * 3600.0 + 1800.0);
        let t0 = record_time(1970.0, 1.0, 1.0, 0.0, 0.5, f64::NAN).unwrap();
        assert_eq!(t0, 30.0);
        assert!(record_time(f64::NAN, 1.0, 1.0, 0.0, 0.0, 0.0).is_none());
        assert!(record_time(1999.0, 2.0, 30.0, 0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_split_inverts_record_time() {
        let t = record_time(2004.0, 2.0, 29.0, 13.0, 45.25, 0.0).unwrap();
        let cal = split(t).unwrap();
        assert_eq!((cal.year, cal.month, cal.day, cal.hour), (2004, 2, 29, 13));
        assert!((cal.minute - 45.25).abs() < 1e-9);
        assert_eq!(cal.yyyymmdd(), 20_040_229);
        assert!((cal.hhmm() - 1345.25).abs() < 1e-9);
    }

    #[test]
    fn test_split_before_epoch() {
        let cal = split(-3600.0).unwrap();
        assert_eq!((cal.year, cal.month, cal.day, cal.hour), (1969, 12, 31, 23));
    }

    #[test]
    fn test_split_local() {
        let cal = split_local(5.0 * 3600.0, 5.0).unwrap();
        assert_eq!((cal.year, cal.hour), (1970, 0));
    }

    #[test]
    fn test_fractional_year() {
        let t = to_unix_seconds(2000, 7, 2, 0.0).unwrap();
        let y = fractional_year(t).unwrap();
        assert!((y - (2000.0 + 183.0 / 366.0)).abs() < 1e-12);
    }
}
