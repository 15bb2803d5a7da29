//! Calendar day handling.
//!
//! Registrations are grouped by the local calendar day they happen on. The desk runs
//! with a fixed UTC offset, so a day is the half-open UTC range
//! `[local midnight, next local midnight)`.

use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use serde::Serialize;

/// Half-open UTC range covering one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayRange {
    /// First instant of the day (inclusive)
    pub start: DateTime<Utc>,
    /// First instant of the next day (exclusive)
    pub end: DateTime<Utc>,
}

impl DayRange {
    /// Whether `at` falls inside the range.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Maps instants to local days for a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    offset: FixedOffset,
}

impl DayWindow {
    /// Creates a window for the given offset.
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// A window aligned with UTC days.
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// The configured offset.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local calendar day of `at`.
    #[must_use]
    pub fn business_day(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Local calendar day right now.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.business_day(Utc::now())
    }

    /// UTC range covering `day`.
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` when the range falls outside chrono's representable
    /// instants, which only happens for dates near the limits of the extended year range.
    pub fn range(&self, day: NaiveDate) -> Result<DayRange> {
        let out_of_range = || Error::InvalidDate {
            value: day.to_string(),
        };
        let local_midnight = day.and_time(NaiveTime::MIN);
        let start = local_midnight
            .checked_sub_signed(Duration::seconds(i64::from(self.offset.local_minus_utc())))
            .ok_or_else(out_of_range)?
            .and_utc();
        let end = start
            .checked_add_signed(Duration::days(1))
            .ok_or_else(out_of_range)?;
        Ok(DayRange { start, end })
    }

    /// Local wall-clock time of `at`, formatted `HH:MM:SS`.
    #[must_use]
    pub fn time_of_day(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset).format("%H:%M:%S").to_string()
    }

    /// Parses an optional `YYYY-MM-DD` date, defaulting to today.
    pub fn resolve_date(&self, date: Option<&str>) -> Result<NaiveDate> {
        match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(value) => parse_date(value),
            None => Ok(self.today()),
        }
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::utc()
    }
}

/// Parses a `YYYY-MM-DD` date with a four-digit year.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let invalid = || Error::InvalidDate {
        value: value.to_string(),
    };
    // chrono also accepts signed or extended years such as `+262142-12-31`
    let bytes = trimmed.as_bytes();
    let four_digit_year = bytes.len() == 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-';
    if !four_digit_year {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())
}
