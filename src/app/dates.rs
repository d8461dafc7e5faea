//! Date resolution and range iteration
//!
//! Snapshot dates arrive in several shapes (calendar dates, timestamps,
//! epoch seconds, ISO strings) and are all canonicalized to a plain
//! [`NaiveDate`] here. The module also owns the day-stepped range iterator
//! that drives a sync, and the parsing half of latest-date discovery: the
//! scan that pulls an ISO date out of the provider's redirect target.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::errors::{DateError, DateResult};

/// Heterogeneous date representations accepted by [`parse_date`]
#[derive(Debug, Clone)]
pub enum DateInput {
    /// Already a calendar date
    Date(NaiveDate),
    /// Timestamp-bearing value; time-of-day is discarded
    DateTime(DateTime<Utc>),
    /// ISO-format string (`YYYY-MM-DD`)
    Iso(String),
    /// Seconds since the Unix epoch
    EpochSeconds(i64),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(dt: DateTime<Utc>) -> Self {
        DateInput::DateTime(dt)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Iso(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Iso(s)
    }
}

impl From<i64> for DateInput {
    fn from(secs: i64) -> Self {
        DateInput::EpochSeconds(secs)
    }
}

/// Canonicalize any supported date representation to a calendar date
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] when the input cannot be unambiguously
/// interpreted: a malformed ISO string, or an epoch value outside the
/// representable range.
pub fn parse_date(input: impl Into<DateInput>) -> DateResult<NaiveDate> {
    match input.into() {
        DateInput::Date(date) => Ok(date),
        DateInput::DateTime(dt) => Ok(dt.date_naive()),
        DateInput::Iso(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| DateError::InvalidDate { input: s }),
        DateInput::EpochSeconds(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
            .map(|dt| dt.date_naive())
            .ok_or(DateError::InvalidDate {
                input: secs.to_string(),
            }),
    }
}

/// Earliest date for which the provider is known to publish snapshots
pub fn min_supported_date() -> NaiveDate {
    // 2022-07-15, the first day of published EPSS v3 history
    NaiveDate::from_ymd_opt(2022, 7, 15).expect("valid constant date")
}

/// Extract the first ISO date embedded in a redirect target
///
/// Returns `None` when no `YYYY-MM-DD` pattern is present or the matched
/// pattern is not a real calendar date.
pub fn extract_snapshot_date(location: &str) -> Option<NaiveDate> {
    let pattern = Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
    let matched = pattern.find(location)?;
    NaiveDate::parse_from_str(matched.as_str(), "%Y-%m-%d").ok()
}

/// Lazy, restartable sequence of calendar dates, ascending, one-day steps
///
/// Both bounds are inclusive; `Clone` allows re-iteration from the start.
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.last);
        Some(current)
    }
}

/// Build the inclusive day-stepped range `min..=max`
///
/// # Errors
///
/// Returns [`DateError::InvertedRange`] when `min > max`. Equal bounds are
/// valid and yield exactly one date.
pub fn date_range(min: NaiveDate, max: NaiveDate) -> DateResult<DateRange> {
    if min > max {
        return Err(DateError::InvertedRange { min, max });
    }
    Ok(DateRange {
        next: Some(min),
        last: max,
    })
}
