//! Calendar-date normalisation.
//!
//! Availability is keyed by calendar date. Records arrive either as plain
//! `YYYY-MM-DD` strings or as RFC 3339 timestamps; timestamps collapse to
//! their UTC calendar date so both sides of a comparison share one key.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors returned by [`parse_calendar_date`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{raw}` is neither a YYYY-MM-DD date nor an RFC 3339 timestamp")]
pub struct CalendarDateError {
    /// Input that failed to parse.
    pub raw: String,
}

/// Parse a date-only string or an RFC 3339 timestamp into a calendar date.
///
/// # Errors
/// Returns [`CalendarDateError`] when the input matches neither format.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use slotrank_core::parse_calendar_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
/// assert_eq!(parse_calendar_date("2024-05-01"), Ok(expected));
/// assert_eq!(parse_calendar_date("2024-05-01T23:30:00-02:00"), Ok(
///     NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date"),
/// ));
/// ```
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, CalendarDateError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|instant| utc_calendar_date(&instant))
        .map_err(|_| CalendarDateError {
            raw: raw.to_owned(),
        })
}

/// Drop the time-of-day and zone from an instant, keeping its UTC date.
pub fn utc_calendar_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&Utc).date_naive()
}

/// Serde adapter for calendar dates stored as strings.
///
/// Serialises as `YYYY-MM-DD`; deserialises anything
/// [`parse_calendar_date`] accepts.
pub mod serde_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{DATE_FORMAT, parse_calendar_date};

    /// Write a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    /// Read a date-only string or RFC 3339 timestamp.
    ///
    /// # Errors
    /// Fails when the string is neither format.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw).map_err(serde::de::Error::custom)
    }
}
