//! Search parameters and scored results.

use std::num::NonZeroUsize;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CalendarDateError, Item, calendar::utc_calendar_date, parse_calendar_date};

/// Result limit applied by the scorer when the caller does not choose one.
pub const DEFAULT_RESULT_LIMIT: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

/// What the caller is searching for.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use slotrank_core::SearchParams;
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
/// let params = SearchParams::new(date);
/// assert_eq!(params.limit.get(), 10);
///
/// let wider = params.with_limit(25).expect("positive limit");
/// assert_eq!(wider.limit.get(), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Target calendar date; time-of-day is never considered.
    #[serde(with = "crate::calendar::serde_date")]
    pub date: NaiveDate,
    /// Maximum number of ranked results.
    #[serde(default = "default_limit")]
    pub limit: NonZeroUsize,
}

const fn default_limit() -> NonZeroUsize {
    DEFAULT_RESULT_LIMIT
}

/// Errors raised while building [`SearchParams`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchParamsError {
    /// A limit of zero was requested.
    #[error("result limit must be positive")]
    ZeroLimit,
    /// The date string could not be parsed.
    #[error(transparent)]
    Date(#[from] CalendarDateError),
}

impl SearchParams {
    /// Search `date` with the default limit.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Search the UTC calendar date of `instant`.
    #[must_use]
    pub fn for_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::new(utc_calendar_date(instant))
    }

    /// Parse a date-only string or RFC 3339 timestamp.
    ///
    /// # Errors
    /// Returns [`SearchParamsError::Date`] when the input is not a date.
    pub fn parse(raw_date: &str) -> Result<Self, SearchParamsError> {
        Ok(Self::new(parse_calendar_date(raw_date)?))
    }

    /// Replace the result limit.
    ///
    /// # Errors
    /// Returns [`SearchParamsError::ZeroLimit`] when `limit` is zero.
    pub fn with_limit(self, limit: usize) -> Result<Self, SearchParamsError> {
        let bounded = NonZeroUsize::new(limit).ok_or(SearchParamsError::ZeroLimit)?;
        Ok(Self {
            limit: bounded,
            ..self
        })
    }
}

/// An item paired with its score for the duration of one ranking call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    /// The candidate.
    pub item: Item,
    /// Weighted score.
    pub score: f64,
}

impl ScoredItem {
    /// Pair an item with its score.
    #[must_use]
    pub const fn new(item: Item, score: f64) -> Self {
        Self { item, score }
    }

    /// Discard the score.
    #[must_use]
    pub fn into_item(self) -> Item {
        self.item
    }
}
