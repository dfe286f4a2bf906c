//! Core domain types for the SlotRank engine.
//!
//! Users, bookable items, their availability and the search parameters a
//! ranking call receives. Validating constructors return `Result` so bad
//! input is caught where records are created; public fields still allow
//! records from storage to be represented exactly as found.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod calendar;
mod geo_point;
mod item;
mod scorer;
mod search;
mod source;
mod user;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use calendar::{CalendarDateError, parse_calendar_date};
pub use geo_point::{GeoPoint, GeoPointError};
pub use item::{AvailabilityDay, Item, ItemError, MAX_RATING, TimeSlot};
pub use scorer::Scorer;
pub use search::{DEFAULT_RESULT_LIMIT, ScoredItem, SearchParams, SearchParamsError};
pub use source::{BackendError, CandidateSource, MemoryDirectory, RetrievalError, UserSource};
pub use user::{Preference, PreferenceError, User, UserError};
