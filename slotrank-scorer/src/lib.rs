//! Scoring and ranking of bookable items.
//!
//! [`WeightedScorer`] blends five sub-scores, each in `0.0..=1.0` for valid
//! input:
//! - **preference**: the user's stored weight for the item's category, with
//!   fallbacks for users without preferences and for unmatched categories;
//! - **popularity**: lifetime bookings against a saturation ceiling;
//! - **rating**: rating over the rating ceiling;
//! - **location**: linear decay of the Haversine distance up to a ceiling;
//! - **availability**: the share of free slots on the search date.
//!
//! Weights, ceilings and fallbacks live in an immutable [`ScoringConfig`].
//! [`rank`] scores candidates in parallel and returns them best first;
//! [`RankingService`] adds the retrieval step in front.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use slotrank_core::{GeoPoint, Item, Preference, SearchParams, User};
//! use slotrank_scorer::{WeightedScorer, rank};
//!
//! let origin = GeoPoint::new(0.0, 0.0).expect("valid point");
//! let user = User::new(
//!     "u-1",
//!     vec![Preference::new("spa", 0.8).expect("valid preference")],
//!     Some(origin),
//! )
//! .expect("valid user");
//! let spa = Item::new("spa", "spa", 5.0, 500, origin, Vec::new()).expect("valid item");
//! let gym = Item::new("gym", "gym", 3.0, 100, origin, Vec::new()).expect("valid item");
//!
//! let params = SearchParams::new(NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"));
//! let ranked = rank(&WeightedScorer::default(), vec![gym, spa], &user, &params);
//! assert_eq!(ranked[0].id, "spa");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod breakdown;
mod config;
mod distance;
mod error;
mod rank;
mod service;
pub mod signals;
mod weighted;

pub use breakdown::{ScoreBreakdown, SubScores};
pub use config::{ScoreCeilings, ScoreDefaults, ScoreWeights, ScoringConfig, ScoringConfigError};
pub use distance::{EARTH_RADIUS_KM, great_circle_km, haversine_km};
pub use error::RankError;
pub use rank::{rank, rank_scored};
pub use service::RankingService;
pub use weighted::WeightedScorer;
