//! Facade crate for the SlotRank recommendation engine.
//!
//! This crate re-exports the domain model from `slotrank-core` and the
//! weighted scorer and ranking pipeline from `slotrank-scorer`.

#![forbid(unsafe_code)]

pub use slotrank_core::{
    AvailabilityDay, CandidateSource, GeoPoint, Item, MemoryDirectory, Preference, RetrievalError,
    ScoredItem, Scorer, SearchParams, TimeSlot, User, UserSource,
};
pub use slotrank_scorer::{
    RankError, RankingService, ScoreBreakdown, ScoringConfig, WeightedScorer, rank, rank_scored,
};

#[cfg(feature = "test-support")]
pub use slotrank_core::test_support;
