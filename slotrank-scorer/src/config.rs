//! Immutable scoring configuration: weights, ceilings and fallbacks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::distance::EARTH_RADIUS_KM;

/// Accepted drift between the weight total and `1.0`.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative weighting of the five sub-scores.
///
/// The weights must be finite, non-negative and sum to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    /// Multiplier for the category preference sub-score.
    pub preference: f64,
    /// Multiplier for the popularity sub-score.
    pub popularity: f64,
    /// Multiplier for the rating sub-score.
    pub rating: f64,
    /// Multiplier for the proximity sub-score.
    pub location: f64,
    /// Multiplier for the availability sub-score.
    pub availability: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            preference: 0.30,
            popularity: 0.20,
            rating: 0.20,
            location: 0.15,
            availability: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError::InvalidWeight`] when a weight is
    /// negative or not finite, and
    /// [`ScoringConfigError::WeightsDoNotSumToOne`] when the total drifts
    /// from `1.0`.
    pub fn validate(self) -> Result<Self, ScoringConfigError> {
        for (name, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringConfigError::InvalidWeight { name, value });
            }
        }
        let total = self.total();
        if !self.sums_to_one() {
            return Err(ScoringConfigError::WeightsDoNotSumToOne { total });
        }
        Ok(self)
    }

    /// Sum of all five weights.
    #[must_use]
    pub fn total(self) -> f64 {
        self.named().iter().map(|&(_, value)| value).sum()
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "validation compares the weight total against one"
    )]
    fn sums_to_one(self) -> bool {
        (self.total() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    const fn named(self) -> [(&'static str, f64); 5] {
        [
            ("preference", self.preference),
            ("popularity", self.popularity),
            ("rating", self.rating),
            ("location", self.location),
            ("availability", self.availability),
        ]
    }
}

/// Normalisation ceilings for the raw signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreCeilings {
    /// Booking count at which popularity saturates.
    pub max_bookings: u64,
    /// Distance in kilometres at which proximity reaches zero.
    pub max_distance_km: f64,
    /// Highest possible rating.
    pub max_rating: f64,
    /// Sphere radius used for great-circle distances.
    pub earth_radius_km: f64,
}

impl Default for ScoreCeilings {
    fn default() -> Self {
        Self {
            max_bookings: 1_000,
            max_distance_km: 50.0,
            max_rating: slotrank_core::MAX_RATING,
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl ScoreCeilings {
    /// Validate the ceilings and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError::InvalidCeiling`] for a zero booking
    /// ceiling or any non-finite or non-positive distance, rating or radius.
    pub fn validate(self) -> Result<Self, ScoringConfigError> {
        if self.max_bookings == 0 {
            return Err(ScoringConfigError::InvalidCeiling {
                name: "max_bookings",
                value: 0.0,
            });
        }
        for (name, value) in [
            ("max_distance_km", self.max_distance_km),
            ("max_rating", self.max_rating),
            ("earth_radius_km", self.earth_radius_km),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScoringConfigError::InvalidCeiling { name, value });
            }
        }
        Ok(self)
    }
}

/// Sub-score values used when a signal is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreDefaults {
    /// Preference score for users who have recorded no preferences.
    pub neutral_preference: f64,
    /// Preference score when preferences exist but none match the item.
    pub unmatched_preference: f64,
    /// Proximity score when either side has no coordinates.
    pub neutral_location: f64,
}

impl Default for ScoreDefaults {
    fn default() -> Self {
        Self {
            neutral_preference: 0.5,
            unmatched_preference: 0.3,
            neutral_location: 0.5,
        }
    }
}

impl ScoreDefaults {
    /// Validate the fallbacks and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError::InvalidFallback`] for values outside
    /// `0.0..=1.0`.
    pub fn validate(self) -> Result<Self, ScoringConfigError> {
        for (name, value) in [
            ("neutral_preference", self.neutral_preference),
            ("unmatched_preference", self.unmatched_preference),
            ("neutral_location", self.neutral_location),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScoringConfigError::InvalidFallback { name, value });
            }
        }
        Ok(self)
    }
}

/// Errors raised while validating a [`ScoringConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringConfigError {
    /// A weight was negative or not finite.
    #[error("weight `{name}` must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Offending weight.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The weights did not sum to one.
    #[error("weights must sum to 1.0, got {total}")]
    WeightsDoNotSumToOne {
        /// Observed total.
        total: f64,
    },
    /// A ceiling was zero, negative or not finite.
    #[error("ceiling `{name}` must be finite and positive, got {value}")]
    InvalidCeiling {
        /// Offending ceiling.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A fallback sub-score fell outside `0.0..=1.0`.
    #[error("fallback `{name}` must be between 0.0 and 1.0, got {value}")]
    InvalidFallback {
        /// Offending fallback.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Validated, immutable configuration handed to the scorer at construction.
///
/// # Examples
/// ```
/// use slotrank_scorer::{ScoreWeights, ScoringConfig};
///
/// let config = ScoringConfig::default();
/// assert_eq!(config.weights().preference, 0.30);
/// assert_eq!(config.ceilings().max_bookings, 1_000);
///
/// let lopsided = ScoreWeights { preference: 0.9, ..ScoreWeights::default() };
/// assert!(ScoringConfig::new(lopsided, Default::default(), Default::default()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ScoringConfigDocument")]
pub struct ScoringConfig {
    weights: ScoreWeights,
    ceilings: ScoreCeilings,
    defaults: ScoreDefaults,
}

impl ScoringConfig {
    /// Validate and assemble a configuration.
    ///
    /// # Errors
    /// Returns the first [`ScoringConfigError`] raised by the parts.
    pub fn new(
        weights: ScoreWeights,
        ceilings: ScoreCeilings,
        defaults: ScoreDefaults,
    ) -> Result<Self, ScoringConfigError> {
        Ok(Self {
            weights: weights.validate()?,
            ceilings: ceilings.validate()?,
            defaults: defaults.validate()?,
        })
    }

    /// Sub-score weights.
    #[must_use]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Normalisation ceilings.
    #[must_use]
    pub const fn ceilings(&self) -> &ScoreCeilings {
        &self.ceilings
    }

    /// Fallback sub-scores.
    #[must_use]
    pub const fn defaults(&self) -> &ScoreDefaults {
        &self.defaults
    }
}

/// Unvalidated configuration as read from a file; every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ScoringConfigDocument {
    weights: ScoreWeights,
    ceilings: ScoreCeilings,
    defaults: ScoreDefaults,
}

impl TryFrom<ScoringConfigDocument> for ScoringConfig {
    type Error = ScoringConfigError;

    fn try_from(document: ScoringConfigDocument) -> Result<Self, Self::Error> {
        Self::new(document.weights, document.ceilings, document.defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_weights_sum_to_one() {
        let weights = ScoreWeights::default();
        assert!(weights.validate().is_ok());
        assert!((weights.total() - 1.0).abs() < 1e-12);
    }

    #[rstest]
    #[case::negative(ScoreWeights { rating: -0.2, location: 0.55, ..ScoreWeights::default() })]
    #[case::nan(ScoreWeights { rating: f64::NAN, ..ScoreWeights::default() })]
    fn rejects_invalid_weights(#[case] weights: ScoreWeights) {
        let err = weights.validate().expect_err("weights should be rejected");
        assert!(matches!(
            err,
            ScoringConfigError::InvalidWeight { name: "rating", .. }
        ));
    }

    #[rstest]
    fn rejects_weights_not_summing_to_one() {
        let weights = ScoreWeights {
            availability: 0.25,
            ..ScoreWeights::default()
        };
        let err = weights.validate().expect_err("total of 1.1 should fail");
        assert!(matches!(
            err,
            ScoringConfigError::WeightsDoNotSumToOne { .. }
        ));
    }

    #[rstest]
    #[case::bookings(ScoreCeilings { max_bookings: 0, ..ScoreCeilings::default() }, "max_bookings")]
    #[case::distance(
        ScoreCeilings { max_distance_km: 0.0, ..ScoreCeilings::default() },
        "max_distance_km"
    )]
    #[case::rating(
        ScoreCeilings { max_rating: f64::INFINITY, ..ScoreCeilings::default() },
        "max_rating"
    )]
    #[case::radius(
        ScoreCeilings { earth_radius_km: -1.0, ..ScoreCeilings::default() },
        "earth_radius_km"
    )]
    fn rejects_invalid_ceilings(#[case] ceilings: ScoreCeilings, #[case] expected: &str) {
        match ceilings.validate() {
            Err(ScoringConfigError::InvalidCeiling { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected InvalidCeiling, found {other:?}"),
        }
    }

    #[rstest]
    fn rejects_fallbacks_outside_unit_range() {
        let defaults = ScoreDefaults {
            neutral_location: 1.5,
            ..ScoreDefaults::default()
        };
        assert!(matches!(
            defaults.validate(),
            Err(ScoringConfigError::InvalidFallback {
                name: "neutral_location",
                ..
            })
        ));
    }

    #[rstest]
    fn partial_documents_keep_remaining_defaults() {
        let json = r#"{"ceilings": {"max_distance_km": 10.0}}"#;
        let config: ScoringConfig = serde_json::from_str(json).expect("decode config");
        assert_eq!(config.ceilings().max_distance_km, 10.0);
        assert_eq!(config.ceilings().max_bookings, 1_000);
        assert_eq!(config.weights(), &ScoreWeights::default());
    }

    #[rstest]
    fn documents_are_validated() {
        let json = r#"{"weights": {"preference": 0.5}}"#;
        let err = serde_json::from_str::<ScoringConfig>(json).expect_err("invalid weights");
        assert!(err.to_string().contains("weights must sum to 1.0"));
    }
}
