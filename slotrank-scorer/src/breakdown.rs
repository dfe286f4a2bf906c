//! Per-signal view of a score.

use serde::Serialize;

use crate::config::ScoreWeights;

/// The five sub-scores before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScores {
    /// Category affinity.
    pub preference: f64,
    /// Booking volume relative to the ceiling.
    pub popularity: f64,
    /// Rating relative to the ceiling.
    pub rating: f64,
    /// Proximity to the user.
    pub location: f64,
    /// Share of free slots on the search date.
    pub availability: f64,
}

impl SubScores {
    /// Weighted sum of the sub-scores. No renormalisation is applied.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "aggregation is a weighted sum"
    )]
    pub fn weighted_sum(&self, weights: &ScoreWeights) -> f64 {
        weights.preference * self.preference
            + weights.popularity * self.popularity
            + weights.rating * self.rating
            + weights.location * self.location
            + weights.availability * self.availability
    }
}

/// Sub-scores together with their weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Unweighted sub-scores.
    #[serde(flatten)]
    pub components: SubScores,
    /// Weighted total used for ranking.
    pub total: f64,
}

impl ScoreBreakdown {
    /// Weigh `components` with `weights`.
    #[must_use]
    pub fn weigh(components: SubScores, weights: &ScoreWeights) -> Self {
        Self {
            total: components.weighted_sum(weights),
            components,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn uniform(value: f64) -> SubScores {
        SubScores {
            preference: value,
            popularity: value,
            rating: value,
            location: value,
            availability: value,
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.5)]
    #[case(1.0)]
    fn uniform_components_keep_their_value(#[case] value: f64) {
        let breakdown = ScoreBreakdown::weigh(uniform(value), &ScoreWeights::default());
        assert!((breakdown.total - value).abs() < 1e-12);
    }

    #[rstest]
    fn each_weight_applies_to_its_component() {
        let components = SubScores {
            preference: 1.0,
            popularity: 0.0,
            rating: 0.0,
            location: 0.0,
            availability: 0.0,
        };
        let breakdown = ScoreBreakdown::weigh(components, &ScoreWeights::default());
        assert!((breakdown.total - 0.30).abs() < 1e-12);
    }

    #[rstest]
    fn serialises_flat() {
        let breakdown = ScoreBreakdown::weigh(uniform(1.0), &ScoreWeights::default());
        let value = serde_json::to_value(breakdown).expect("serialise breakdown");
        assert_eq!(value["preference"], 1.0);
        assert!(value.get("components").is_none());
        assert!(value.get("total").is_some());
    }
}
