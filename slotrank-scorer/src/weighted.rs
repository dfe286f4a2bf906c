//! The weighted multi-signal scorer.

use slotrank_core::{Item, Scorer, SearchParams, User};

use crate::{
    ScoringConfig,
    breakdown::{ScoreBreakdown, SubScores},
    signals::{
        availability_score, location_score, popularity_score, preference_score, rating_score,
    },
};

/// Scorer combining preference, popularity, rating, proximity and
/// availability with fixed weights.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use slotrank_core::{Item, Scorer, SearchParams, User};
/// use slotrank_scorer::WeightedScorer;
///
/// let scorer = WeightedScorer::default();
/// let user = User::new("u-1", Vec::new(), None).expect("valid user");
/// let item: Item = serde_json::from_str(
///     r#"{"id": "i-1", "category": "spa", "rating": 5.0, "totalBookings": 1000}"#,
/// )
/// .expect("decode item");
/// let params = SearchParams::new(NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"));
///
/// // 0.3 * 0.5 + 0.2 * 1.0 + 0.2 * 1.0 + 0.15 * 0.5 + 0.15 * 0.0
/// let score = scorer.score(&item, &user, &params);
/// assert!((score - 0.625).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedScorer {
    config: ScoringConfig,
}

impl WeightedScorer {
    /// Build a scorer around a validated configuration.
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compute the five unweighted sub-scores.
    #[must_use]
    pub fn sub_scores(&self, item: &Item, user: &User, params: &SearchParams) -> SubScores {
        let ceilings = self.config.ceilings();
        let defaults = self.config.defaults();
        SubScores {
            preference: preference_score(user, &item.category, defaults),
            popularity: popularity_score(item.total_bookings, ceilings),
            rating: rating_score(item.rating, ceilings),
            location: location_score(user.location, item.location, ceilings, defaults),
            availability: availability_score(item, params.date),
        }
    }

    /// Compute every sub-score and the weighted total.
    #[must_use]
    pub fn breakdown(&self, item: &Item, user: &User, params: &SearchParams) -> ScoreBreakdown {
        ScoreBreakdown::weigh(self.sub_scores(item, user, params), self.config.weights())
    }
}

impl Scorer for WeightedScorer {
    fn score(&self, item: &Item, user: &User, params: &SearchParams) -> f64 {
        self.breakdown(item, user, params).total
    }
}
