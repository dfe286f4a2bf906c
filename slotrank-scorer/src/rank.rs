//! Order candidates by score.
//!
//! Scoring runs on the `rayon` pool since every item is independent. The
//! collected scores keep candidate order, and the stable sort that follows
//! leaves equal scores in that order, so repeated calls agree.

use std::cmp::Ordering;

use rayon::prelude::*;
use slotrank_core::{Item, ScoredItem, Scorer, SearchParams, User};

/// Score, sort descending and truncate to `params.limit`.
///
/// Ties keep the order of `items`. A `NaN` score sorts after every other
/// score.
pub fn rank_scored<S>(
    scorer: &S,
    items: Vec<Item>,
    user: &User,
    params: &SearchParams,
) -> Vec<ScoredItem>
where
    S: Scorer + ?Sized,
{
    let candidate_count = items.len();
    let mut scored: Vec<ScoredItem> = items
        .into_par_iter()
        .map(|item| {
            let score = scorer.score(&item, user, params);
            ScoredItem::new(item, score)
        })
        .collect();
    scored.sort_by(|left, right| descending(left.score, right.score));
    scored.truncate(params.limit.get());
    log::debug!(
        "ranked {candidate_count} candidates for user {} on {}; kept {}",
        user.id,
        params.date,
        scored.len()
    );
    scored
}

/// Rank and drop the scores, returning items best first.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use slotrank_core::{Item, SearchParams, User};
/// use slotrank_scorer::{WeightedScorer, rank};
///
/// let decode = |json: &str| -> Item { serde_json::from_str(json).expect("decode item") };
/// let items = vec![
///     decode(r#"{"id": "ok", "category": "spa", "rating": 3.0}"#),
///     decode(r#"{"id": "best", "category": "spa", "rating": 5.0}"#),
/// ];
/// let user = User::new("u-1", Vec::new(), None).expect("valid user");
/// let params = SearchParams::new(NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"))
///     .with_limit(1)
///     .expect("positive limit");
///
/// let ranked = rank(&WeightedScorer::default(), items, &user, &params);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].id, "best");
/// ```
pub fn rank<S>(scorer: &S, items: Vec<Item>, user: &User, params: &SearchParams) -> Vec<Item>
where
    S: Scorer + ?Sized,
{
    rank_scored(scorer, items, user, params)
        .into_iter()
        .map(ScoredItem::into_item)
        .collect()
}

fn descending(left: f64, right: f64) -> Ordering {
    sort_key(right)
        .partial_cmp(&sort_key(left))
        .unwrap_or(Ordering::Equal)
}

const fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}
