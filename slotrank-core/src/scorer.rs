//! Score items for a user.
//!
//! The `Scorer` trait assigns a relevance score to an [`Item`](crate::Item)
//! given the requesting [`User`](crate::User) and the
//! [`SearchParams`](crate::SearchParams) of the search.

use crate::{Item, SearchParams, User};

/// Calculate a relevance score for a bookable item.
///
/// Higher scores indicate a better match. Implementations must be
/// thread-safe (`Send` + `Sync`) so candidate sets can be scored in parallel,
/// and must be pure: the score of one item never depends on another.
/// The method is infallible; missing optional data degrades to a documented
/// fallback rather than an error.
///
/// Scores of well-formed inputs lie in `0.0..=1.0`. Implementations do not
/// clamp, so malformed inputs remain visible in the output.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use slotrank_core::{Item, Scorer, SearchParams, User};
///
/// struct RatingOnly;
///
/// impl Scorer for RatingOnly {
///     fn score(&self, item: &Item, _user: &User, _params: &SearchParams) -> f64 {
///         item.rating / 5.0
///     }
/// }
///
/// let item: Item = serde_json::from_str(r#"{"id": "i-1", "category": "spa", "rating": 4.0}"#)
///     .expect("decode item");
/// let user = User::new("u-1", Vec::new(), None).expect("valid user");
/// let params = SearchParams::new(NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"));
/// assert_eq!(RatingOnly.score(&item, &user, &params), 0.8);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `item` according to `user` and `params`.
    fn score(&self, item: &Item, user: &User, params: &SearchParams) -> f64;
}
