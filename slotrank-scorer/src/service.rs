//! Retrieval → scoring → ranking pipeline.

use slotrank_core::{CandidateSource, ScoredItem, Scorer, SearchParams, UserSource};

use crate::{RankError, WeightedScorer, rank::rank_scored};

/// Resolve a user, fetch candidates for the search date and rank them.
///
/// All I/O happens in the directory before scoring starts. By default the
/// directory is asked to drop fully booked candidates; availability is still
/// scored for whatever it returns.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use slotrank_core::{MemoryDirectory, SearchParams, User};
/// use slotrank_scorer::{RankError, RankingService};
///
/// let user = User::new("u-1", Vec::new(), None).expect("valid user");
/// let service = RankingService::new(MemoryDirectory::new(vec![user], Vec::new()));
/// let params = SearchParams::new(NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"));
///
/// assert!(service.rank_for_user("u-1", &params).expect("ranked").is_empty());
/// assert!(matches!(
///     service.rank_for_user("nobody", &params),
///     Err(RankError::MissingUser { .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct RankingService<D, S = WeightedScorer> {
    directory: D,
    scorer: S,
    exclude_fully_booked: bool,
}

impl<D> RankingService<D> {
    /// Rank with the default [`WeightedScorer`].
    pub fn new(directory: D) -> Self {
        Self::with_scorer(directory, WeightedScorer::default())
    }
}

impl<D, S> RankingService<D, S> {
    /// Rank with a caller-provided scorer.
    pub const fn with_scorer(directory: D, scorer: S) -> Self {
        Self {
            directory,
            scorer,
            exclude_fully_booked: true,
        }
    }

    /// Choose whether the directory should drop fully booked candidates.
    #[must_use]
    pub fn exclude_fully_booked(mut self, exclude: bool) -> Self {
        self.exclude_fully_booked = exclude;
        self
    }

    /// The retrieval collaborator.
    pub const fn directory(&self) -> &D {
        &self.directory
    }

    /// The scorer in use.
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }
}

impl<D, S> RankingService<D, S>
where
    D: UserSource + CandidateSource,
    S: Scorer,
{
    /// Rank candidates for `user_id` on `params.date`.
    ///
    /// # Errors
    /// Returns [`RankError::MissingUser`] when the user does not resolve and
    /// [`RankError::Retrieval`] when the directory fails. No partial results
    /// are returned.
    pub fn rank_for_user(
        &self,
        user_id: &str,
        params: &SearchParams,
    ) -> Result<Vec<ScoredItem>, RankError> {
        let user = self.directory.fetch_user(user_id)?;
        let candidates = self
            .directory
            .fetch_candidate_items(params.date, self.exclude_fully_booked)?;
        Ok(rank_scored(&self.scorer, candidates, &user, params))
    }
}
