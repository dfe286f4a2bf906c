//! Retrieval seams for users and candidate items.
//!
//! Persistence lives outside this workspace. These traits describe what the
//! ranking pipeline needs from it; [`MemoryDirectory`] is a linear-scan
//! implementation over records already held in memory.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::{Item, User};

/// Boxed error returned by a failing backend.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by retrieval collaborators.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// No user exists with the requested identifier.
    #[error("user `{user_id}` not found")]
    MissingUser {
        /// Identifier that failed to resolve.
        user_id: String,
    },
    /// The backend failed while answering a query.
    #[error("{operation} failed")]
    Backend {
        /// Description of the failed query.
        operation: &'static str,
        /// Underlying backend error.
        #[source]
        source: BackendError,
    },
}

/// Look up users by identifier.
pub trait UserSource {
    /// Fetch a user with preferences and location populated.
    ///
    /// # Errors
    /// Returns [`RetrievalError::MissingUser`] when the id does not resolve,
    /// or [`RetrievalError::Backend`] for any other failure.
    fn fetch_user(&self, user_id: &str) -> Result<User, RetrievalError>;
}

/// Fetch the candidate items for a search date.
pub trait CandidateSource {
    /// Return candidates for `date`.
    ///
    /// With `exclude_fully_booked`, implementations may drop items that have
    /// no free slot on `date`. Scoring recomputes availability regardless,
    /// so the filter is only an optimisation.
    ///
    /// # Errors
    /// Returns [`RetrievalError::Backend`] when the backend fails.
    fn fetch_candidate_items(
        &self,
        date: NaiveDate,
        exclude_fully_booked: bool,
    ) -> Result<Vec<Item>, RetrievalError>;
}

/// Users and items held in memory, typically decoded from a JSON dataset.
///
/// Candidate order follows insertion order, which ranking preserves on ties.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use slotrank_core::{CandidateSource, MemoryDirectory, User, UserSource};
///
/// let user = User::new("u-1", Vec::new(), None).expect("valid user");
/// let directory = MemoryDirectory::new(vec![user], Vec::new());
/// assert!(directory.fetch_user("u-1").is_ok());
/// assert!(directory.fetch_user("u-2").is_err());
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
/// let items = directory.fetch_candidate_items(date, false).expect("items");
/// assert!(items.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemoryDirectory {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    items: Vec<Item>,
}

impl MemoryDirectory {
    /// Build a directory from users and items.
    #[must_use]
    pub const fn new(users: Vec<User>, items: Vec<Item>) -> Self {
        Self { users, items }
    }

    /// Stored users.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Stored items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl UserSource for MemoryDirectory {
    fn fetch_user(&self, user_id: &str) -> Result<User, RetrievalError> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
            .ok_or_else(|| RetrievalError::MissingUser {
                user_id: user_id.to_owned(),
            })
    }
}

impl CandidateSource for MemoryDirectory {
    fn fetch_candidate_items(
        &self,
        date: NaiveDate,
        exclude_fully_booked: bool,
    ) -> Result<Vec<Item>, RetrievalError> {
        let candidates: Vec<Item> = self
            .items
            .iter()
            .filter(|item| !exclude_fully_booked || !item.is_fully_booked_on(date))
            .cloned()
            .collect();
        log::debug!(
            "memory directory returned {} of {} items for {date}",
            candidates.len(),
            self.items.len()
        );
        Ok(candidates)
    }
}
