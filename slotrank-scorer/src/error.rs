//! Errors raised by the ranking pipeline.

use slotrank_core::RetrievalError;
use thiserror::Error;

/// Failures that stop a ranking call.
///
/// Missing optional data never reaches this type; sub-scores fall back to
/// their defaults instead.
#[derive(Debug, Error)]
pub enum RankError {
    /// The requesting user does not exist.
    #[error("user `{user_id}` not found")]
    MissingUser {
        /// Identifier that failed to resolve.
        user_id: String,
    },
    /// The retrieval collaborator failed.
    #[error("failed to retrieve ranking inputs")]
    Retrieval {
        /// Source error from the retrieval layer.
        #[source]
        source: RetrievalError,
    },
}

impl From<RetrievalError> for RankError {
    fn from(source: RetrievalError) -> Self {
        match source {
            RetrievalError::MissingUser { user_id } => Self::MissingUser { user_id },
            other @ RetrievalError::Backend { .. } => Self::Retrieval { source: other },
        }
    }
}
