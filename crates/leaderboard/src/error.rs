use rankline_primitives::{CodecError, UserId};
use rankline_store::ScoreStoreError;
use thiserror::Error;

pub type Result<T, E = LeaderboardError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The backing store failed; never retried or masked.
    #[error("score store error: {0}")]
    Store(#[from] ScoreStoreError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Rejected by [`NegativeScorePolicy::Reject`](crate::NegativeScorePolicy::Reject).
    #[error("score of user {user_id} would become negative ({score})")]
    NegativeScore { user_id: UserId, score: i64 },
    #[error("adding {delta} to score {score} of user {user_id} overflows")]
    IncrementOverflow { user_id: UserId, score: i64, delta: i64 },
    #[error("period error: {0}")]
    Period(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
