//! Ordered score store trait and implementations (memory, file).
//!
//! An ordered score store holds any number of independent sets, each addressed
//! by a string key. Within a set every member has exactly one integer score and
//! members are ranked by score descending. Ties on score are ranked by member
//! id descending.

mod file;
mod memory;

use async_trait::async_trait;
use rankline_primitives::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::FileScoreStore;
pub use memory::MemoryScoreStore;

#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A member together with its raw stored score.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ScoredMember {
    pub member: UserId,
    pub score: i64,
}

impl ScoredMember {
    pub const fn new(member: UserId, score: i64) -> Self {
        Self { member, score }
    }
}

/// Sorted-set operations the leaderboard needs from its backing store.
///
/// Each call is expected to be atomic on its own. Sequences of calls are not:
/// callers that read and then write must provide their own exclusion.
#[async_trait]
pub trait OrderedScoreStore: Send + Sync {
    /// Insert `member` with `score`, replacing any previous score.
    async fn upsert(
        &self,
        set_key: &str,
        member: UserId,
        score: i64,
    ) -> Result<(), ScoreStoreError>;

    /// Stored score of `member`, `None` if absent.
    async fn score(&self, set_key: &str, member: UserId) -> Result<Option<i64>, ScoreStoreError>;

    /// 0-based position of `member` ordered by score descending, `None` if absent.
    async fn reverse_rank(
        &self,
        set_key: &str,
        member: UserId,
    ) -> Result<Option<u64>, ScoreStoreError>;

    /// Members at 0-based descending positions `start..=end`, best first.
    ///
    /// Positions past the end of the set are ignored; `start > end` yields an
    /// empty vec.
    async fn reverse_range_with_scores(
        &self,
        set_key: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<ScoredMember>, ScoreStoreError>;

    /// Push buffered writes to durable storage.
    async fn flush(&self) -> Result<(), ScoreStoreError> {
        Ok(())
    }
}
