//! In-memory ordered score store (does not persist across restarts).

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

use async_trait::async_trait;
use parking_lot::RwLock;
use rankline_primitives::UserId;

use super::{OrderedScoreStore, ScoreStoreError, ScoredMember};

/// One ordered set: point lookups by member plus an ordered index.
#[derive(Debug, Default)]
struct SortedSet {
    scores: HashMap<UserId, i64>,
    /// Ascending `(score, member)`; iterate in reverse for descending rank.
    ordered: BTreeSet<(i64, UserId)>,
}

impl SortedSet {
    fn upsert(&mut self, member: UserId, score: i64) {
        if let Some(previous) = self.scores.insert(member, score) {
            self.ordered.remove(&(previous, member));
        }
        self.ordered.insert((score, member));
    }

    fn score(&self, member: UserId) -> Option<i64> {
        self.scores.get(&member).copied()
    }

    fn reverse_rank(&self, member: UserId) -> Option<u64> {
        let score = self.score(member)?;
        let above = self
            .ordered
            .range((Bound::Excluded((score, member)), Bound::Unbounded))
            .count();
        Some(above as u64)
    }

    fn reverse_range(&self, start: u64, end: u64) -> Vec<ScoredMember> {
        if start > end {
            return Vec::new();
        }
        let skip = usize::try_from(start).unwrap_or(usize::MAX);
        let take = usize::try_from(end - start)
            .unwrap_or(usize::MAX)
            .saturating_add(1);

        self.ordered
            .iter()
            .rev()
            .skip(skip)
            .take(take)
            .map(|&(score, member)| ScoredMember::new(member, score))
            .collect()
    }

    fn members(&self) -> Vec<ScoredMember> {
        self.reverse_range(0, u64::MAX)
    }
}

/// In-memory ordered score store.
///
/// Used directly in tests and embedded deployments, and as the working set of
/// [`FileScoreStore`](crate::FileScoreStore).
///
/// Point reads and upserts are O(log n). `reverse_rank` walks every member
/// ranked above the target and `reverse_range_with_scores` walks past
/// `start` entries, so both are O(n) in the set size. Sets with many
/// thousands of members should use a store with an indexed rank (e.g. a
/// sorted-set server) instead.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    sets: RwLock<HashMap<String, SortedSet>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot produced by [`Self::snapshot`].
    ///
    /// A member listed twice in one set keeps its last score.
    pub fn from_snapshot(snapshot: BTreeMap<String, Vec<ScoredMember>>) -> Self {
        let sets = snapshot
            .into_iter()
            .map(|(key, members)| {
                let mut set = SortedSet::default();
                for ScoredMember { member, score } in members {
                    set.upsert(member, score);
                }
                (key, set)
            })
            .collect();

        Self {
            sets: RwLock::new(sets),
        }
    }

    /// Every set with its members in descending rank order.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<ScoredMember>> {
        self.sets
            .read()
            .iter()
            .map(|(key, set)| (key.clone(), set.members()))
            .collect()
    }

    /// Number of members in `set_key`.
    pub fn len(&self, set_key: &str) -> usize {
        self.sets
            .read()
            .get(set_key)
            .map_or(0, |set| set.scores.len())
    }

    pub fn is_empty(&self, set_key: &str) -> bool {
        self.len(set_key) == 0
    }

    /// Keys of all non-empty sets, sorted.
    pub fn set_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sets.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Drop a whole set. Returns whether it existed.
    pub fn remove_set(&self, set_key: &str) -> bool {
        self.sets.write().remove(set_key).is_some()
    }
}

#[async_trait]
impl OrderedScoreStore for MemoryScoreStore {
    async fn upsert(
        &self,
        set_key: &str,
        member: UserId,
        score: i64,
    ) -> Result<(), ScoreStoreError> {
        self.sets
            .write()
            .entry(set_key.to_owned())
            .or_default()
            .upsert(member, score);
        Ok(())
    }

    async fn score(&self, set_key: &str, member: UserId) -> Result<Option<i64>, ScoreStoreError> {
        Ok(self
            .sets
            .read()
            .get(set_key)
            .and_then(|set| set.score(member)))
    }

    async fn reverse_rank(
        &self,
        set_key: &str,
        member: UserId,
    ) -> Result<Option<u64>, ScoreStoreError> {
        Ok(self
            .sets
            .read()
            .get(set_key)
            .and_then(|set| set.reverse_rank(member)))
    }

    async fn reverse_range_with_scores(
        &self,
        set_key: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<ScoredMember>, ScoreStoreError> {
        Ok(self
            .sets
            .read()
            .get(set_key)
            .map(|set| set.reverse_range(start, end))
            .unwrap_or_default())
    }
}
