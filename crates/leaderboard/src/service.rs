//! Leaderboard queries and score updates.

use std::sync::Arc;

use rankline_primitives::{ScoreCodec, UserId, UserScore};
use rankline_store::{OrderedScoreStore, ScoreStoreError, ScoredMember};
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{LeaderboardConfig, NegativeScorePolicy};
use crate::error::{LeaderboardError, Result};
use crate::metrics::LeaderboardMetrics;
use crate::period::{Period, PeriodKeyProvider};

/// Monthly leaderboard over an [`OrderedScoreStore`].
///
/// The service keeps no ranking state of its own and can be shared freely
/// between tasks. The current period is resolved from the clock once per call.
pub struct LeaderboardService<S: ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    periods: Arc<dyn PeriodKeyProvider>,
    window_radius: u64,
    max_top_n: Option<u64>,
    negative_scores: NegativeScorePolicy,
    /// Increment locks, selected by user id. Empty when disabled.
    stripes: Box<[Mutex<()>]>,
    metrics: LeaderboardMetrics,
}

impl<S: OrderedScoreStore + ?Sized> LeaderboardService<S> {
    /// Service on wall-clock time with monthly periods from `config`.
    pub fn new(store: Arc<S>, config: &LeaderboardConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            store,
            clock: Arc::new(SystemClock),
            periods: Arc::new(config.periods()?),
            window_radius: config.window_radius,
            max_top_n: config.max_top_n,
            negative_scores: config.negative_scores,
            stripes: (0..config.increment_lock_stripes)
                .map(|_| Mutex::new(()))
                .collect(),
            metrics: LeaderboardMetrics::default(),
        })
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the period provider built from the configuration.
    pub fn with_periods(mut self, periods: Arc<dyn PeriodKeyProvider>) -> Self {
        self.periods = periods;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The period the clock currently falls in.
    pub fn current_period(&self) -> Result<Period> {
        self.periods.period_at(self.clock.now())
    }

    /// Add `delta` to the user's logical score and return the new score.
    ///
    /// A user without an entry starts from 0. The write refreshes the
    /// tie-break, so the new score counts as achieved now.
    pub async fn incr_scores(&self, user_id: UserId, delta: i64) -> Result<i64> {
        let _guard = match self.stripe(user_id) {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let now = self.clock.now();
        let period = self.periods.period_at(now)?;
        let key = period.key().as_str();

        let current = self
            .observe(self.store.score(key, user_id).await)?
            .map_or(0, ScoreCodec::decode);
        let score = current
            .checked_add(delta)
            .ok_or(LeaderboardError::IncrementOverflow {
                user_id,
                score: current,
                delta,
            })?;

        if score < 0 && self.negative_scores == NegativeScorePolicy::Reject {
            self.metrics.rejected_increments_total.increment(1);
            return Err(LeaderboardError::NegativeScore { user_id, score });
        }

        let composite = ScoreCodec::encode(
            score,
            now.timestamp_millis(),
            period.ends_at().timestamp_millis(),
        )?;
        self.observe(self.store.upsert(key, user_id, composite).await)?;
        self.metrics.increments_total.increment(1);

        debug!(%user_id, period = %period.key(), delta, score, "incremented score");
        Ok(score)
    }

    /// The user and up to `window_radius` neighbours on each side, best first.
    ///
    /// Empty when the user has no entry this period.
    pub async fn get_rank_list(&self, user_id: UserId) -> Result<Vec<UserScore>> {
        let period = self.current_period()?;
        let key = period.key().as_str();
        self.metrics.rank_queries_total.increment(1);

        let Some(rank) = self.observe(self.store.reverse_rank(key, user_id).await)? else {
            debug!(%user_id, period = %period.key(), "user has no rank");
            return Ok(Vec::new());
        };

        let low = rank.saturating_sub(self.window_radius);
        let high = rank.saturating_add(self.window_radius);
        let entries = self.observe(
            self.store
                .reverse_range_with_scores(key, low, high)
                .await,
        )?;
        trace!(%user_id, rank, low, high, fetched = entries.len(), "rank window");

        let user_rank = rank.saturating_add(1);
        let first_rank = if user_rank > self.window_radius {
            user_rank - self.window_radius
        } else {
            1
        };
        Ok(build_user_scores(&entries, first_rank))
    }

    /// The best `n` entries, capped at `max_top_n` when one is configured.
    /// Empty for `n <= 0`.
    pub async fn get_top_n_rank_list(&self, n: i64) -> Result<Vec<UserScore>> {
        if n <= 0 {
            return Ok(Vec::new());
        }
        let count = self
            .max_top_n
            .map_or(n.unsigned_abs(), |cap| n.unsigned_abs().min(cap));

        let period = self.current_period()?;
        self.metrics.top_queries_total.increment(1);

        let entries = self.observe(
            self.store
                .reverse_range_with_scores(period.key().as_str(), 0, count - 1)
                .await,
        )?;
        debug!(period = %period.key(), requested = n, returned = entries.len(), "top list");

        Ok(build_user_scores(&entries, 1))
    }

    /// The user's own rank and score, `None` without an entry.
    pub async fn user_score(&self, user_id: UserId) -> Result<Option<UserScore>> {
        let period = self.current_period()?;
        let key = period.key().as_str();

        let Some(rank) = self.observe(self.store.reverse_rank(key, user_id).await)? else {
            return Ok(None);
        };
        let composite = self.observe(self.store.score(key, user_id).await)?;

        Ok(composite.map(|composite| {
            UserScore::new(
                user_id,
                rank.saturating_add(1),
                ScoreCodec::decode(composite),
            )
        }))
    }

    fn stripe(&self, user_id: UserId) -> Option<&Mutex<()>> {
        let index = user_id.get().checked_rem(self.stripes.len() as u64)?;
        self.stripes.get(usize::try_from(index).ok()?)
    }

    fn observe<T>(&self, result: std::result::Result<T, ScoreStoreError>) -> Result<T> {
        result.map_err(|err| {
            self.metrics.store_errors_total.increment(1);
            warn!(%err, "score store request failed");
            err.into()
        })
    }
}

/// Decode `entries` (best first) into ranks starting at `first_rank`.
fn build_user_scores(entries: &[ScoredMember], first_rank: u64) -> Vec<UserScore> {
    entries
        .iter()
        .zip(first_rank..)
        .map(|(entry, rank)| UserScore::new(entry.member, rank, ScoreCodec::decode(entry.score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};
    use rankline_primitives::SCORE_SCALE;
    use rankline_store::MemoryScoreStore;

    use super::*;
    use crate::clock::ManualClock;

    fn jan_15() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_705_320_000_000).unwrap()
    }

    fn service(
        config: LeaderboardConfig,
    ) -> (LeaderboardService<MemoryScoreStore>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(jan_15()));
        let service = LeaderboardService::new(Arc::new(MemoryScoreStore::new()), &config)
            .unwrap()
            .with_clock(clock.clone());
        (service, clock)
    }

    #[test]
    fn test_build_user_scores() {
        let entries = [
            ScoredMember::new(UserId::new(3), 9 * SCORE_SCALE + 5),
            ScoredMember::new(UserId::new(1), 4 * SCORE_SCALE),
        ];

        let scores = build_user_scores(&entries, 11);
        assert_eq!(
            scores,
            vec![
                UserScore::new(UserId::new(3), 11, 9),
                UserScore::new(UserId::new(1), 12, 4),
            ]
        );
        assert!(build_user_scores(&[], 1).is_empty());
    }

    #[test]
    fn test_stripes() {
        let (striped, _) = service(LeaderboardConfig {
            increment_lock_stripes: 4,
            ..Default::default()
        });
        assert!(striped.stripe(UserId::new(7)).is_some());
        assert!(std::ptr::eq(
            striped.stripe(UserId::new(3)).unwrap(),
            striped.stripe(UserId::new(7)).unwrap()
        ));

        let (unguarded, _) = service(LeaderboardConfig {
            increment_lock_stripes: 0,
            ..Default::default()
        });
        assert!(unguarded.stripe(UserId::new(7)).is_none());
    }

    #[tokio::test]
    async fn test_increment_writes_tie_break() {
        let (service, clock) = service(LeaderboardConfig::default());
        let period = service.current_period().unwrap();

        assert_eq!(service.incr_scores(UserId::new(1), 10).await.unwrap(), 10);

        let composite = service
            .store()
            .score(period.key().as_str(), UserId::new(1))
            .await
            .unwrap()
            .unwrap();
        let expected_tie_break =
            period.ends_at().timestamp_millis() - clock.now().timestamp_millis();
        assert_eq!(ScoreCodec::tie_break(composite), expected_tie_break);

        // A later increment refreshes the tie-break.
        clock.advance(TimeDelta::hours(1));
        service.incr_scores(UserId::new(1), 0).await.unwrap();
        let refreshed = service
            .store()
            .score(period.key().as_str(), UserId::new(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(refreshed, composite - 3_600_000);
    }

    #[tokio::test]
    async fn test_user_score() {
        let (service, _) = service(LeaderboardConfig::default());
        assert_eq!(service.user_score(UserId::new(1)).await.unwrap(), None);

        service.incr_scores(UserId::new(1), 5).await.unwrap();
        service.incr_scores(UserId::new(2), 8).await.unwrap();

        assert_eq!(
            service.user_score(UserId::new(1)).await.unwrap(),
            Some(UserScore::new(UserId::new(1), 2, 5))
        );
    }

    #[tokio::test]
    async fn test_top_n_capped() {
        let (service, _) = service(LeaderboardConfig {
            max_top_n: Some(2),
            ..Default::default()
        });
        for user in 1..=5 {
            service.incr_scores(UserId::new(user), user as i64).await.unwrap();
        }

        let top = service.get_top_n_rank_list(i64::MAX).await.unwrap();
        let users: Vec<u64> = top.iter().map(|s| s.user_id().get()).collect();
        assert_eq!(users, vec![5, 4]);
    }
}
