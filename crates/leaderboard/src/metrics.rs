//! Leaderboard Metrics

use metrics::Counter;

/// Leaderboard Metrics
#[derive(Clone, Debug)]
pub(crate) struct LeaderboardMetrics {
    /// Number of applied score increments
    pub(crate) increments_total: Counter,
    /// Number of increments refused by the negative score policy
    pub(crate) rejected_increments_total: Counter,
    /// Number of windowed rank queries
    pub(crate) rank_queries_total: Counter,
    /// Number of top-N queries
    pub(crate) top_queries_total: Counter,
    /// Number of failed store requests
    pub(crate) store_errors_total: Counter,
}

impl Default for LeaderboardMetrics {
    fn default() -> Self {
        Self {
            increments_total: metrics::counter!("leaderboard.increments_total"),
            rejected_increments_total: metrics::counter!(
                "leaderboard.rejected_increments_total"
            ),
            rank_queries_total: metrics::counter!("leaderboard.rank_queries_total"),
            top_queries_total: metrics::counter!("leaderboard.top_queries_total"),
            store_errors_total: metrics::counter!("leaderboard.store_errors_total"),
        }
    }
}
