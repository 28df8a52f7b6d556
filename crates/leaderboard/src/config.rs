//! Leaderboard configuration.

use chrono::FixedOffset;
use rankline_primitives::{DEFAULT_KEY_PREFIX, DEFAULT_WINDOW_RADIUS};
use serde::{Deserialize, Serialize};

use crate::error::{LeaderboardError, Result};
use crate::period::MonthlyPeriods;

/// Default number of increment lock stripes.
pub const DEFAULT_LOCK_STRIPES: usize = 64;

/// What to do with an increment that would leave a negative logical score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeScorePolicy {
    /// Fail with [`LeaderboardError::NegativeScore`] and write nothing.
    #[default]
    Reject,
    /// Store the negative score.
    Allow,
}

/// Leaderboard configuration (TOML-serializable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Prefix of the monthly set keys.
    pub key_prefix: String,

    /// Offset from UTC, in minutes, in which calendar months are counted.
    pub utc_offset_minutes: i32,

    /// Entries returned on each side of a user by the rank window query.
    pub window_radius: u64,

    /// Optional upper bound for top-N queries. Unbounded when unset.
    pub max_top_n: Option<u64>,

    /// Number of locks serializing increments per user. 0 disables them and
    /// concurrent increments for the same user may lose updates.
    pub increment_lock_stripes: usize,

    /// Handling of increments that go below zero.
    pub negative_scores: NegativeScorePolicy,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
            utc_offset_minutes: 0,
            window_radius: DEFAULT_WINDOW_RADIUS,
            max_top_n: None,
            increment_lock_stripes: DEFAULT_LOCK_STRIPES,
            negative_scores: NegativeScorePolicy::default(),
        }
    }
}

impl LeaderboardConfig {
    /// `utc_offset_minutes` as a chrono offset.
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                LeaderboardError::Config(format!(
                    "utc offset of {} minutes is out of range",
                    self.utc_offset_minutes
                ))
            })
    }

    /// Monthly period provider for this configuration.
    pub fn periods(&self) -> Result<MonthlyPeriods> {
        Ok(MonthlyPeriods::new(self.key_prefix.clone(), self.utc_offset()?))
    }

    /// Reject values no service can run with.
    pub fn validate(&self) -> Result<()> {
        if self.key_prefix.is_empty() {
            return Err(LeaderboardError::Config("key prefix must not be empty".into()));
        }
        if self.max_top_n == Some(0) {
            return Err(LeaderboardError::Config("max_top_n must be at least 1".into()));
        }
        self.utc_offset()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LeaderboardConfig::default();
        assert_eq!(config.key_prefix, "activity_score_zset");
        assert_eq!(config.window_radius, 10);
        assert_eq!(config.negative_scores, NegativeScorePolicy::Reject);
        assert_eq!(config.max_top_n, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_offset_bounds() {
        let mut config = LeaderboardConfig {
            utc_offset_minutes: -5 * 60,
            ..Default::default()
        };
        assert_eq!(config.utc_offset().unwrap().local_minus_utc(), -5 * 3600);

        config.utc_offset_minutes = 24 * 60;
        assert!(matches!(
            config.validate(),
            Err(LeaderboardError::Config(_))
        ));

        config.utc_offset_minutes = i32::MAX;
        assert!(config.utc_offset().is_err());
    }

    #[test]
    fn test_invalid_values() {
        let config = LeaderboardConfig {
            key_prefix: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LeaderboardConfig {
            max_top_n: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize() {
        let config: LeaderboardConfig =
            serde_json::from_str(r#"{ "window_radius": 5, "negative_scores": "allow" }"#).unwrap();

        assert_eq!(config.window_radius, 5);
        assert_eq!(config.negative_scores, NegativeScorePolicy::Allow);
        assert_eq!(config.key_prefix, DEFAULT_KEY_PREFIX);
    }
}
