use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a leaderboard member.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A ranked leaderboard entry as returned to callers.
///
/// Built fresh for every query from the decoded store contents; it is a
/// snapshot and never written back.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UserScore {
    user_id: UserId,
    /// 1-based rank, lower is better.
    rank: u64,
    /// Decoded logical score.
    score: i64,
}

impl UserScore {
    pub const fn new(user_id: UserId, rank: u64, score: i64) -> Self {
        Self {
            user_id,
            rank,
            score,
        }
    }

    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    pub const fn rank(&self) -> u64 {
        self.rank
    }

    pub const fn score(&self) -> i64 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parse() {
        assert_eq!("42".parse::<UserId>().unwrap(), UserId::new(42));
        assert!("-1".parse::<UserId>().is_err());
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn test_user_score_json_shape() {
        let entry = UserScore::new(UserId::new(7), 3, 120);
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "user_id": 7, "rank": 3, "score": 120 })
        );
    }
}
