//! Monthly, tie-break-aware leaderboard.
//!
//! [`LeaderboardService`] keeps one ordered set per calendar month in an
//! [`OrderedScoreStore`](rankline_store::OrderedScoreStore). Scores are stored
//! as composites (see [`rankline_primitives::ScoreCodec`]) so that equal
//! logical scores rank the earlier achiever first.
//!
//! Time enters only through the injected [`Clock`] and [`PeriodKeyProvider`],
//! which is what the tests drive.

mod clock;
mod config;
mod error;
mod metrics;
mod period;
mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DEFAULT_LOCK_STRIPES, LeaderboardConfig, NegativeScorePolicy};
pub use error::{LeaderboardError, Result};
pub use period::{FixedPeriod, MonthlyPeriods, Period, PeriodKeyProvider};
pub use service::LeaderboardService;
