//! Leaderboard-wide constants.

/// Multiplier separating the logical score from the tie-break term.
///
/// Must stay strictly greater than the longest period in milliseconds
/// (31 days is ~2.7e9 ms).
pub const SCORE_SCALE: i64 = 10_000_000_000;

/// Largest tie-break term a composite score can carry.
pub const MAX_TIE_BREAK: i64 = SCORE_SCALE - 1;

/// Default prefix of monthly period keys.
pub const DEFAULT_KEY_PREFIX: &str = "activity_score_zset";

/// Default number of neighbours returned on each side of a user.
pub const DEFAULT_WINDOW_RADIUS: u64 = 10;

