use proptest::prelude::*;
use rankline_primitives::{SCORE_SCALE, ScoreCodec};

// One 31-day month in milliseconds.
const MONTH_MS: i64 = 31 * 24 * 60 * 60 * 1_000;
const PERIOD_END_MS: i64 = 1_706_745_599_999;
const MAX_SCORE: i64 = i64::MAX / SCORE_SCALE - 1;

fn write_time() -> impl Strategy<Value = i64> {
    (PERIOD_END_MS - MONTH_MS)..=PERIOD_END_MS
}

proptest! {
    #[test]
    fn prop_roundtrip(score in 0..=MAX_SCORE, written_at in write_time()) {
        let composite = ScoreCodec::encode(score, written_at, PERIOD_END_MS).unwrap();
        prop_assert_eq!(ScoreCodec::decode(composite), score);
        prop_assert_eq!(ScoreCodec::tie_break(composite), PERIOD_END_MS - written_at);
    }

    #[test]
    fn prop_roundtrip_negative(score in -MAX_SCORE..0, written_at in write_time()) {
        let composite = ScoreCodec::encode(score, written_at, PERIOD_END_MS).unwrap();
        prop_assert_eq!(ScoreCodec::decode(composite), score);
    }

    #[test]
    fn prop_earlier_write_ranks_higher(
        score in 0..=MAX_SCORE,
        a in write_time(),
        b in write_time(),
    ) {
        prop_assume!(a != b);
        let (earlier, later) = if a < b { (a, b) } else { (b, a) };
        let first = ScoreCodec::encode(score, earlier, PERIOD_END_MS).unwrap();
        let second = ScoreCodec::encode(score, later, PERIOD_END_MS).unwrap();
        prop_assert!(first > second);
    }

    #[test]
    fn prop_higher_score_always_wins(
        low in 0..MAX_SCORE,
        bump in 1..1_000i64,
        low_at in write_time(),
        high_at in write_time(),
    ) {
        let high = (low + bump).min(MAX_SCORE);
        prop_assume!(high > low);
        // The higher score is written as late as possible, the lower as early.
        let high_composite = ScoreCodec::encode(high, high_at.max(low_at), PERIOD_END_MS).unwrap();
        let low_composite = ScoreCodec::encode(low, high_at.min(low_at), PERIOD_END_MS).unwrap();
        prop_assert!(high_composite > low_composite);
    }

    #[test]
    fn prop_decode_preserves_order(
        entries in prop::collection::vec((0..10_000i64, write_time()), 1..64),
    ) {
        let mut composites: Vec<i64> = entries
            .iter()
            .map(|&(score, at)| ScoreCodec::encode(score, at, PERIOD_END_MS).unwrap())
            .collect();
        composites.sort_unstable_by(|a, b| b.cmp(a));

        let decoded: Vec<i64> = composites.iter().copied().map(ScoreCodec::decode).collect();
        prop_assert!(decoded.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
