//! Composite score encoding.
//!
//! A composite score is `logical * SCORE_SCALE + tie_break`, where
//! `tie_break = period_end - written_at` in milliseconds. Sorting composites
//! descending sorts by logical score first and, for equal logical scores, puts
//! the earlier write first.
//!
//! Decoding uses Euclidean division so the tie-break is always the
//! non-negative remainder, which keeps negative logical scores ordered the
//! same way as positive ones.

use thiserror::Error;

use crate::constants::{MAX_TIE_BREAK, SCORE_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("logical score {score} does not fit in a composite score")]
    Overflow { score: i64 },
}

/// Encoder/decoder for composite scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCodec;

impl ScoreCodec {
    /// Tie-break term for a write at `written_at_ms` in a period ending at
    /// `period_end_ms`, clamped to `[0, MAX_TIE_BREAK]`.
    ///
    /// Writes after the period end get 0 and rank after every on-time write
    /// with the same logical score.
    pub fn tie_break_for(written_at_ms: i64, period_end_ms: i64) -> i64 {
        period_end_ms
            .saturating_sub(written_at_ms)
            .clamp(0, MAX_TIE_BREAK)
    }

    /// Composite for logical `score` written at `written_at_ms`.
    ///
    /// ```
    /// use rankline_primitives::{SCORE_SCALE, ScoreCodec};
    ///
    /// let composite = ScoreCodec::encode(80, 1_000, 4_000).unwrap();
    /// assert_eq!(composite, 80 * SCORE_SCALE + 3_000);
    /// assert_eq!(ScoreCodec::decode(composite), 80);
    /// ```
    pub fn encode(score: i64, written_at_ms: i64, period_end_ms: i64) -> Result<i64, CodecError> {
        let tie_break = Self::tie_break_for(written_at_ms, period_end_ms);
        score
            .checked_mul(SCORE_SCALE)
            .and_then(|base| base.checked_add(tie_break))
            .ok_or(CodecError::Overflow { score })
    }

    /// Logical score carried by `composite`.
    pub fn decode(composite: i64) -> i64 {
        composite.div_euclid(SCORE_SCALE)
    }

    /// The tie-break term carried by `composite`.
    pub fn tie_break(composite: i64) -> i64 {
        composite.rem_euclid(SCORE_SCALE)
    }
}
