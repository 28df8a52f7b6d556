//! Primitive types shared by the leaderboard crates.
//!
//! - [`UserId`] and [`UserScore`] - members of a leaderboard and ranked results
//! - [`PeriodKey`] - the ordered-set key isolating one calendar month
//! - [`ScoreCodec`] - packs a logical score and a recency tie-break into one
//!   orderable integer

pub mod codec;
pub mod constants;
mod period;
mod user;

pub use codec::{CodecError, ScoreCodec};
pub use constants::*;
pub use period::PeriodKey;
pub use user::{UserId, UserScore};
