//! Rendering of leaderboard results.

use std::fmt::Write as _;

use eyre::Result;
use rankline_primitives::{UserId, UserScore};

use crate::cli::OutputArgs;

pub(crate) fn print_scores(scores: &[UserScore], args: OutputArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(scores)?);
    } else {
        print!("{}", render_table(scores));
    }
    Ok(())
}

pub(crate) fn print_user(user_id: UserId, score: Option<&UserScore>, args: OutputArgs) -> Result<()> {
    match (score, args.json) {
        (_, true) => println!("{}", serde_json::to_string_pretty(&score)?),
        (Some(score), false) => print!("{}", render_table(std::slice::from_ref(score))),
        (None, false) => println!("user {user_id} has no score this month"),
    }
    Ok(())
}

/// Fixed-width table, one row per entry. Empty input renders a single notice line.
fn render_table(scores: &[UserScore]) -> String {
    if scores.is_empty() {
        return "no entries\n".to_owned();
    }

    let mut out = format!("{:>6}  {:>20}  {:>12}\n", "RANK", "USER", "SCORE");
    for score in scores {
        let _ = writeln!(
            out,
            "{:>6}  {:>20}  {:>12}",
            score.rank(),
            score.user_id(),
            score.score()
        );
    }
    out
}
