//! Rankline command-line interface.

mod cli;
mod config;
mod logging;
mod output;

use std::sync::Arc;

use clap::Parser;
use eyre::WrapErr;
use rankline_leaderboard::LeaderboardService;
use rankline_store::{FileScoreStore, OrderedScoreStore};
use tracing::{debug, info};

use crate::cli::{Cli, Commands};
use crate::config::RanklineConfig;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_logging(&cli.logs)?;

    let mut config = RanklineConfig::load(cli.config.as_deref())?;
    config.apply_args(&cli);

    let store = FileScoreStore::new_with_create_dir(config.store.path.clone()).wrap_err_with(|| {
        format!("failed to open score store at {}", config.store.path.display())
    })?;
    let store = Arc::new(store);
    let service = LeaderboardService::new(store.clone(), &config.leaderboard)?;
    debug!(
        period = %service.current_period()?.key(),
        store = %store.path().display(),
        "leaderboard ready"
    );

    match cli.command {
        Commands::Incr { user, delta } => {
            let score = service.incr_scores(user, delta).await?;
            info!(%user, delta, score, "score updated");
            println!("{score}");
        }
        Commands::Around { user, output } => {
            output::print_scores(&service.get_rank_list(user).await?, output)?;
        }
        Commands::Top { n, output } => {
            output::print_scores(&service.get_top_n_rank_list(n).await?, output)?;
        }
        Commands::Me { user, output } => {
            output::print_user(user, service.user_score(user).await?.as_ref(), output)?;
        }
    }

    store.flush().await.wrap_err("failed to save scores")?;
    Ok(())
}
