//! Figment-based configuration loading.
//!
//! Configuration priority (highest wins):
//! 1. CLI arguments (applied after Figment load)
//! 2. Config file (TOML)
//! 3. Environment variables (`RANKLINE_` prefix, `__` between sections)
//! 4. Defaults

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, bail};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use rankline_leaderboard::LeaderboardConfig;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Default location of the score file.
pub(crate) const DEFAULT_STORE_PATH: &str = "rankline-scores.json";

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RanklineConfig {
    /// Leaderboard behaviour.
    pub(crate) leaderboard: LeaderboardConfig,

    /// Score persistence.
    pub(crate) store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StoreConfig {
    /// JSON file holding every period's scores.
    pub(crate) path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl RanklineConfig {
    /// Load configuration from defaults, environment, and config file.
    /// CLI overrides are applied separately with [`Self::apply_args`].
    pub(crate) fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("RANKLINE_").split("__"));

        if let Some(path) = config_path {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().wrap_err("Failed to load configuration")
    }

    pub(crate) fn apply_args(&mut self, cli: &Cli) {
        if let Some(path) = &cli.store {
            self.store.path.clone_from(path);
        }
    }
}
