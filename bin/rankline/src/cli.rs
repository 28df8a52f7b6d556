//! CLI argument assembly and top-level parser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rankline_primitives::UserId;

/// Rankline - monthly leaderboard with recency tie-breaks
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Logging configuration.
    #[command(flatten)]
    pub(crate) logs: LogArgs,

    /// Path to a TOML configuration file.
    #[arg(long, global = true, value_name = "PATH", env = "RANKLINE_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Score store file. Overrides `store.path` from the configuration.
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) store: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Leaderboard commands. All of them act on the current month.
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Add points to a user's score and print the new score.
    Incr {
        /// User to credit.
        #[arg(long)]
        user: UserId,

        /// Points to add (negative to subtract).
        #[arg(long, allow_negative_numbers = true)]
        delta: i64,
    },

    /// Show a user and the users ranked around them.
    Around {
        /// User at the centre of the window.
        #[arg(long)]
        user: UserId,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the best users.
    Top {
        /// Number of users to show.
        #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
        n: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a user's own rank and score.
    Me {
        #[arg(long)]
        user: UserId,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub(crate) struct OutputArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = "Logging")]
pub(crate) struct LogArgs {
    /// Silence all log output.
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub(crate) verbosity: u8,

    /// Log filter directive (e.g., "rankline_leaderboard=debug").
    #[arg(long = "log.filter", global = true, value_name = "DIRECTIVE")]
    pub(crate) filter: Option<String>,

    /// Use JSON format for log output.
    #[arg(long = "log.json", global = true)]
    pub(crate) json: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_incr() {
        let cli = Cli::try_parse_from([
            "rankline", "-vv", "--store", "/tmp/s.json", "incr", "--user", "7", "--delta", "-3",
        ])
        .unwrap();

        assert_eq!(cli.logs.verbosity, 2);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(
            cli.command,
            Commands::Incr { user, delta: -3 } if user == UserId::new(7)
        ));
    }

    #[test]
    fn test_parse_top_defaults() {
        let cli = Cli::try_parse_from(["rankline", "top", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Top {
                n: 10,
                output: OutputArgs { json: true }
            }
        ));
    }

    #[test]
    fn test_log_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rankline", "top", "-vv", "--log.json"]).unwrap();
        assert_eq!(cli.logs.verbosity, 2);
        assert!(cli.logs.json);

        let cli = Cli::try_parse_from(["rankline", "me", "--user", "3", "-q"]).unwrap();
        assert!(cli.logs.quiet);
    }

    #[test]
    fn test_rejects_bad_user() {
        assert!(Cli::try_parse_from(["rankline", "me", "--user", "bob"]).is_err());
    }
}
