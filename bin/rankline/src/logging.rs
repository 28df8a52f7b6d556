//! Log output setup.

use eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use crate::cli::LogArgs;

/// Initialize logging based on command line arguments.
///
/// Logs go to stderr so command output on stdout stays machine readable.
/// The filter is built with the following precedence:
/// 1. If `--quiet` is set, only errors are shown
/// 2. Otherwise `RUST_LOG` if set, else a level derived from `-v` (warn by default)
/// 3. Directives from `--log.filter` are added on top
pub(crate) fn init_logging(args: &LogArgs) -> Result<()> {
    let filter = if args.quiet {
        EnvFilter::new("error")
    } else {
        let base_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base_level));

        if let Some(custom_filter) = &args.filter {
            for directive in custom_filter.split(',') {
                match directive.parse() {
                    Ok(d) => filter = filter.add_directive(d),
                    Err(err) => eprintln!("ignoring log directive {directive:?}: {err}"),
                }
            }
        }

        filter
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if args.json {
        builder.json().try_init()
    } else {
        builder.without_time().try_init()
    };
    installed.map_err(|err| eyre!("failed to install log subscriber: {err}"))
}
