//! nodecfg command line
//!
//! `nodecfg migrate | check | get | dump-default`, built on
//! [`nodecfg_migrate`]. The binary is a thin wrapper around [`run`].

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod logging;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::ArgMatches;

/// Execute parsed arguments and return the text to print
///
/// # Errors
/// Returns error if the selected command fails
pub fn run(matches: &ArgMatches) -> Result<String> {
    match matches.subcommand() {
        Some(("migrate", args)) => {
            let output = args.get_one::<PathBuf>("output").map(PathBuf::as_path);
            commands::migrate(file(args)?, output)
        }
        Some(("check", args)) => commands::check(file(args)?, args.get_flag("json")),
        Some(("get", args)) => {
            let Some(path) = args.get_one::<String>("path") else {
                bail!("missing key path");
            };
            commands::get(file(args)?, path)
        }
        Some(("dump-default", args)) => {
            let network = args
                .get_one::<String>("network")
                .map_or("mainnet", String::as_str);
            commands::dump_default(network)
        }
        Some((name, _)) => bail!("unknown command '{name}'"),
        None => bail!("no command given"),
    }
}

/// Line printed to stderr when a command fails
///
/// Not routed through tracing; shown even with logging off.
#[must_use]
pub fn failure_message(err: &anyhow::Error) -> String {
    format!("error: {err:#}")
}

fn file(args: &ArgMatches) -> Result<&std::path::Path> {
    match args.get_one::<PathBuf>("file") {
        Some(path) => Ok(path.as_path()),
        None => bail!("missing config file argument"),
    }
}
