//! Command line definition

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the `nodecfg` command
#[must_use]
pub fn command() -> Command {
    Command::new("nodecfg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Upgrade and inspect node configuration files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter, overrides RUST_LOG (e.g. debug, nodecfg_migrate=trace)"),
        )
        .subcommand(
            Command::new("migrate")
                .about("Upgrade a config file to the current version")
                .arg(file_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the upgraded file here instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report the version of a config file and the upgrades it needs")
                .arg(file_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Print one value of the upgraded config")
                .arg(file_arg())
                .arg(
                    Arg::new("path")
                        .required(true)
                        .help("Dotted key path, e.g. DNSSync.Port"),
                ),
        )
        .subcommand(
            Command::new("dump-default")
                .about("Print a fresh config for a network")
                .arg(
                    Arg::new("network")
                        .long("network")
                        .short('n')
                        .default_value("mainnet")
                        .help("Network name (mainnet, testnet, localnet, ...)"),
                ),
        )
}

fn file_arg() -> Arg {
    Arg::new("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Config file to read")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn parses_global_log_level_after_subcommand() {
        let matches = command()
            .try_get_matches_from(["nodecfg", "check", "node.toml", "--json", "--log-level", "debug"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("log-level").map(String::as_str), Some("debug"));

        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "check");
        assert!(args.get_flag("json"));
    }

    #[test]
    fn dump_default_network_defaults_to_mainnet() {
        let matches = command().try_get_matches_from(["nodecfg", "dump-default"]).unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<String>("network").map(String::as_str), Some("mainnet"));
    }

    #[test]
    fn get_requires_path() {
        assert!(command()
            .try_get_matches_from(["nodecfg", "get", "node.toml"])
            .is_err());
    }
}
