use std::process::ExitCode;

use nodecfg_cli::{cli, failure_message, logging, run};
use tracing::debug;

fn main() -> ExitCode {
    let matches = cli::command().get_matches();

    let level = matches.get_one::<String>("log-level").map(String::as_str);
    if let Err(e) = logging::init(level) {
        eprintln!("{e:#}");
        return ExitCode::from(2);
    }

    match run(&matches) {
        Ok(text) => {
            if !text.is_empty() {
                print!("{text}");
                if !text.ends_with('\n') {
                    println!();
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            debug!("{e:?}");
            ExitCode::FAILURE
        }
    }
}
