//! simdrive - build and run iOS apps on the simulator

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;

use simdrive_cli::cli::{Cli, EXIT_INTERRUPTED, exit_code};
use simdrive_cli::output::json;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    simdrive_cli::logging::init(cli.verbose);
    let json_mode = cli.json;

    // The command future is dropped when Ctrl-C wins, which kills any child
    // process it was waiting on (`kill_on_drop`).
    let outcome = tokio::select! {
        result = cli.run() => Some(result),
        Ok(()) = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(())) => {}
        Some(Err(e)) if exit_code(&e) == EXIT_INTERRUPTED => {
            eprintln!("Interrupted.");
            std::process::exit(EXIT_INTERRUPTED);
        }
        Some(Err(e)) => {
            if json_mode {
                match json::format_error(&format!("{e:#}"), json::error_code(&e)) {
                    Ok(obj) => println!("{obj}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(exit_code(&e));
        }
        None => {
            eprintln!("Interrupted.");
            std::process::exit(EXIT_INTERRUPTED);
        }
    }
}
