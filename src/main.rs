use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::Cli;

mod cli;
mod config;
mod encoding;
mod error;
mod library;
mod rename;
mod runtime;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(cli::parse_error_status(&e));
        }
    };
    match runtime::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if runtime::is_broken_pipe(e.as_ref()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
